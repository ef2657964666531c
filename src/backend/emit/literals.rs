//! Constant rendering.
//!
//! Maps source literals onto C++ literal syntax. Strings are wrapped in quotes as-is: embedded quotes and
//! backslashes are not escaped.

use pytircy_syntax::ast::{Constant, StrKind};

use super::EmitError;

/// A string starting with this prefix is copied into the output verbatim, minus the prefix.
pub const RAW_CPP_PREFIX: &str = "$cpp ";

pub(super) fn emit_constant(constant: &Constant) -> Result<String, EmitError> {
    match constant {
        Constant::Str {
            value,
            kind: StrKind::Char,
        } => {
            if value.chars().count() > 1 {
                return Err(EmitError::InvalidCharLiteral { value: value.clone() });
            }
            Ok(format!("'{}'", value))
        }
        Constant::Str { value, .. } => match value.strip_prefix(RAW_CPP_PREFIX) {
            Some(raw) => Ok(raw.to_string()),
            None => Ok(format!("\"{}\"", value)),
        },
        Constant::Int(i) => Ok(i.to_string()),
        Constant::Float(f) => Ok(format_float(*f)),
        Constant::Bool(b) => Ok(b.to_string()),
        Constant::None | Constant::Bytes(_) | Constant::Ellipsis => Err(EmitError::UnsupportedLiteralType {
            type_name: constant.type_name(),
        }),
    }
}

/// Shortest text that parses back to the same `f64`, always with a `.` or an exponent so C++ reads a double.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
