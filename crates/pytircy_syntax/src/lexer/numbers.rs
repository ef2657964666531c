//! Number scanning for the Pytircy lexer
//!
//! Handles decimal, hex, octal and binary integers plus floating-point literals. A `_` separator must sit between
//! two digits (or right after a base prefix) and is dropped. Integers must fit in an `i64` and floats must be
//! finite. Non-zero decimal integers may not start with `0`.

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.scan_radix_int(start, radix);
                return;
            }
        }

        let mut value = String::new();
        let mut is_float = first == '.';
        if is_float {
            value.push_str("0.");
        } else {
            value.push(first);
        }

        if self.take_digits(&mut value, !is_float, start).is_none() {
            return;
        }

        // Fractional part; `1.` on its own is a valid float.
        if !is_float && self.peek() == Some('.') && self.peek_next() != Some('.') {
            is_float = true;
            value.push('.');
            self.advance();
            if self.take_digits(&mut value, false, start).is_none() {
                return;
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            value.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                value.push(sign);
                self.advance();
            }
            match self.take_digits(&mut value, false, start) {
                None => return,
                Some(false) => {
                    self.error(format!("Invalid float literal: missing exponent digits in '{}'", value), start);
                    return;
                }
                Some(true) => {}
            }
        }

        if matches!(self.peek(), Some('j' | 'J')) {
            self.advance();
            self.error("Complex literals are not supported", start);
            return;
        }

        if is_float {
            match value.parse::<f64>() {
                Ok(f) if f.is_finite() => self.add_token(TokenKind::Float(f), start),
                Ok(_) => self.error(format!("Float literal out of range: {}", value), start),
                Err(_) => self.error(format!("Invalid float literal: {}", value), start),
            }
        } else if value.starts_with('0') && value.chars().any(|c| c != '0') {
            let text = self.source[start..self.current_pos].to_string();
            self.error(
                format!("Leading zeros are not permitted in decimal integer literals: {}", text),
                start,
            );
        } else {
            match value.parse::<i64>() {
                Ok(i) => self.add_token(TokenKind::Int(i), start),
                Err(_) => self.error(
                    format!("Integer literal out of range for a 64-bit integer: {}", value),
                    start,
                ),
            }
        }
    }

    /// Scan the digits after a `0x`/`0o`/`0b` prefix.
    fn scan_radix_int(&mut self, start: usize, radix: u32) {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c == '_' {
                // Allowed right after the prefix or between digits, never doubled or trailing.
                if !self.peek_next().is_some_and(|n| n.is_ascii_alphanumeric()) {
                    self.misplaced_separator(start);
                    return;
                }
                self.advance();
            } else if c.is_ascii_alphanumeric() {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if digits.is_empty() {
            self.error("Invalid integer literal: missing digits after base prefix", start);
            return;
        }

        match i64::from_str_radix(&digits, radix) {
            Ok(i) => self.add_token(TokenKind::Int(i), start),
            Err(e) => {
                let text = self.source[start..self.current_pos].to_string();
                if matches!(
                    e.kind(),
                    std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow
                ) {
                    self.error(
                        format!("Integer literal out of range for a 64-bit integer: {}", text),
                        start,
                    );
                } else {
                    self.error(format!("Invalid digit in base-{} literal: {}", radix, text), start);
                }
            }
        }
    }

    /// Push decimal digits onto `value`, dropping `_` separators.
    ///
    /// `after_digit` says whether the character just before the run was a digit. Returns whether any digit was
    /// seen, or `None` after reporting a misplaced `_`.
    fn take_digits(&mut self, value: &mut String, after_digit: bool, start: usize) -> Option<bool> {
        let mut any = false;
        let mut prev_digit = after_digit;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                value.push(c);
                any = true;
                prev_digit = true;
                self.advance();
            } else if c == '_' {
                if !prev_digit || !self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                    self.misplaced_separator(start);
                    return None;
                }
                prev_digit = false;
                self.advance();
            } else {
                break;
            }
        }
        Some(any)
    }

    /// Report a `_` that does not separate two digits, then skip the rest of the literal.
    fn misplaced_separator(&mut self, start: usize) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }
        let text = self.source[start..self.current_pos].to_string();
        self.error(
            format!("Invalid number literal: '_' must separate two digits in {}", text),
            start,
        );
    }
}
