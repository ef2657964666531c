//! String scanning for the Pytircy lexer
//!
//! Handles plain, char (`u"c"`), raw (`r"..."`) and byte (`b"..."`) strings, single- or triple-quoted. Escape
//! sequences are decoded unless the literal is raw; unknown escapes are kept verbatim, backslash included.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::StrKind;

/// Flags decoded from the letters in front of a string literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct StringPrefix {
    raw: bool,
    bytes: bool,
    char: bool,
    format: bool,
}

impl StringPrefix {
    /// Decode a prefix spelling (case-insensitive). Returns `None` if the spelling is an ordinary identifier.
    pub(super) fn parse(spelling: &str) -> Option<Self> {
        let prefix = match spelling.to_ascii_lowercase().as_str() {
            "u" => Self { char: true, ..Self::default() },
            "r" => Self { raw: true, ..Self::default() },
            "b" => Self { bytes: true, ..Self::default() },
            "f" => Self { format: true, ..Self::default() },
            "rb" | "br" => Self { raw: true, bytes: true, ..Self::default() },
            "rf" | "fr" => Self { raw: true, format: true, ..Self::default() },
            _ => return None,
        };
        Some(prefix)
    }
}

impl<'a> Lexer<'a> {
    /// Scan a string literal. The opening quote has already been consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char, prefix: StringPrefix) {
        let triple = self.peek() == Some(quote) && self.peek_next() == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }

        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    self.error("Unterminated string", start);
                    return;
                }
                Some('\n') if !triple => {
                    self.error("Unterminated string (newline in single-quoted string)", start);
                    return;
                }
                Some(c) if c == quote => {
                    self.advance();
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                        break;
                    }
                    value.push(quote);
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.advance() else {
                        self.error("Unterminated escape sequence", start);
                        return;
                    };
                    if prefix.raw {
                        value.push('\\');
                        value.push(escaped);
                    } else if let Some(decoded) = self.decode_escape(escaped, start) {
                        value.push_str(&decoded);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        if prefix.format {
            self.error("f-strings are not supported", start);
            return;
        }

        if prefix.bytes {
            if !value.is_ascii() {
                self.error("Bytes literals can only contain ASCII characters", start);
                return;
            }
            self.add_token(TokenKind::Bytes(value.into_bytes()), start);
            return;
        }

        let kind = if prefix.char { StrKind::Char } else { StrKind::Plain };
        self.add_token(TokenKind::String { value, kind }, start);
    }

    /// Decode the character after a backslash. `None` means the escape produced no text (or was invalid and
    /// already reported).
    fn decode_escape(&mut self, escaped: char, start: usize) -> Option<String> {
        let decoded = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'v' => '\x0b',
            '\\' | '\'' | '"' => escaped,
            // Backslash-newline continues the literal on the next line.
            '\n' => return None,
            'x' => {
                let mut hex = String::new();
                for _ in 0..2 {
                    match self.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(c);
                            self.advance();
                        }
                        _ => break,
                    }
                }
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) if hex.len() == 2 => char::from(byte),
                    _ => {
                        self.error(format!("Invalid \\x escape: \\x{}", hex), start);
                        return None;
                    }
                }
            }
            other => return Some(format!("\\{}", other)),
        };
        Some(decoded.to_string())
    }
}
