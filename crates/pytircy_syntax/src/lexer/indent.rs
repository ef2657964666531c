//! Indentation handling for the Pytircy lexer
//!
//! Turns leading whitespace into INDENT/DEDENT tokens the way Python does. A tab counts as four columns.

use super::Lexer;
use super::tokens::{Token, TokenKind};
use crate::ast::Span;

const TAB_WIDTH: usize = 4;

impl<'a> Lexer<'a> {
    pub(super) fn handle_indentation(&mut self) {
        let start = self.current_pos;
        let mut width = 0;

        while let Some(c) = self.peek() {
            match c {
                ' ' => {
                    width += 1;
                    self.advance();
                }
                '\t' => {
                    width += TAB_WIDTH;
                    self.advance();
                }
                '\r' => {
                    self.advance();
                }
                // Comment-only and blank lines never change the indentation level.
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                    self.match_char('\n');
                    return;
                }
                '\n' => {
                    self.advance();
                    return;
                }
                _ => break,
            }
        }

        if self.is_at_end() {
            self.at_line_start = false;
            return;
        }

        let current = *self.indent_stack.last().unwrap_or(&0);
        let span = Span::new(start, self.current_pos);

        if width > current {
            self.indent_stack.push(width);
            self.tokens.push(Token::new(TokenKind::Indent, span));
        } else if width < current {
            let mut dedents = 0;
            while self.indent_stack.len() > 1 && self.indent_stack.last().is_some_and(|&top| width < top) {
                self.indent_stack.pop();
                dedents += 1;
            }

            let landed = *self.indent_stack.last().unwrap_or(&0);
            if width != landed {
                self.error(
                    format!("Inconsistent indentation: expected {} spaces, got {}", landed, width),
                    start,
                );
            }

            if dedents > 0 {
                self.tokens.push(Token::new(TokenKind::Dedent, span));
                self.pending_dedents = dedents - 1;
            }
        }

        self.at_line_start = false;
    }
}
