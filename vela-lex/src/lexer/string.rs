//! String and character literal lexing.
//!
//! Vela string and char literals have no escape sequences and no raw-string
//! form: a string is the bytes between two `"` on a single line, a char is
//! exactly one byte between two `'`.

use crate::token::TokenKind;
use crate::Lexer;
use vela_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a string literal: the bytes between two `"` on one line.
    ///
    /// An unterminated string (EOF or a newline before the closing quote)
    /// is reported and lexed as an empty string.
    pub fn lex_string(&mut self) -> TokenKind {
        let start = self.cursor.position();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                return TokenKind::StringLiteral(Symbol::intern(""));
            }

            let c = self.cursor.current_char();

            if c == '"' {
                let content = &self.cursor.slice_from(start)[1..];
                self.cursor.advance();
                return TokenKind::StringLiteral(Symbol::intern(content));
            }

            if c == '\n' {
                self.report_error("string literal cannot span multiple lines".to_string());
                return TokenKind::StringLiteral(Symbol::intern(""));
            }

            self.cursor.advance();
        }
    }

    /// Lexes a character literal: exactly one byte between two `'`.
    pub fn lex_char(&mut self) -> TokenKind {
        self.cursor.advance();

        if self.cursor.is_at_end() || self.cursor.current_char() == '\'' {
            self.report_error("empty character literal".to_string());
            return TokenKind::CharLiteral(0);
        }

        if self.cursor.current_char() == '\n' {
            self.report_error("unterminated character literal".to_string());
            return TokenKind::CharLiteral(0);
        }

        let byte = self.cursor.current_byte().unwrap_or(0);
        self.cursor.advance();

        if self.cursor.current_char() != '\'' {
            self.report_error("character literal must contain exactly one byte".to_string());
            while !self.cursor.is_at_end()
                && self.cursor.current_char() != '\''
                && self.cursor.current_char() != '\n'
            {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '\'' {
                self.cursor.advance();
            }
            return TokenKind::CharLiteral(0);
        }

        self.cursor.advance();
        TokenKind::CharLiteral(byte)
    }
}
