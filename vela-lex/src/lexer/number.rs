//! Number literal lexing.
//!
//! This module handles lexing of decimal, hexadecimal, binary, and
//! floating-point literals. Overflow against a declared type's bit width is
//! not this module's job -- that happens later, in `vela_par`'s `Value`
//! construction, once the declared annotation is known. The lexer only
//! enforces the two fixed lexeme-length caps the grammar specifies for hex
//! and binary literals.

use crate::token::TokenKind;
use crate::unicode::is_digit_in_base;
use crate::Lexer;

/// `"0x"` plus 16 hex digits: the widest value that fits a 64-bit integer.
const MAX_HEX_LEXEME_LEN: usize = 18;
/// `"b'"` plus up to 64 bits plus the closing `'`.
const MAX_BINARY_LEXEME_LEN: usize = 3 + 64;

impl<'a> Lexer<'a> {
    /// Lexes a number literal: decimal, `0x` hex, or decimal-with-`.`-float.
    ///
    /// Binary literals use the separate `b'...'` form and are dispatched
    /// from `next_token` before falling into identifier lexing, not from
    /// here.
    pub fn lex_number(&mut self) -> TokenKind {
        let start = self.cursor.position();

        if self.cursor.current_char() == '0'
            && (self.cursor.peek_char(1) == 'x' || self.cursor.peek_char(1) == 'X')
        {
            self.cursor.advance();
            self.cursor.advance();
            return self.lex_hex_literal(start);
        }

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_float {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            let text = self.cursor.slice_from(start);
            return match text.parse::<f64>() {
                Ok(value) => TokenKind::FloatLiteral(value),
                Err(e) => {
                    self.report_error(format!("invalid floating point literal '{}': {}", text, e));
                    TokenKind::FloatLiteral(0.0)
                },
            };
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<u64>() {
            Ok(value) => TokenKind::IntLiteral(value),
            Err(e) => {
                self.report_error(format!("integer literal '{}' does not fit in 64 bits: {}", text, e));
                TokenKind::IntLiteral(0)
            },
        }
    }

    /// Lexes the digits of a `0x` hex literal, `start` pointing at the `0`.
    fn lex_hex_literal(&mut self, start: usize) -> TokenKind {
        let digit_start = self.cursor.position();

        while is_digit_in_base(self.cursor.current_char(), 16) {
            self.cursor.advance();
        }

        if digit_start == self.cursor.position() {
            self.report_error("hex literal has no digits after '0x'".to_string());
            return TokenKind::HexLiteral(0);
        }

        let full_text = self.cursor.slice_from(start);
        if full_text.len() > MAX_HEX_LEXEME_LEN {
            self.report_error(format!(
                "hex literal '{}' is too wide (maximum {} characters)",
                full_text, MAX_HEX_LEXEME_LEN
            ));
            return TokenKind::HexLiteral(0);
        }

        let digits = &full_text[2..];
        match u64::from_str_radix(digits, 16) {
            Ok(value) => TokenKind::HexLiteral(value),
            Err(e) => {
                self.report_error(format!("invalid hex literal '{}': {}", full_text, e));
                TokenKind::HexLiteral(0)
            },
        }
    }

    /// Lexes a `b'...'` binary literal. Called from `next_token` with the
    /// cursor positioned at the leading `b`.
    pub fn lex_binary_literal(&mut self) -> TokenKind {
        let start = self.cursor.position();
        self.cursor.advance();
        self.cursor.advance();

        let digit_start = self.cursor.position();
        while is_digit_in_base(self.cursor.current_char(), 2) {
            self.cursor.advance();
        }

        if self.cursor.current_char() != '\'' {
            self.report_error("unterminated binary literal, expected closing '".to_string());
            return TokenKind::BinaryLiteral(0);
        }

        let digits = self.cursor.slice_from(digit_start);
        self.cursor.advance();

        let full_text = self.cursor.slice_from(start);
        if full_text.len() > MAX_BINARY_LEXEME_LEN {
            self.report_error(format!(
                "binary literal '{}' is too wide (maximum {} characters)",
                full_text, MAX_BINARY_LEXEME_LEN
            ));
            return TokenKind::BinaryLiteral(0);
        }

        if digits.is_empty() {
            self.report_error("binary literal has no digits after \"b'\"".to_string());
            return TokenKind::BinaryLiteral(0);
        }

        match u64::from_str_radix(digits, 2) {
            Ok(value) => TokenKind::BinaryLiteral(value),
            Err(e) => {
                self.report_error(format!("invalid binary literal '{}': {}", full_text, e));
                TokenKind::BinaryLiteral(0)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util::Handler;

    fn lex_num(source: &str) -> TokenKind {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_number()
    }

    fn lex_bin(source: &str) -> TokenKind {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_binary_literal()
    }

    #[test]
    fn test_decimal_integer() {
        assert_eq!(lex_num("42"), TokenKind::IntLiteral(42));
        assert_eq!(lex_num("0"), TokenKind::IntLiteral(0));
        assert_eq!(lex_num("123456"), TokenKind::IntLiteral(123456));
    }

    #[test]
    fn test_hex_integer() {
        assert_eq!(lex_num("0xFF"), TokenKind::HexLiteral(0xFF));
        assert_eq!(lex_num("0x0"), TokenKind::HexLiteral(0));
        assert_eq!(
            lex_num("0xFFFFFFFFFFFFFFFF"),
            TokenKind::HexLiteral(u64::MAX)
        );
    }

    #[test]
    fn test_hex_too_wide_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("0xFFFFFFFFFFFFFFFFFFFF", &mut handler);
        lexer.lex_number();
        assert!(handler.has_errors());
    }

    #[test]
    fn test_binary_literal() {
        assert_eq!(lex_bin("b'1010'"), TokenKind::BinaryLiteral(0b1010));
        assert_eq!(lex_bin("b'0'"), TokenKind::BinaryLiteral(0));
    }

    #[test]
    fn test_binary_literal_unterminated() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("b'101", &mut handler);
        lexer.lex_binary_literal();
        assert!(handler.has_errors());
    }

    #[test]
    fn test_float() {
        let result = lex_num("3.14");
        assert!(matches!(result, TokenKind::FloatLiteral(f) if (f - 3.14).abs() < 0.001));
    }

    #[test]
    fn test_integer_not_treated_as_float_without_fraction_digits() {
        // "3." with no trailing digit is not a float per the grammar; the
        // '.' is left for the caller (it is not a Vela operator either, so
        // it will surface as an unexpected-character error downstream).
        assert_eq!(lex_num("3"), TokenKind::IntLiteral(3));
    }
}
