//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and its core dispatch.

use vela_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for the Vela language.
///
/// The lexer transforms source code text into a stream of tokens.
/// It handles whitespace, `//` comments, identifiers, keywords, operators,
/// and literals.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub handler: &'a mut Handler,

    /// Starting position of the current token (byte offset).
    pub token_start: usize,

    /// Line number where the current token starts (1-based).
    token_start_line: u32,

    /// Column number where the current token starts (1-based).
    token_start_column: u32,

    /// Whether the BOM (Byte Order Mark) has been checked.
    pub bom_checked: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            bom_checked: false,
        }
    }

    /// Returns the next token from the source code.
    ///
    /// This is the main entry point for tokenization. It skips whitespace
    /// and comments, then dispatches to the appropriate lexing method
    /// based on the current character.
    ///
    /// # Returns
    /// The next token in the source stream. Once the source is exhausted
    /// this returns `TokenKind::Eof` on every subsequent call.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        let kind = match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                TokenKind::LParen
            },
            ')' => {
                self.cursor.advance();
                TokenKind::RParen
            },
            '{' => {
                self.cursor.advance();
                TokenKind::LBrace
            },
            '}' => {
                self.cursor.advance();
                TokenKind::RBrace
            },
            '[' => {
                self.cursor.advance();
                TokenKind::LBracket
            },
            ']' => {
                self.cursor.advance();
                TokenKind::RBracket
            },
            ',' => {
                self.cursor.advance();
                TokenKind::Comma
            },
            ';' => {
                self.cursor.advance();
                TokenKind::Semicolon
            },
            '?' => {
                self.cursor.advance();
                TokenKind::Question
            },
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            ':' => self.lex_colon(),
            '^' => self.lex_caret(),
            '~' => self.lex_tilde(),
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            'b' if self.cursor.peek_char(1) == '\'' => self.lex_binary_literal(),
            c if crate::unicode::is_ascii_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                let message = format!("unexpected character '{}'", c);
                self.report_error(message.clone());
                self.cursor.advance();
                TokenKind::Error(message)
            },
        };

        self.make(kind)
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_start_line, self.token_start_column)
    }

    /// Reports a lexical error at the current token position.
    ///
    /// # Arguments
    /// * `message` - The error message to display
    pub fn report_error(&mut self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message)
            .span(span)
            .emit(self.handler);
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the starting position of the current token.
    pub fn token_start(&mut self) -> usize {
        self.token_start
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util::Handler;

    fn tokens_of(source: &str) -> Vec<TokenKind> {
        let mut handler = Handler::new();
        let lexer = Lexer::new(source, &mut handler);
        lexer.map(|t| t.kind).collect()
    }

    #[test]
    fn test_eof_on_empty_source() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("", &mut handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_simple_declaration() {
        let kinds = tokens_of("i32 x;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::I32,
                TokenKind::Ident(vela_util::Symbol::intern("x")),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_unknown_character_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("#", &mut handler);
        let token = lexer.next_token();
        assert!(matches!(token.kind, TokenKind::Error(_)));
        assert!(handler.has_errors());
    }
}
