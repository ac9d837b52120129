//! Identifier and keyword lexing.
//!
//! This module handles lexing of identifiers and keywords.

use crate::token::{keyword_from_ident, TokenKind};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;
use vela_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore, followed by
    /// alphanumeric characters or underscores. After reading the identifier,
    /// checks if it matches a reserved keyword.
    ///
    /// # Returns
    ///
    /// Either a keyword kind (e.g. `TokenKind::If`) or `TokenKind::Ident`.
    pub fn lex_identifier(&mut self) -> TokenKind {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or_else(|| TokenKind::Ident(Symbol::intern(text)))
    }
}
