//! Lexer for the Vela language.
//!
//! Turns source text into a stream of [`Token`]s per the closed token set
//! in [`token::TokenKind`]. Whitespace and `//` line comments are skipped
//! silently; anything else unrecognized becomes a [`token::TokenKind::Error`]
//! token and is also reported through the [`vela_util::Handler`] passed to
//! [`Lexer::new`].

pub mod cursor;
pub mod token;
pub mod unicode;

mod lexer;

pub use cursor::Cursor;
pub use lexer::core::Lexer;
pub use token::{Token, TokenKind};
