//! Operator and punctuation lexing.
//!
//! Multi-character operators are formed greedily: `<<=` is tried before
//! `<<` before `<`, `==` before `=`, and so on, so the longest valid match
//! always wins.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `+` or `+=`.
    pub fn lex_plus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PlusEq
        } else if self.cursor.match_char('+') {
            TokenKind::PlusPlus
        } else {
            TokenKind::Plus
        }
    }

    /// Lexes `-`, `-=`, or `--`.
    pub fn lex_minus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::MinusEq
        } else if self.cursor.match_char('-') {
            TokenKind::MinusMinus
        } else {
            TokenKind::Minus
        }
    }

    /// Lexes `*` or `*=`.
    pub fn lex_star(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::StarEq
        } else {
            TokenKind::Star
        }
    }

    /// Lexes `/` or `/=`. `//` line comments are consumed by
    /// `skip_whitespace_and_comments` before dispatch ever reaches here.
    pub fn lex_slash(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    /// Lexes `%` or `%=`.
    pub fn lex_percent(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PercentEq
        } else {
            TokenKind::Percent
        }
    }

    /// Lexes `=` or `==`.
    pub fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::EqEq
        } else {
            TokenKind::Eq
        }
    }

    /// Lexes `!` or `!=`.
    pub fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::NotEq
        } else {
            TokenKind::Bang
        }
    }

    /// Lexes `<`, `<=`, `<<`, or `<<=`.
    pub fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::LtEq
        } else if self.cursor.match_char('<') {
            if self.cursor.match_char('=') {
                TokenKind::ShlEq
            } else {
                TokenKind::Shl
            }
        } else {
            TokenKind::Lt
        }
    }

    /// Lexes `>`, `>=`, `>>`, or `>>=`.
    pub fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::GtEq
        } else if self.cursor.match_char('>') {
            if self.cursor.match_char('=') {
                TokenKind::ShrEq
            } else {
                TokenKind::Shr
            }
        } else {
            TokenKind::Gt
        }
    }

    /// Lexes `&`, `&&`, or `&=`.
    pub fn lex_ampersand(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            TokenKind::AndAnd
        } else if self.cursor.match_char('=') {
            TokenKind::AmpersandEq
        } else {
            TokenKind::Ampersand
        }
    }

    /// Lexes `|`, `||`, or `|=`.
    pub fn lex_pipe(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            TokenKind::OrOr
        } else if self.cursor.match_char('=') {
            TokenKind::PipeEq
        } else {
            TokenKind::Pipe
        }
    }

    /// Lexes `^` (bitwise XOR) or `^=`.
    pub fn lex_caret(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::CaretEq
        } else {
            TokenKind::Caret
        }
    }

    /// Lexes `~` (bitwise NOT). Vela has no `~=` compound form.
    pub fn lex_tilde(&mut self) -> TokenKind {
        self.cursor.advance();
        TokenKind::Tilde
    }

    /// Lexes `::`, the only valid use of `:` in Vela. A lone `:` is an error.
    pub fn lex_colon(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char(':') {
            TokenKind::ColonColon
        } else {
            self.report_error("expected '::', found a lone ':'".to_string());
            TokenKind::Error("lone ':'".to_string())
        }
    }
}
