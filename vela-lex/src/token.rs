//! The closed token set for Vela source.
//!
//! A `Token` is a value object: a `TokenKind` plus the line/column where it
//! starts. Payload-bearing kinds (`Ident`, `Int`, `String`, ...) carry their
//! decoded value directly rather than a separate borrowed lexeme, since the
//! lexer already has to materialize most of these (interned symbols, parsed
//! numbers) to build the token at all.

use vela_util::Symbol;

/// A lexed unit of Vela source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// The closed set of token kinds recognized by the Vela lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Type keywords
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    StringTy,
    Bool,
    Void,
    Enum,
    Struct,

    // Control keywords
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,

    // Identifier
    Ident(Symbol),

    // Literals
    IntLiteral(u64),
    HexLiteral(u64),
    BinaryLiteral(u64),
    FloatLiteral(f64),
    CharLiteral(u8),
    BoolLiteral(bool),
    StringLiteral(Symbol),

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    ColonColon,
    Question,

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Logical operators
    AndAnd,
    OrOr,
    Bang,

    // Bitwise operators
    Caret,
    Ampersand,
    Pipe,
    Tilde,
    Shl,
    Shr,

    // Comparison operators
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Assignment
    Eq,

    // Increment/decrement
    PlusPlus,
    MinusMinus,

    // Terse (compound) assignments
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpersandEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,

    Eof,
    /// Lexical error. `message` holds the diagnostic text that was also
    /// emitted to the handler; callers that only look at the token stream
    /// (e.g. the parser's error-recovery path) can still see what broke.
    Error(String),
}

impl TokenKind {
    /// True for the closed set of type keywords (`i8`..`u64`, floats, etc.).
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::F32
                | TokenKind::F64
                | TokenKind::Char
                | TokenKind::StringTy
                | TokenKind::Bool
                | TokenKind::Void
                | TokenKind::Enum
                | TokenKind::Struct
        )
    }
}

/// Looks up the keyword token for an identifier's text, if any.
///
/// Vela's closed keyword set is the type keywords plus the control
/// keywords plus the boolean literals. Anything else is a plain identifier.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    Some(match text {
        "i8" => TokenKind::I8,
        "i16" => TokenKind::I16,
        "i32" => TokenKind::I32,
        "i64" => TokenKind::I64,
        "u8" => TokenKind::U8,
        "u16" => TokenKind::U16,
        "u32" => TokenKind::U32,
        "u64" => TokenKind::U64,
        "f32" => TokenKind::F32,
        "f64" => TokenKind::F64,
        "char" => TokenKind::Char,
        "string" => TokenKind::StringTy,
        "bool" => TokenKind::Bool,
        "void" => TokenKind::Void,
        "enum" => TokenKind::Enum,
        "struct" => TokenKind::Struct,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "true" => TokenKind::BoolLiteral(true),
        "false" => TokenKind::BoolLiteral(false),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_ident_types() {
        assert_eq!(keyword_from_ident("i32"), Some(TokenKind::I32));
        assert_eq!(keyword_from_ident("u64"), Some(TokenKind::U64));
        assert_eq!(keyword_from_ident("struct"), Some(TokenKind::Struct));
    }

    #[test]
    fn test_keyword_from_ident_control() {
        assert_eq!(keyword_from_ident("if"), Some(TokenKind::If));
        assert_eq!(keyword_from_ident("return"), Some(TokenKind::Return));
    }

    #[test]
    fn test_keyword_from_ident_bool_literals() {
        assert_eq!(keyword_from_ident("true"), Some(TokenKind::BoolLiteral(true)));
        assert_eq!(keyword_from_ident("false"), Some(TokenKind::BoolLiteral(false)));
    }

    #[test]
    fn test_keyword_from_ident_not_a_keyword() {
        assert_eq!(keyword_from_ident("fn"), None);
        assert_eq!(keyword_from_ident("let"), None);
        assert_eq!(keyword_from_ident("main"), None);
    }

    #[test]
    fn test_is_type_keyword() {
        assert!(TokenKind::I32.is_type_keyword());
        assert!(TokenKind::Struct.is_type_keyword());
        assert!(!TokenKind::If.is_type_keyword());
        assert!(!TokenKind::Ident(Symbol::intern("x")).is_type_keyword());
    }
}
