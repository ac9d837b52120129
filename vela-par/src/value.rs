//! `Value`: the constant-folded payload the parser attaches to literal and
//! folded-constant expressions.

use vela_lex::TokenKind;

use crate::annotation::{Kind, ParserAnnotation};

/// A decoded literal value, tagged by kind.
///
/// `None` marks a node that has no compile-time value (most of the tree);
/// `Overflow` marks a numeric literal that did not fit the declared type's
/// width -- a diagnostic is raised alongside it, but parsing continues so
/// later errors in the same file are still found.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Overflow,
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(u8),
    String(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

/// Internal error: the parser asked `Value` to do something its own
/// invariants should have prevented (arithmetic across mismatched kinds,
/// decoding a token the annotation says is impossible). Never a user-facing
/// diagnostic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("internal error: {0}")]
    KindMismatch(String),
}

impl Value {
    /// Decodes a literal token into a `Value` per `annotation.actual_kind`,
    /// detecting overflow against the declared bit width.
    ///
    /// Returns the value plus `Some(diagnostic)` when overflow was
    /// detected; the caller is expected to emit the diagnostic through its
    /// own `Handler` (this module has no handler of its own).
    pub fn from_token(annotation: &ParserAnnotation, kind: &TokenKind) -> (Value, Option<String>) {
        match annotation.actual_kind {
            Kind::Int => Self::decode_int(annotation, kind),
            Kind::Float => Self::decode_float(kind),
            Kind::Bool => (Self::decode_bool(kind), None),
            Kind::Char => (Self::decode_char(kind), None),
            Kind::String => (Self::decode_string(kind), None),
            Kind::None | Kind::Void | Kind::Enum | Kind::Struct => (Value::None, None),
        }
    }

    fn decode_int(annotation: &ParserAnnotation, kind: &TokenKind) -> (Value, Option<String>) {
        let raw = match kind {
            TokenKind::IntLiteral(v) | TokenKind::HexLiteral(v) | TokenKind::BinaryLiteral(v) => {
                *v
            },
            other => unreachable!("int annotation paired with non-numeric token {:?}", other),
        };

        let bit_width = if annotation.bit_width == 0 {
            64
        } else {
            annotation.bit_width
        };

        if annotation.is_signed {
            let max: u64 = if bit_width >= 64 {
                i64::MAX as u64
            } else {
                (1u64 << (bit_width - 1)) - 1
            };
            if raw > max {
                return (
                    Value::Overflow,
                    Some(format!(
                        "integer literal {} overflows a signed {}-bit integer",
                        raw, bit_width
                    )),
                );
            }
            (Value::Int(raw as i64), None)
        } else {
            let max: u64 = if bit_width >= 64 {
                u64::MAX
            } else {
                (1u64 << bit_width) - 1
            };
            if raw > max {
                return (
                    Value::Overflow,
                    Some(format!(
                        "integer literal {} overflows an unsigned {}-bit integer",
                        raw, bit_width
                    )),
                );
            }
            (Value::Uint(raw), None)
        }
    }

    fn decode_float(kind: &TokenKind) -> (Value, Option<String>) {
        let raw = match kind {
            TokenKind::FloatLiteral(v) => *v,
            TokenKind::IntLiteral(v) => *v as f64,
            other => unreachable!("float annotation paired with non-numeric token {:?}", other),
        };

        if raw.is_infinite() {
            return (
                Value::Overflow,
                Some("floating point literal overflows f64 range".to_string()),
            );
        }
        (Value::Float(raw), None)
    }

    fn decode_bool(kind: &TokenKind) -> Value {
        match kind {
            TokenKind::BoolLiteral(b) => Value::Bool(*b),
            other => unreachable!("bool annotation paired with non-bool token {:?}", other),
        }
    }

    fn decode_char(kind: &TokenKind) -> Value {
        match kind {
            TokenKind::CharLiteral(b) => Value::Char(*b),
            other => unreachable!("char annotation paired with non-char token {:?}", other),
        }
    }

    fn decode_string(kind: &TokenKind) -> Value {
        match kind {
            TokenKind::StringLiteral(s) => Value::String(s.as_str().to_string()),
            other => unreachable!("string annotation paired with non-string token {:?}", other),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            (Value::Uint(a), Value::Uint(b)) => Ok(Value::Uint(a.wrapping_add(*b))),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => Err(Self::mismatch("add", self, other)),
        }
    }

    pub fn sub(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_sub(*b))),
            (Value::Uint(a), Value::Uint(b)) => Ok(Value::Uint(a.wrapping_sub(*b))),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
            _ => Err(Self::mismatch("sub", self, other)),
        }
    }

    pub fn mul(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(*b))),
            (Value::Uint(a), Value::Uint(b)) => Ok(Value::Uint(a.wrapping_mul(*b))),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
            _ => Err(Self::mismatch("mul", self, other)),
        }
    }

    pub fn div(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) if *b != 0 => Ok(Value::Int(a / b)),
            (Value::Uint(a), Value::Uint(b)) if *b != 0 => Ok(Value::Uint(a / b)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
            _ => Err(Self::mismatch("div", self, other)),
        }
    }

    /// Modulo is only defined for the int/uint families.
    pub fn modulo(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) if *b != 0 => Ok(Value::Int(a % b)),
            (Value::Uint(a), Value::Uint(b)) if *b != 0 => Ok(Value::Uint(a % b)),
            _ => Err(Self::mismatch("mod", self, other)),
        }
    }

    pub fn not(&self) -> Result<Value, ValueError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(ValueError::KindMismatch(format!(
                "cannot apply logical not to {:?}",
                self
            ))),
        }
    }

    pub fn equals(&self, other: &Value) -> Result<bool, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Uint(a), Value::Uint(b)) => Ok(a == b),
            (Value::Float(a), Value::Float(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Char(a), Value::Char(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            _ => Err(Self::mismatch("equals", self, other)),
        }
    }

    pub fn greater_than(&self, other: &Value) -> Result<bool, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a > b),
            (Value::Uint(a), Value::Uint(b)) => Ok(a > b),
            (Value::Float(a), Value::Float(b)) => Ok(a > b),
            (Value::Char(a), Value::Char(b)) => Ok(a > b),
            _ => Err(Self::mismatch("greater_than", self, other)),
        }
    }

    pub fn less_than(&self, other: &Value) -> Result<bool, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a < b),
            (Value::Uint(a), Value::Uint(b)) => Ok(a < b),
            (Value::Float(a), Value::Float(b)) => Ok(a < b),
            (Value::Char(a), Value::Char(b)) => Ok(a < b),
            _ => Err(Self::mismatch("less_than", self, other)),
        }
    }

    pub fn logical_and(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            _ => Err(Self::mismatch("logical_and", self, other)),
        }
    }

    pub fn logical_or(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(Self::mismatch("logical_or", self, other)),
        }
    }

    fn mismatch(op: &str, a: &Value, b: &Value) -> ValueError {
        ValueError::KindMismatch(format!("{} applied to mismatched values {:?} and {:?}", op, a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util::Symbol;

    fn annotation(kind: Kind, is_signed: bool, bit_width: u8) -> ParserAnnotation {
        ParserAnnotation::new(kind, is_signed, bit_width, 1)
    }

    #[test]
    fn test_decode_in_range_i32() {
        let a = annotation(Kind::Int, true, 32);
        let (v, diag) = Value::from_token(&a, &TokenKind::IntLiteral(42));
        assert_eq!(v, Value::Int(42));
        assert!(diag.is_none());
    }

    #[test]
    fn test_decode_u64_overflow() {
        let a = annotation(Kind::Int, false, 64);
        let (v, diag) = Value::from_token(&a, &TokenKind::HexLiteral(u64::MAX));
        assert_eq!(v, Value::Uint(u64::MAX));
        assert!(diag.is_none());
    }

    #[test]
    fn test_decode_i64_overflow_detected() {
        let a = annotation(Kind::Int, true, 64);
        let (v, diag) = Value::from_token(&a, &TokenKind::IntLiteral(u64::MAX));
        assert_eq!(v, Value::Overflow);
        assert!(diag.is_some());
    }

    #[test]
    fn test_decode_i8_narrow_overflow() {
        let a = annotation(Kind::Int, true, 8);
        let (v, _) = Value::from_token(&a, &TokenKind::IntLiteral(200));
        assert_eq!(v, Value::Overflow);
    }

    #[test]
    fn test_decode_bool_and_char_and_string() {
        let bool_annotation = annotation(Kind::Bool, false, 8);
        assert_eq!(
            Value::from_token(&bool_annotation, &TokenKind::BoolLiteral(true)).0,
            Value::Bool(true)
        );

        let char_annotation = annotation(Kind::Char, false, 8);
        assert_eq!(
            Value::from_token(&char_annotation, &TokenKind::CharLiteral(b'a')).0,
            Value::Char(b'a')
        );

        let string_annotation = annotation(Kind::String, false, 0);
        assert_eq!(
            Value::from_token(&string_annotation, &TokenKind::StringLiteral(Symbol::intern("hi"))).0,
            Value::String("hi".to_string())
        );
    }

    #[test]
    fn test_arithmetic_closed_within_kind_family() {
        assert_eq!(Value::Int(1).add(&Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(Value::Uint(5).sub(&Value::Uint(2)), Ok(Value::Uint(3)));
        assert!(Value::Int(1).add(&Value::Uint(2)).is_err());
    }

    #[test]
    fn test_modulo_only_for_int_families() {
        assert_eq!(Value::Int(7).modulo(&Value::Int(2)), Ok(Value::Int(1)));
        assert!(Value::Float(1.0).modulo(&Value::Float(2.0)).is_err());
    }

    #[test]
    fn test_logical_and_or_require_bool() {
        assert_eq!(
            Value::Bool(true).logical_and(&Value::Bool(false)),
            Ok(Value::Bool(false))
        );
        assert!(Value::Int(1).logical_and(&Value::Int(0)).is_err());
    }

    #[test]
    fn test_equality_across_primitive_kinds() {
        assert_eq!(Value::Char(b'a').equals(&Value::Char(b'a')), Ok(true));
        assert_eq!(Value::Bool(true).equals(&Value::Bool(false)), Ok(false));
    }
}
