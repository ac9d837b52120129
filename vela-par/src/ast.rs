//! `AstNode`: the uniform, ternary-child AST the parser builds.
//!
//! Every node shares the same shape -- a kind, the token it comes from, an
//! annotation, a folded value, and three optionally-occupied child slots
//! named `left`/`right`/`middle` by convention. Which slots a given kind
//! actually uses is documented on each `NodeKind` variant. Nodes are
//! arena-allocated: the tree owns nothing past the arena's lifetime, and
//! child links are plain borrows into it.

use bumpalo::Bump;
use vela_lex::Token;

use crate::annotation::ParserAnnotation;
use crate::value::Value;

/// The closed set of AST node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of the tree. `right` holds the first `Chain` link.
    Start,
    /// One link of a statement spine. `left` holds the statement (or is
    /// `None` for the single null-null tail that terminates the spine);
    /// `right` holds the next `Chain` link.
    Chain,
    /// A single statement wrapper. `left` holds the statement expression.
    Statement,
    /// A variable declaration. Carries its own token/annotation; no
    /// children.
    Declaration,
    /// A name reference. `token` carries the identifier; no children.
    Identifier,
    /// A reference to an enum member. No children.
    EnumIdentifier,
    /// `left` is the subscripted identifier, `right` the index expression.
    ArraySubscript,
    /// `left` the condition, `middle` the then-block, `right` the
    /// else-branch (another `If`, a block, or `None`).
    If,
    /// `left` the condition, `right` the body block.
    While,
    Break,
    Continue,
    /// `left` holds the returned expression, or `None` for a bare `return;`.
    Return,
    /// `left` the parameter chain, `middle` the return-type node, `right`
    /// the function body (or `None` for a bodiless declaration).
    Function,
    FunctionReturnType,
    /// One function parameter. `left` the identifier node for the param.
    FunctionParam,
    /// `left` the first statement chain of the body.
    FunctionBody,
    /// `left` the callee identifier, `right` the argument chain.
    FunctionCall,
    /// One call argument. `left` the argument expression.
    FunctionArgument,
    /// A literal value. Carries `value` directly; no children.
    Literal,
    /// `left` the assigned-to identifier, `right` the value expression.
    Assignment,
    /// `left` the operand.
    UnaryOp,
    /// `left` and `right` the two operands.
    BinaryOp,
    /// Compound assignment (`+=` and friends). `left` the target, `right`
    /// the value expression.
    TerseAssignment,
    PrefixIncrement,
    PrefixDecrement,
    PostfixIncrement,
    PostfixDecrement,
}

/// A single AST node. `left`/`right`/`middle` are borrows into the same
/// arena the node itself was allocated from.
#[derive(Debug, Clone)]
pub struct AstNode<'a> {
    pub kind: NodeKind,
    pub token: Token,
    pub annotation: ParserAnnotation,
    pub value: Value,
    pub left: Option<&'a AstNode<'a>>,
    pub right: Option<&'a AstNode<'a>>,
    pub middle: Option<&'a AstNode<'a>>,
}

impl<'a> AstNode<'a> {
    pub fn line(&self) -> u32 {
        self.token.line
    }

    /// The declared arity (number of occupied child slots a well-formed
    /// node of this kind uses), per the invariant that each kind pins
    /// which slots it uses.
    pub fn arity(&self) -> u8 {
        match self.kind {
            NodeKind::Start
            | NodeKind::Identifier
            | NodeKind::EnumIdentifier
            | NodeKind::Literal
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::Declaration
            | NodeKind::FunctionReturnType => 0,
            NodeKind::Chain
            | NodeKind::Statement
            | NodeKind::Return
            | NodeKind::UnaryOp
            | NodeKind::FunctionBody
            | NodeKind::FunctionParam
            | NodeKind::FunctionArgument
            | NodeKind::PrefixIncrement
            | NodeKind::PrefixDecrement
            | NodeKind::PostfixIncrement
            | NodeKind::PostfixDecrement => 1,
            NodeKind::ArraySubscript
            | NodeKind::While
            | NodeKind::Assignment
            | NodeKind::BinaryOp
            | NodeKind::TerseAssignment
            | NodeKind::FunctionCall => 2,
            NodeKind::If | NodeKind::Function => 3,
        }
    }
}

/// The arena an entire parse allocates its `AstNode`s from.
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    fn alloc<'a>(&'a self, node: AstNode<'a>) -> &'a AstNode<'a> {
        self.bump.alloc(node)
    }

    pub fn leaf<'a>(&'a self, kind: NodeKind, token: Token, annotation: ParserAnnotation, value: Value) -> &'a AstNode<'a> {
        self.alloc(AstNode {
            kind,
            token,
            annotation,
            value,
            left: None,
            right: None,
            middle: None,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn node<'a>(
        &'a self,
        kind: NodeKind,
        token: Token,
        annotation: ParserAnnotation,
        left: Option<&'a AstNode<'a>>,
        right: Option<&'a AstNode<'a>>,
        middle: Option<&'a AstNode<'a>>,
    ) -> &'a AstNode<'a> {
        self.alloc(AstNode {
            kind,
            token,
            annotation,
            value: Value::None,
            left,
            right,
            middle,
        })
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Kind;
    use vela_lex::TokenKind;

    fn tok(kind: TokenKind, line: u32) -> Token {
        Token::new(kind, line, 1)
    }

    #[test]
    fn test_leaf_node_has_no_children() {
        let arena = AstArena::new();
        let node = arena.leaf(NodeKind::Literal, tok(TokenKind::IntLiteral(1), 1), ParserAnnotation::none(), Value::Int(1));
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert!(node.middle.is_none());
        assert_eq!(node.arity(), 0);
    }

    #[test]
    fn test_binary_op_node_wires_left_and_right() {
        let arena = AstArena::new();
        let lhs = arena.leaf(NodeKind::Literal, tok(TokenKind::IntLiteral(1), 1), ParserAnnotation::none(), Value::Int(1));
        let rhs = arena.leaf(NodeKind::Literal, tok(TokenKind::IntLiteral(2), 1), ParserAnnotation::none(), Value::Int(2));
        let op = arena.node(
            NodeKind::BinaryOp,
            tok(TokenKind::Plus, 1),
            ParserAnnotation::new(Kind::Int, true, 32, 1),
            Some(lhs),
            Some(rhs),
            None,
        );
        assert_eq!(op.arity(), 2);
        assert!(op.left.is_some());
        assert!(op.right.is_some());
        assert!(op.middle.is_none());
    }

    #[test]
    fn test_if_node_uses_all_three_slots() {
        let arena = AstArena::new();
        let cond = arena.leaf(NodeKind::Literal, tok(TokenKind::BoolLiteral(true), 1), ParserAnnotation::none(), Value::Bool(true));
        let then_block = arena.leaf(NodeKind::FunctionBody, tok(TokenKind::LBrace, 1), ParserAnnotation::none(), Value::None);
        let else_block = arena.leaf(NodeKind::FunctionBody, tok(TokenKind::LBrace, 1), ParserAnnotation::none(), Value::None);
        let if_node = arena.node(NodeKind::If, tok(TokenKind::If, 1), ParserAnnotation::none(), Some(cond), Some(else_block), Some(then_block));
        assert_eq!(if_node.arity(), 3);
    }

    #[test]
    fn test_chain_tail_is_null_null() {
        let arena = AstArena::new();
        let tail = arena.node(NodeKind::Chain, tok(TokenKind::Eof, 0), ParserAnnotation::none(), None, None, None);
        assert!(tail.left.is_none());
        assert!(tail.right.is_none());
    }
}
