//! Parses Vela source into a ternary-child AST, tracking declaration and
//! scope state as it goes.

pub mod annotation;
pub mod ast;
pub mod parser;
pub mod scope;
pub mod symbol;
pub mod value;

pub use annotation::{Kind, ParserAnnotation};
pub use ast::{AstArena, AstNode, NodeKind};
pub use parser::{parse, Parser};
pub use scope::ScopeStack;
pub use symbol::{Binding, DeclState, SymbolTable};
pub use value::{Value, ValueError};
