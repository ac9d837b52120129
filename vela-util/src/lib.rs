//! vela-util - shared foundation types for the Vela compiler front-end.
//!
//! This crate has no knowledge of Vela's grammar. It provides the handful
//! of cross-cutting types every later phase needs: interned identifiers
//! ([`symbol`]), source locations ([`span`]), diagnostics
//! ([`diagnostic`]), typed-index collections ([`index_vec`]), and
//! [`DefId`] — a process-wide handle for declarations.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
