//! Subcommand handlers for the `velac` binary.

pub mod ast;
pub mod check;

use std::path::Path;

use vela_par::AstNode;
use vela_util::diagnostic::{Diagnostic, Level};
use vela_util::Span;

use crate::error::{Result, VelacError};

/// Reads `path` as UTF-8 source text, wrapping any I/O failure in a
/// driver-level error distinct from a source diagnostic.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| VelacError::ReadSource {
        path: path.display().to_string(),
        source,
    })
}

/// Checks `source` for non-ASCII bytes, returning an error diagnostic
/// pointing at the first one found. Used when `Config::ascii_only` is set,
/// ahead of lexing.
pub fn check_ascii(source: &str) -> Option<Diagnostic> {
    let mut line = 1u32;
    let mut column = 1u32;
    for (offset, byte) in source.bytes().enumerate() {
        if !byte.is_ascii() {
            let span = Span::new(offset, offset + 1, line, column);
            return Some(Diagnostic::error("non-ASCII byte in source file", span));
        }
        if byte == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    None
}

/// Sorts diagnostics by source position, then, if `stop_at_first_error` is
/// set, truncates the list to everything up to and including the first
/// error (later diagnostics are suppressed rather than re-running the
/// lexer/parser with an early abort).
pub fn select_diagnostics(mut diagnostics: Vec<Diagnostic>, stop_at_first_error: bool) -> Vec<Diagnostic> {
    diagnostics.sort_by_key(|d| (d.span.line, d.span.column));
    if stop_at_first_error {
        if let Some(idx) = diagnostics.iter().position(|d| d.level == Level::Error) {
            diagnostics.truncate(idx + 1);
        }
    }
    diagnostics
}

/// Prints every collected diagnostic to stderr as
/// `file:line:col: level: message`, in the order given.
pub fn print_diagnostics(path: &Path, diagnostics: Vec<Diagnostic>) {
    for diag in &diagnostics {
        eprintln!(
            "{}:{}:{}: {}: {}",
            path.display(),
            diag.span.line,
            diag.span.column,
            diag.level,
            diag.message
        );
        for note in &diag.notes {
            eprintln!("  note: {}", note);
        }
        for help in &diag.helps {
            eprintln!("  help: {}", help);
        }
    }
}

/// `0` if no diagnostic reached `Level::Error`, else `1`.
pub fn exit_code_for(diagnostics: &[Diagnostic]) -> i32 {
    if diagnostics.iter().any(|d| d.level == Level::Error) {
        1
    } else {
        0
    }
}

/// Pretty-prints an AST node tree to stdout, one node per line, indented by
/// depth.
pub fn print_ast(node: &AstNode<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{}{:?} line={} value={:?}",
        indent,
        node.kind,
        node.line(),
        node.value
    );
    if let Some(left) = node.left {
        print_ast(left, depth + 1);
    }
    if let Some(middle) = node.middle {
        print_ast(middle, depth + 1);
    }
    if let Some(right) = node.right {
        print_ast(right, depth + 1);
    }
}
