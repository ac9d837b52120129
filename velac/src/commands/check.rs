//! `velac check <FILE>`: lex + parse, report diagnostics, no AST output.

use std::path::Path;

use tracing::info;
use vela_par::AstArena;
use vela_util::diagnostic::Handler;

use crate::config::{Config, OutputMode};
use crate::error::Result;

pub fn run(file: &Path, config: &Config) -> Result<i32> {
    let source = super::read_source(file)?;
    info!(file = %file.display(), "checking source file");

    if config.ascii_only {
        if let Some(diag) = super::check_ascii(&source) {
            let code = super::exit_code_for(std::slice::from_ref(&diag));
            super::print_diagnostics(file, vec![diag]);
            return Ok(code);
        }
    }

    let mut handler = Handler::new();
    let arena = AstArena::new();
    let root = vela_par::parse(&source, &arena, &mut handler);

    let diagnostics = super::select_diagnostics(handler.diagnostics(), config.stop_at_first_error);
    let code = super::exit_code_for(&diagnostics);

    if code == 0 && config.output_mode == OutputMode::Ast {
        super::print_ast(root, 0);
    }

    super::print_diagnostics(file, diagnostics);
    Ok(code)
}
