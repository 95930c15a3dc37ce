//! Syntax ingestion.
//!
//! Snippets are parsed as JSX-enabled ES modules. CommonJS `require` calls
//! are ordinary call expressions in that grammar, so mixed-style inputs need
//! no special handling here.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{line_column, Result, SynthesisError};

pub fn snippet_source_type() -> SourceType {
    SourceType::default().with_module(true).with_jsx(true)
}

/// Parse `source` into a program allocated in `allocator`.
///
/// The first diagnostic is reported; recovered-from syntax errors still fail
/// the parse.
pub fn parse_program<'a>(allocator: &'a Allocator, source: &'a str) -> Result<Program<'a>> {
    let ret = Parser::new(allocator, source, snippet_source_type()).parse();

    if let Some(diagnostic) = ret.errors.first() {
        let offset = diagnostic
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset())
            .unwrap_or(0);
        let (line, column) = line_column(source, offset);
        return Err(SynthesisError::Parse {
            message: diagnostic.to_string(),
            line,
            column,
        });
    }

    if ret.panicked {
        return Err(SynthesisError::Parse {
            message: "parser aborted".to_string(),
            line: 1,
            column: 1,
        });
    }

    Ok(ret.program)
}
