//! # JSX Snippet Synthesizer
//!
//! Turns a fragment of JSX-flavoured source into a complete single-file React
//! application: normalized imports, a root component and a DOM mount call.
//!
//! ## Pipeline
//!
//! 1. **Ingestion**: `oxc` parses the snippet as a JSX module.
//! 2. **Imports**: every top-level `import` / `require` becomes an
//!    [`ImportRecord`], keeping the user's declaration style.
//! 3. **Classification**: the snippet is exactly one [`Shape`]: a bare
//!    expression, a named component, a default-exported component or a
//!    complete application.
//! 4. **Capabilities**: the framework root and DOM mount bindings are ensured;
//!    missing ones are injected as ES default imports.
//! 5. **Resolution**: the mounted component is either the user's own or a
//!    synthesized `App` wrapper.
//! 6. **Assembly**: imports (DOM mount first, framework second, the rest in
//!    source order), the remaining statements, then the mount call.
//!
//! ```
//! use jsx_snippet_synth::ReactParser;
//!
//! let parser = ReactParser::new("<h1>Hello World!</h1>").unwrap();
//! assert!(parser.code().starts_with("import ReactDOM from 'react-dom';"));
//! assert!(parser.code().ends_with("ReactDOM.render(<App />, document.getElementById(\"root\"));\n"));
//! ```
//!
//! Every call builds its own arena and registry; nothing is shared between
//! invocations, so parsers may run on any number of threads (see [`batch`]).

use oxc_allocator::Allocator;
use serde::Serialize;

mod assemble;
mod classify;
mod error;
mod imports;
mod options;
mod parse;
mod resolve;
mod visitor;

pub mod batch;

#[cfg(feature = "napi")]
mod binding;


pub use classify::{Classification, ComponentBody, Shape};
pub use error::{
    Result, SynthesisError, ERR_AMBIGUOUS_MOUNT, ERR_INVALID_OPTIONS, ERR_PARSE,
    ERR_UNSUPPORTED_SHAPE,
};
pub use imports::{
    BindingKind, DeclarationStyle, ImportRecord, ImportRegistry, MountCapability, NamedBinding,
};
pub use options::{ModuleBinding, SynthesisOptions};

#[cfg(feature = "napi")]
pub use binding::{synthesize_app_native, synthesize_report_native};

/// A synthesized application. Built once from one input; read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactParser {
    code: String,
    shape: Shape,
    imports: Vec<ImportRecord>,
}

/// Serializable view of a [`ReactParser`] for tooling.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisReport<'p> {
    pub code: &'p str,
    pub shape: Shape,
    pub imports: &'p [ImportRecord],
}

impl ReactParser {
    pub fn new(code: &str) -> Result<Self> {
        Self::with_options(code, SynthesisOptions::default())
    }

    pub fn with_options(code: &str, options: SynthesisOptions) -> Result<Self> {
        options.validate()?;

        let allocator = Allocator::default();
        let program = parse::parse_program(&allocator, code)?;

        let registry = ImportRegistry::collect(&program, code);
        let classification = classify::classify(&program, &registry, &options)?;
        let registry = registry.ensure(&options);
        let resolution = resolve::resolve(&classification, &options, registry.declared_names());
        let output = assemble::assemble(&program, &registry, &classification, &resolution, &options);

        Ok(Self {
            code: output,
            shape: classification.shape(),
            imports: registry.ordered(&options).into_iter().cloned().collect(),
        })
    }

    /// The assembled application source.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Import records in emission order.
    pub fn imports(&self) -> &[ImportRecord] {
        &self.imports
    }

    pub fn report(&self) -> SynthesisReport<'_> {
        SynthesisReport {
            code: &self.code,
            shape: self.shape,
            imports: &self.imports,
        }
    }

    pub fn into_code(self) -> String {
        self.code
    }
}

/// Functional form of [`ReactParser::with_options`].
pub fn synthesize(code: &str, options: &SynthesisOptions) -> Result<String> {
    ReactParser::with_options(code, options.clone()).map(ReactParser::into_code)
}
