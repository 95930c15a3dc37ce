//! Code assembler.
//!
//! Output layout, sections separated by a blank line:
//!
//! ```text
//! <directives>
//! <import records, canonical order>
//! <supporting statements, root artifact in place>
//! <synthesized mount statement>
//! ```
//!
//! User text is sliced from the input by span and never reformatted.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::classify::{Classification, ComponentBody};
use crate::imports::{slice, terminate, ImportRegistry};
use crate::options::SynthesisOptions;
use crate::resolve::{Resolution, WrapperBody, WrapperComponent};

pub fn assemble(
    program: &Program<'_>,
    registry: &ImportRegistry,
    classification: &Classification,
    resolution: &Resolution,
    options: &SynthesisOptions,
) -> String {
    check_consistency(classification, resolution);

    let source = program.source_text;
    let mut sections: Vec<String> = Vec::new();

    let mut preamble: Vec<String> = Vec::new();
    if let Some(hashbang) = &program.hashbang {
        preamble.push(slice(source, hashbang.span).to_string());
    }
    preamble.extend(
        program
            .directives
            .iter()
            .map(|directive| terminate(slice(source, directive.span))),
    );
    if !preamble.is_empty() {
        sections.push(preamble.join("\n"));
    }

    let imports: Vec<String> = registry
        .ordered(options)
        .iter()
        .map(|record| record.to_source())
        .collect();
    if !imports.is_empty() {
        sections.push(imports.join("\n"));
    }

    let root_statement = classification.statement();
    for (index, stmt) in program.body.iter().enumerate() {
        if registry.owns_statement(index) {
            continue;
        }
        if index == root_statement {
            match &resolution.wrapper {
                Some(wrapper) => sections.push(render_wrapper(wrapper, source, registry, options)),
                None => sections.push(statement_source(stmt, source)),
            }
            continue;
        }
        sections.push(statement_source(stmt, source));
    }

    if let Some(target) = &resolution.mount_target {
        sections.push(render_mount(target, registry, options));
    }

    let mut output = sections.join("\n\n");
    output.push('\n');
    tracing::debug!(bytes = output.len(), sections = sections.len(), "assembled application");
    output
}

/// The resolver and the classifier must agree on who provides the mount.
fn check_consistency(classification: &Classification, resolution: &Resolution) {
    match classification {
        Classification::CompleteApplication { .. } => assert!(
            resolution.mount_target.is_none() && resolution.wrapper.is_none(),
            "complete application must not synthesize a mount: {:?}",
            resolution
        ),
        Classification::NamedComponent { identifier, .. } => assert!(
            resolution.wrapper.is_none()
                && resolution.mount_target.as_deref() == Some(identifier.as_str()),
            "named component must be mounted as written: {:?}",
            resolution
        ),
        Classification::BareExpression { .. } | Classification::DefaultExportComponent { .. } => {
            let consistent = match &resolution.wrapper {
                Some(wrapper) => resolution.mount_target.as_deref() == Some(wrapper.name.as_str()),
                None => false,
            };
            assert!(
                consistent,
                "synthesized wrapper missing or not mounted: {:?}",
                resolution
            );
        }
    }
}

fn statement_source(stmt: &Statement<'_>, source: &str) -> String {
    let text = slice(source, stmt.span());
    let needs_terminator = match stmt {
        Statement::VariableDeclaration(_) | Statement::ExpressionStatement(_) => true,
        Statement::ExportNamedDeclaration(decl) => matches!(
            decl.declaration,
            None | Some(Declaration::VariableDeclaration(_))
        ),
        Statement::ExportDefaultDeclaration(decl) => decl.declaration.as_expression().is_some(),
        _ => false,
    };
    if needs_terminator {
        terminate(text)
    } else {
        text.to_string()
    }
}

fn render_wrapper(
    wrapper: &WrapperComponent,
    source: &str,
    registry: &ImportRegistry,
    options: &SynthesisOptions,
) -> String {
    match wrapper.body {
        WrapperBody::Fragment { root } => {
            let Some(framework) = registry.framework_local(options) else {
                unreachable!("framework binding must be ensured before assembly");
            };
            format!(
                "const {name} = () => (\n  <{fw}.Fragment>\n    {jsx}\n  </{fw}.Fragment>\n);",
                name = wrapper.name,
                fw = framework,
                jsx = slice(source, root),
            )
        }
        WrapperBody::Component(ComponentBody::Expression(span))
        | WrapperBody::Component(ComponentBody::Block(span)) => {
            format!("const {} = () => {};", wrapper.name, slice(source, span))
        }
        WrapperBody::Component(ComponentBody::NamedFunction {
            function,
            name,
            declaration: true,
        }) => format!(
            "{}\n\nconst {} = {};",
            slice(source, function),
            wrapper.name,
            slice(source, name)
        ),
        WrapperBody::Component(ComponentBody::NamedFunction { function, .. }) => {
            format!("const {} = {};", wrapper.name, slice(source, function))
        }
    }
}

fn render_mount(target: &str, registry: &ImportRegistry, options: &SynthesisOptions) -> String {
    let Some(capability) = registry.mount_capability(options) else {
        unreachable!("mount capability must be ensured before assembly");
    };
    format!(
        "{}(<{} />, {}(\"{}\"));",
        capability.callee(&options.mount_method),
        target,
        options.host_lookup,
        options
            .root_element_id
            .replace('\\', "\\\\")
            .replace('"', "\\\""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::parse::parse_program;
    use crate::resolve::resolve;
    use oxc_allocator::Allocator;
    use oxc_span::Span;

    fn run(source: &str, options: &SynthesisOptions) -> String {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source).unwrap();
        let registry = ImportRegistry::collect(&program, source);
        let classification = classify(&program, &registry, options).unwrap();
        let registry = registry.ensure(options);
        let resolution = resolve(&classification, options, registry.declared_names());
        assemble(&program, &registry, &classification, &resolution, options)
    }

    #[test]
    fn test_supporting_statements_stay_in_order() {
        let output = run(
            "import Dep from 'dep'\nconst title = 'Hi'\nfunction helper() { return title; }\n<Dep title={helper()} />",
            &SynthesisOptions::default(),
        );
        pretty_assertions::assert_eq!(
            output,
            "import ReactDOM from 'react-dom';\nimport React from 'react';\nimport Dep from 'dep';\n\n\
             const title = 'Hi';\n\n\
             function helper() { return title; }\n\n\
             const App = () => (\n  <React.Fragment>\n    <Dep title={helper()} />\n  </React.Fragment>\n);\n\n\
             ReactDOM.render(<App />, document.getElementById(\"root\"));\n"
        );
    }

    #[test]
    fn test_directives_lead() {
        let output = run("'use strict';\n<p />", &SynthesisOptions::default());
        assert!(output.starts_with("'use strict';\n\nimport ReactDOM"));
    }

    #[test]
    fn test_fragment_follows_framework_local() {
        let output = run("import * as R from 'react';\n<p />", &SynthesisOptions::default());
        assert!(output.contains("<R.Fragment>"));
        assert!(!output.contains("import React from"));
    }

    #[test]
    fn test_custom_options_shape_the_mount() {
        let options = SynthesisOptions {
            wrapper_name: "Main".to_string(),
            root_element_id: "app".to_string(),
            host_lookup: "document.querySelector".to_string(),
            ..SynthesisOptions::default()
        };
        let output = run("<p />", &options);
        assert!(output.ends_with("ReactDOM.render(<Main />, document.querySelector(\"app\"));\n"));
    }

    #[test]
    #[should_panic(expected = "named component must be mounted as written")]
    fn test_inconsistent_resolution_panics() {
        let classification = Classification::NamedComponent {
            statement: 0,
            identifier: "Counter".to_string(),
            jsx: Span::new(0, 1),
        };
        check_consistency(
            &classification,
            &Resolution {
                mount_target: None,
                wrapper: None,
            },
        );
    }
}
