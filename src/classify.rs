//! Declaration classifier.
//!
//! Tags a snippet with exactly one [`Shape`] and records where its root
//! artifact lives. Nothing here copies source text; every location is a span
//! into the original input, resolved later by the assembler.

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};
use serde::Serialize;

use crate::error::{Result, SynthesisError};
use crate::imports::ImportRegistry;
use crate::options::SynthesisOptions;
use crate::visitor::JsxReturnFinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    BareExpression,
    NamedComponent,
    DefaultExportComponent,
    CompleteApplication,
}

/// Body of a default-exported component, kept in the form the user wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentBody {
    /// `() => <expr>`; span covers the expression including any parentheses.
    Expression(Span),
    /// `() => { ... }` or `function () { ... }`; span covers the braces.
    Block(Span),
    /// `function Page() { ... }`, kept whole so `Page` stays bound.
    /// `declaration` is set for `export default function Page`, which also
    /// binds `Page` at module scope.
    NamedFunction {
        function: Span,
        name: Span,
        declaration: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    BareExpression {
        statement: usize,
        root: Span,
    },
    NamedComponent {
        statement: usize,
        identifier: String,
        jsx: Span,
    },
    DefaultExportComponent {
        statement: usize,
        body: ComponentBody,
        jsx: Span,
    },
    CompleteApplication {
        statement: usize,
        mount_call: Span,
    },
}

impl Classification {
    pub fn shape(&self) -> Shape {
        match self {
            Classification::BareExpression { .. } => Shape::BareExpression,
            Classification::NamedComponent { .. } => Shape::NamedComponent,
            Classification::DefaultExportComponent { .. } => Shape::DefaultExportComponent,
            Classification::CompleteApplication { .. } => Shape::CompleteApplication,
        }
    }

    /// Index of the top-level statement holding the root artifact.
    pub fn statement(&self) -> usize {
        match self {
            Classification::BareExpression { statement, .. }
            | Classification::NamedComponent { statement, .. }
            | Classification::DefaultExportComponent { statement, .. }
            | Classification::CompleteApplication { statement, .. } => *statement,
        }
    }

    /// Root JSX node; absent only for a complete application.
    pub fn root_expression(&self) -> Option<Span> {
        match self {
            Classification::BareExpression { root, .. } => Some(*root),
            Classification::NamedComponent { jsx, .. }
            | Classification::DefaultExportComponent { jsx, .. } => Some(*jsx),
            Classification::CompleteApplication { .. } => None,
        }
    }

    pub fn component_identifier(&self) -> Option<&str> {
        match self {
            Classification::NamedComponent { identifier, .. } => Some(identifier),
            _ => None,
        }
    }

    pub fn existing_mount_call(&self) -> Option<Span> {
        match self {
            Classification::CompleteApplication { mount_call, .. } => Some(*mount_call),
            _ => None,
        }
    }
}

/// Classify the top-level statements of `program`.
///
/// Mount calls are searched across the whole program first, since a complete
/// application usually declares its components before mounting them. Among
/// the remaining rules the first qualifying statement wins.
pub fn classify(
    program: &Program<'_>,
    registry: &ImportRegistry,
    options: &SynthesisOptions,
) -> Result<Classification> {
    let mounts: Vec<(usize, Span)> = program
        .body
        .iter()
        .enumerate()
        .filter_map(|(i, stmt)| mount_call(stmt, registry, options).map(|span| (i, span)))
        .collect();

    if mounts.len() > 1 {
        return Err(SynthesisError::AmbiguousMountCapability { count: mounts.len() });
    }
    if let Some(&(statement, mount_call)) = mounts.first() {
        tracing::debug!(statement, "classified as complete application");
        return Ok(Classification::CompleteApplication {
            statement,
            mount_call,
        });
    }

    for (statement, stmt) in program.body.iter().enumerate() {
        if registry.owns_statement(statement) {
            continue;
        }
        if let Some(classification) = classify_statement(statement, stmt) {
            tracing::debug!(statement, shape = ?classification.shape(), "classified snippet");
            return Ok(classification);
        }
    }

    Err(SynthesisError::unsupported(
        "expected a JSX expression, a component declaration, a default-exported component or a mount call",
    ))
}

fn classify_statement(statement: usize, stmt: &Statement<'_>) -> Option<Classification> {
    match stmt {
        Statement::ExportDefaultDeclaration(decl) => {
            let (body, jsx) = match &decl.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    function_component(func, true)?
                }
                kind => expression_component(kind.as_expression()?)?,
            };
            Some(Classification::DefaultExportComponent {
                statement,
                body,
                jsx,
            })
        }

        Statement::VariableDeclaration(decl) => {
            decl.declarations.iter().find_map(|declarator| {
                let BindingPattern::BindingIdentifier(id) = &declarator.id else {
                    return None;
                };
                let (_, jsx) = expression_component(declarator.init.as_ref()?)?;
                Some(Classification::NamedComponent {
                    statement,
                    identifier: id.name.to_string(),
                    jsx,
                })
            })
        }

        Statement::FunctionDeclaration(func) => {
            let id = func.id.as_ref()?;
            let (_, jsx) = function_component(func, true)?;
            Some(Classification::NamedComponent {
                statement,
                identifier: id.name.to_string(),
                jsx,
            })
        }

        Statement::ExpressionStatement(expr_stmt) => {
            let inner = expr_stmt.expression.without_parentheses();
            inner.is_jsx().then(|| Classification::BareExpression {
                statement,
                root: inner.span(),
            })
        }

        _ => None,
    }
}

/// A parameterless, synchronous arrow or function expression that evaluates to
/// or returns JSX.
fn expression_component(expr: &Expression<'_>) -> Option<(ComponentBody, Span)> {
    match expr.without_parentheses() {
        Expression::ArrowFunctionExpression(arrow) => {
            if arrow.r#async || arrow.params.parameters_count() > 0 {
                return None;
            }
            match arrow.get_expression() {
                Some(body) => {
                    let inner = body.without_parentheses();
                    inner
                        .is_jsx()
                        .then(|| (ComponentBody::Expression(body.span()), inner.span()))
                }
                None => JsxReturnFinder::find(&arrow.body)
                    .map(|jsx| (ComponentBody::Block(arrow.body.span), jsx)),
            }
        }
        Expression::FunctionExpression(func) => function_component(func, false),
        _ => None,
    }
}

fn function_component(func: &Function<'_>, declaration: bool) -> Option<(ComponentBody, Span)> {
    if func.r#async || func.generator || func.params.parameters_count() > 0 {
        return None;
    }
    let body = func.body.as_ref()?;
    let jsx = JsxReturnFinder::find(body)?;
    let shape = match &func.id {
        Some(id) => ComponentBody::NamedFunction {
            function: func.span,
            name: id.span,
            declaration,
        },
        None => ComponentBody::Block(body.span),
    };
    Some((shape, jsx))
}

/// `X.render(<jsx>, ...)` or `render(<jsx>, ...)` where the callee is bound to
/// the DOM module. An unbound `X` equal to the configured DOM local also
/// counts; the binding is injected later.
fn mount_call(
    stmt: &Statement<'_>,
    registry: &ImportRegistry,
    options: &SynthesisOptions,
) -> Option<Span> {
    let Statement::ExpressionStatement(expr_stmt) = stmt else {
        return None;
    };
    let Expression::CallExpression(call) = expr_stmt.expression.without_parentheses() else {
        return None;
    };

    let bound = match call.callee.without_parentheses() {
        Expression::StaticMemberExpression(member) => {
            let Expression::Identifier(object) = &member.object else {
                return None;
            };
            member.property.name == options.mount_method.as_str()
                && (registry.is_mount_object(&object.name, options)
                    || (object.name == options.dom.local.as_str()
                        && !registry.binds(&object.name)))
        }
        Expression::Identifier(callee) => registry.is_mount_function(&callee.name, options),
        _ => false,
    };
    if !bound {
        return None;
    }

    let first = call.arguments.first()?.as_expression()?;
    first
        .without_parentheses()
        .is_jsx()
        .then_some(call.span)
}
