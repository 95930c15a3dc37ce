use std::collections::BTreeSet;

use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::scope::ScopeFlags;

/// Finds the first `return <jsx>` of a function body.
///
/// Rules:
/// 1. Only returns belonging to the visited body count.
/// 2. Nested functions, arrows and classes are pruned: their returns belong to
///    someone else.
/// 3. Parentheses around the returned JSX are ignored; the recorded span is the
///    JSX node itself.
#[derive(Debug, Default)]
pub struct JsxReturnFinder {
    found: Option<Span>,
}

impl JsxReturnFinder {
    pub fn find(body: &FunctionBody<'_>) -> Option<Span> {
        let mut finder = Self::default();
        finder.visit_function_body(body);
        finder.found
    }
}

impl<'a> Visit<'a> for JsxReturnFinder {
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        if self.found.is_none() {
            walk::walk_statement(self, stmt);
        }
    }

    fn visit_return_statement(&mut self, stmt: &ReturnStatement<'a>) {
        if let Some(argument) = &stmt.argument {
            let inner = argument.without_parentheses();
            if inner.is_jsx() {
                self.found = Some(inner.span());
            }
        }
    }

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {
        // pruned
    }

    fn visit_arrow_function_expression(&mut self, _arrow: &ArrowFunctionExpression<'a>) {
        // pruned
    }

    fn visit_class(&mut self, _class: &Class<'a>) {
        // pruned
    }
}

/// Collects every name a program declares at module scope: import locals,
/// variable bindings (destructuring included), and function and class ids.
#[derive(Debug, Default)]
pub struct TopLevelNames {
    names: BTreeSet<String>,
}

impl TopLevelNames {
    pub fn collect(program: &Program<'_>) -> BTreeSet<String> {
        let mut collector = Self::default();
        for stmt in &program.body {
            collector.collect_statement(stmt);
        }
        collector.names
    }

    fn collect_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                for specifier in decl.specifiers.iter().flatten() {
                    self.names.insert(specifier.local().name.to_string());
                }
            }
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(declaration) = &decl.declaration {
                    self.collect_declaration(declaration);
                }
            }
            Statement::ExportDefaultDeclaration(decl) => match &decl.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => self.collect_id(&func.id),
                ExportDefaultDeclarationKind::ClassDeclaration(class) => self.collect_id(&class.id),
                _ => {}
            },
            _ => {
                if let Some(declaration) = stmt.as_declaration() {
                    self.collect_declaration(declaration);
                }
            }
        }
    }

    fn collect_declaration(&mut self, declaration: &Declaration<'_>) {
        match declaration {
            Declaration::VariableDeclaration(decl) => {
                for declarator in &decl.declarations {
                    self.visit_binding_pattern(&declarator.id);
                }
            }
            Declaration::FunctionDeclaration(func) => self.collect_id(&func.id),
            Declaration::ClassDeclaration(class) => self.collect_id(&class.id),
            _ => {}
        }
    }

    fn collect_id(&mut self, id: &Option<BindingIdentifier<'_>>) {
        if let Some(id) = id {
            self.names.insert(id.name.to_string());
        }
    }
}

impl<'a> Visit<'a> for TopLevelNames {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.names.insert(ident.name.to_string());
    }

    fn visit_expression(&mut self, _expr: &Expression<'a>) {
        // defaults and computed keys bind nothing at module scope
    }
}
