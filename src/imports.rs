//! Import registry.
//!
//! Every top-level `import` declaration and every top-level `require` binding
//! becomes one [`ImportRecord`]. The registry then guarantees the two bindings
//! a mounted React tree needs (framework root and DOM mount) without ever
//! restyling what the user already wrote.

use std::collections::BTreeSet;

use oxc_ast::ast::*;
use oxc_span::GetSpan;
use serde::Serialize;

use crate::options::{is_identifier, ModuleBinding, SynthesisOptions};
use crate::visitor::TopLevelNames;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationStyle {
    /// `import x from 'm'`
    EsModule,
    /// `const x = require('m')`
    CommonJs,
}

/// `imported as local`. A default import is `{ imported: "default", local }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedBinding {
    pub imported: String,
    pub local: String,
}

impl NamedBinding {
    pub fn new(imported: &str, local: &str) -> Self {
        Self {
            imported: imported.to_string(),
            local: local.to_string(),
        }
    }

    fn is_default(&self) -> bool {
        self.imported == "default"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BindingKind {
    SideEffectOnly,
    Default { local: String },
    Namespace { local: String },
    /// Named list; an ES default clause next to named imports is kept as a
    /// `default` entry.
    Named { bindings: Vec<NamedBinding> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub module_path: String,
    pub binding: BindingKind,
    pub style: DeclarationStyle,
    pub local_identifiers: BTreeSet<String>,
    /// Original declaration text; `None` for injected or merged records.
    #[serde(skip)]
    verbatim: Option<String>,
}

impl ImportRecord {
    pub fn new(module_path: &str, binding: BindingKind, style: DeclarationStyle) -> Self {
        let local_identifiers = locals_of(&binding);
        Self {
            module_path: module_path.to_string(),
            binding,
            style,
            local_identifiers,
            verbatim: None,
        }
    }

    fn from_source(
        module_path: &str,
        binding: BindingKind,
        style: DeclarationStyle,
        text: &str,
    ) -> Self {
        let mut record = Self::new(module_path, binding, style);
        record.verbatim = Some(text.to_string());
        record
    }

    /// True when the record was written by the user and is emitted untouched.
    pub fn is_verbatim(&self) -> bool {
        self.verbatim.is_some()
    }

    pub fn default_local(&self) -> Option<&str> {
        match &self.binding {
            BindingKind::Default { local } => Some(local),
            BindingKind::Named { bindings } => bindings
                .iter()
                .find(|b| b.is_default())
                .map(|b| b.local.as_str()),
            _ => None,
        }
    }

    pub fn namespace_local(&self) -> Option<&str> {
        match &self.binding {
            BindingKind::Namespace { local } => Some(local),
            _ => None,
        }
    }

    /// Local bound to the whole module object: a default or namespace import,
    /// or the value of a plain `require`.
    pub fn module_object_local(&self) -> Option<&str> {
        self.default_local().or_else(|| self.namespace_local())
    }

    pub fn named_local(&self, imported: &str) -> Option<&str> {
        match &self.binding {
            BindingKind::Named { bindings } => bindings
                .iter()
                .find(|b| b.imported == imported)
                .map(|b| b.local.as_str()),
            _ => None,
        }
    }

    /// Source text for this record: the user's declaration when it is
    /// untouched, otherwise the canonical rendering.
    pub fn to_source(&self) -> String {
        match &self.verbatim {
            Some(text) => terminate(text),
            None => self.render(),
        }
    }

    /// Canonical declaration in this record's style.
    pub fn render(&self) -> String {
        let module = quote_module(&self.module_path);
        match self.style {
            DeclarationStyle::EsModule => match &self.binding {
                BindingKind::SideEffectOnly => format!("import {};", module),
                BindingKind::Default { local } => format!("import {} from {};", local, module),
                BindingKind::Namespace { local } => {
                    format!("import * as {} from {};", local, module)
                }
                BindingKind::Named { bindings } => {
                    let default_clause = bindings.iter().position(|b| b.is_default());
                    let specifiers: Vec<String> = bindings
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| Some(*i) != default_clause)
                        .map(|(_, b)| render_es_specifier(b))
                        .collect();

                    let mut clause = String::new();
                    if let Some(i) = default_clause {
                        clause.push_str(&bindings[i].local);
                    }
                    if !specifiers.is_empty() || default_clause.is_none() {
                        if !clause.is_empty() {
                            clause.push_str(", ");
                        }
                        if specifiers.is_empty() {
                            clause.push_str("{}");
                        } else {
                            clause.push_str(&format!("{{ {} }}", specifiers.join(", ")));
                        }
                    }
                    format!("import {} from {};", clause, module)
                }
            },
            DeclarationStyle::CommonJs => match &self.binding {
                BindingKind::SideEffectOnly => format!("require({});", module),
                BindingKind::Default { local } | BindingKind::Namespace { local } => {
                    format!("const {} = require({});", local, module)
                }
                BindingKind::Named { bindings } => {
                    let properties: Vec<String> = bindings
                        .iter()
                        .map(|b| {
                            if b.imported == b.local {
                                b.local.clone()
                            } else if is_identifier(&b.imported) {
                                format!("{}: {}", b.imported, b.local)
                            } else {
                                format!("{}: {}", quote_module(&b.imported), b.local)
                            }
                        })
                        .collect();
                    format!(
                        "const {{ {} }} = require({});",
                        properties.join(", "),
                        module
                    )
                }
            },
        }
    }

    /// Fold `other` (same module, same style) into this record when a single
    /// declaration can express both. Returns `other` back when it cannot.
    fn absorb(&mut self, other: ImportRecord) -> Option<ImportRecord> {
        debug_assert!(self.module_path == other.module_path && self.style == other.style);

        let es = self.style == DeclarationStyle::EsModule;
        let merged = match (&self.binding, &other.binding) {
            (current, BindingKind::SideEffectOnly) => Some(current.clone()),
            (BindingKind::SideEffectOnly, incoming) => Some(incoming.clone()),
            (current, incoming) if current == incoming => Some(current.clone()),
            (BindingKind::Named { bindings: a }, BindingKind::Named { bindings: b }) => {
                Some(BindingKind::Named {
                    bindings: union(a, b),
                })
            }
            (BindingKind::Default { local }, BindingKind::Named { bindings })
            | (BindingKind::Named { bindings }, BindingKind::Default { local })
                if es =>
            {
                Some(BindingKind::Named {
                    bindings: union(&[NamedBinding::new("default", local)], bindings),
                })
            }
            (BindingKind::Default { local: a }, BindingKind::Default { local: b }) if es => {
                Some(BindingKind::Named {
                    bindings: vec![
                        NamedBinding::new("default", a),
                        NamedBinding::new("default", b),
                    ],
                })
            }
            _ => None,
        };

        let Some(binding) = merged else {
            return Some(other);
        };

        // Keep user text whenever one side already spells the union.
        if binding != self.binding {
            self.verbatim = if binding == other.binding {
                other.verbatim
            } else {
                None
            };
        }
        self.local_identifiers = locals_of(&binding);
        self.local_identifiers.extend(other.local_identifiers);
        self.binding = binding;
        None
    }
}

impl ImportRecord {
    /// Add a default binding to an ES record that has none. The user's text is
    /// kept and only gains the default clause.
    fn complete_default(&mut self, local: &str) -> bool {
        if self.style != DeclarationStyle::EsModule {
            return false;
        }
        let side_effect = matches!(self.binding, BindingKind::SideEffectOnly);
        let binding = match &self.binding {
            BindingKind::SideEffectOnly => BindingKind::Default {
                local: local.to_string(),
            },
            BindingKind::Named { bindings } if !bindings.iter().any(|b| b.is_default()) => {
                let mut completed = vec![NamedBinding::new("default", local)];
                completed.extend(bindings.iter().cloned());
                BindingKind::Named {
                    bindings: completed,
                }
            }
            _ => return false,
        };

        // `import 'm'` gains `local from`; `import { a } from 'm'` gains `local,`.
        let (anchor, clause) = match &self.verbatim {
            Some(text) if side_effect => (
                text.find(|c: char| c == '\'' || c == '"'),
                format!("{} from ", local),
            ),
            Some(text) => (text.find('{'), format!("{}, ", local)),
            None => (None, String::new()),
        };
        self.verbatim = match (self.verbatim.take(), anchor) {
            (Some(mut text), Some(at)) => {
                text.insert_str(at, &clause);
                Some(text)
            }
            _ => None,
        };

        self.binding = binding;
        self.local_identifiers.insert(local.to_string());
        true
    }
}

fn locals_of(binding: &BindingKind) -> BTreeSet<String> {
    match binding {
        BindingKind::SideEffectOnly => BTreeSet::new(),
        BindingKind::Default { local } | BindingKind::Namespace { local } => {
            BTreeSet::from([local.clone()])
        }
        BindingKind::Named { bindings } => bindings.iter().map(|b| b.local.clone()).collect(),
    }
}

fn union(a: &[NamedBinding], b: &[NamedBinding]) -> Vec<NamedBinding> {
    let mut out = a.to_vec();
    for binding in b {
        if !out.contains(binding) {
            out.push(binding.clone());
        }
    }
    out
}

fn render_es_specifier(binding: &NamedBinding) -> String {
    let imported = if is_identifier(&binding.imported) {
        binding.imported.clone()
    } else {
        quote_module(&binding.imported)
    };
    if binding.imported == binding.local {
        imported
    } else {
        format!("{} as {}", imported, binding.local)
    }
}

fn quote_module(path: &str) -> String {
    format!("'{}'", path.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Append `;` to a statement that does not already end with one.
pub fn terminate(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with(';') {
        trimmed.to_string()
    } else {
        format!("{};", trimmed)
    }
}

/// `base` if nothing declares it, otherwise the first free `base1`, `base2`, ...
pub fn fresh_name(base: &str, taken: &BTreeSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| unreachable!("unbounded range"))
}

pub(crate) fn slice<'s>(source: &'s str, span: oxc_span::Span) -> &'s str {
    &source[span.start as usize..span.end as usize]
}

// ═══════════════════════════════════════════════════════════════════════════════
// COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Build a record from a top-level statement, if it is an import or a plain
/// `require` binding.
fn record_from_statement(stmt: &Statement<'_>, source: &str) -> Option<ImportRecord> {
    match stmt {
        Statement::ImportDeclaration(decl) => {
            let module = decl.source.value.to_string();
            let text = slice(source, decl.span);
            let Some(specifiers) = &decl.specifiers else {
                return Some(ImportRecord::from_source(
                    &module,
                    BindingKind::SideEffectOnly,
                    DeclarationStyle::EsModule,
                    text,
                ));
            };

            let mut default_local = None;
            let mut namespace_local = None;
            let mut named = Vec::new();
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        default_local = Some(s.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        namespace_local = Some(s.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        named.push(NamedBinding {
                            imported: s.imported.name().to_string(),
                            local: s.local.name.to_string(),
                        });
                    }
                }
            }

            let binding = match (namespace_local, default_local) {
                (Some(ns), _) => BindingKind::Namespace { local: ns },
                (None, Some(local)) if named.is_empty() => BindingKind::Default { local },
                (None, Some(local)) => {
                    named.insert(0, NamedBinding::new("default", &local));
                    BindingKind::Named { bindings: named }
                }
                (None, None) => BindingKind::Named { bindings: named },
            };

            let mut record =
                ImportRecord::from_source(&module, binding, DeclarationStyle::EsModule, text);
            // `import A, * as B` keeps both names even though only the
            // namespace shape is modelled.
            for specifier in specifiers {
                if let ImportDeclarationSpecifier::ImportDefaultSpecifier(s) = specifier {
                    record.local_identifiers.insert(s.local.name.to_string());
                }
            }
            Some(record)
        }

        Statement::VariableDeclaration(decl) => {
            if decl.declarations.len() != 1 {
                return None;
            }
            let declarator = &decl.declarations[0];
            let module = required_module(declarator.init.as_ref()?)?;
            let binding = binding_from_pattern(&declarator.id)?;
            Some(ImportRecord::from_source(
                &module,
                binding,
                DeclarationStyle::CommonJs,
                slice(source, decl.span),
            ))
        }

        Statement::ExpressionStatement(expr_stmt) => {
            let module = required_module(&expr_stmt.expression)?;
            Some(ImportRecord::from_source(
                &module,
                BindingKind::SideEffectOnly,
                DeclarationStyle::CommonJs,
                slice(source, expr_stmt.span),
            ))
        }

        _ => None,
    }
}

/// `require('m')` → `m`. Template-literal requires are not module records.
fn required_module(expr: &Expression<'_>) -> Option<String> {
    let Expression::CallExpression(call) = expr.without_parentheses() else {
        return None;
    };
    if !call.is_require_call() {
        return None;
    }
    match call.arguments.first() {
        Some(Argument::StringLiteral(lit)) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// Only plain identifiers and flat `{ a, b: c }` destructuring are records;
/// anything richer stays an ordinary statement.
fn binding_from_pattern(pattern: &BindingPattern<'_>) -> Option<BindingKind> {
    match pattern {
        BindingPattern::BindingIdentifier(id) => Some(BindingKind::Default {
            local: id.name.to_string(),
        }),
        BindingPattern::ObjectPattern(obj) => {
            if obj.rest.is_some() {
                return None;
            }
            let mut bindings = Vec::new();
            for property in &obj.properties {
                if property.computed {
                    return None;
                }
                let imported = match &property.key {
                    PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                    PropertyKey::StringLiteral(lit) => lit.value.to_string(),
                    _ => return None,
                };
                let BindingPattern::BindingIdentifier(local) = &property.value else {
                    return None;
                };
                bindings.push(NamedBinding {
                    imported,
                    local: local.name.to_string(),
                });
            }
            Some(BindingKind::Named { bindings })
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// How the synthesized mount statement reaches the DOM mount function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MountCapability {
    /// `ReactDOM.render(...)`
    Member { object: String },
    /// `render(...)`
    Direct { callee: String },
}

impl MountCapability {
    pub fn callee(&self, mount_method: &str) -> String {
        match self {
            MountCapability::Member { object } => format!("{}.{}", object, mount_method),
            MountCapability::Direct { callee } => callee.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    records: Vec<ImportRecord>,
    /// Top-level statement indexes turned into records.
    statements: BTreeSet<usize>,
    /// Every module-scope name: import locals, declarations, injected locals.
    declared: BTreeSet<String>,
}

impl ImportRegistry {
    /// Gather every top-level import and `require` binding, in source order.
    pub fn collect(program: &Program<'_>, source: &str) -> Self {
        let mut registry = ImportRegistry {
            declared: TopLevelNames::collect(program),
            ..ImportRegistry::default()
        };
        for (index, stmt) in program.body.iter().enumerate() {
            if let Some(record) = record_from_statement(stmt, source) {
                tracing::trace!(
                    module = %record.module_path,
                    style = ?record.style,
                    span = ?stmt.span(),
                    "collected import record"
                );
                registry.insert(record);
                registry.statements.insert(index);
            }
        }
        tracing::debug!(records = registry.records.len(), "collected imports");
        registry
    }

    fn insert(&mut self, record: ImportRecord) {
        let existing = self
            .records
            .iter_mut()
            .find(|r| r.module_path == record.module_path && r.style == record.style);
        match existing {
            Some(existing) => {
                if let Some(rejected) = existing.absorb(record) {
                    self.records.push(rejected);
                }
            }
            None => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[ImportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the top-level statement at `index` was consumed as a record.
    pub fn owns_statement(&self, index: usize) -> bool {
        self.statements.contains(&index)
    }

    fn modules<'r>(&'r self, module: &'r str) -> impl Iterator<Item = (usize, &'r ImportRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.module_path == module)
    }

    fn framework_index(&self, options: &SynthesisOptions) -> Option<usize> {
        self.modules(&options.framework.module)
            .find(|(_, r)| r.module_object_local().is_some())
            .map(|(i, _)| i)
    }

    fn mount_index(&self, options: &SynthesisOptions) -> Option<(usize, MountCapability)> {
        self.modules(&options.dom.module).find_map(|(i, r)| {
            if let Some(object) = r.module_object_local() {
                Some((
                    i,
                    MountCapability::Member {
                        object: object.to_string(),
                    },
                ))
            } else {
                r.named_local(&options.mount_method).map(|callee| {
                    (
                        i,
                        MountCapability::Direct {
                            callee: callee.to_string(),
                        },
                    )
                })
            }
        })
    }

    /// Local name the framework root is bound to, if any record provides it.
    pub fn framework_local(&self, options: &SynthesisOptions) -> Option<&str> {
        self.framework_index(options)
            .and_then(|i| self.records[i].module_object_local())
    }

    pub fn mount_capability(&self, options: &SynthesisOptions) -> Option<MountCapability> {
        self.mount_index(options).map(|(_, capability)| capability)
    }

    /// Is `name` bound to the DOM module object (`name.render(...)`)?
    pub fn is_mount_object(&self, name: &str, options: &SynthesisOptions) -> bool {
        self.modules(&options.dom.module)
            .any(|(_, r)| r.module_object_local() == Some(name))
    }

    /// Is `name` bound to the DOM module's mount function (`name(...)`)?
    pub fn is_mount_function(&self, name: &str, options: &SynthesisOptions) -> bool {
        self.modules(&options.dom.module)
            .any(|(_, r)| r.named_local(&options.mount_method) == Some(name))
    }

    /// Is `name` declared at module scope, by an import or otherwise?
    pub fn binds(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    pub fn declared_names(&self) -> &BTreeSet<String> {
        &self.declared
    }

    /// Guarantee the framework root and DOM mount bindings.
    ///
    /// Satisfied capabilities are left untouched. A missing one is added to an
    /// existing ES record of that module when there is one (its text only gains
    /// the default clause), otherwise a new ES default import is appended.
    /// CommonJS records are never extended. An injected local never reuses a
    /// module-scope name.
    pub fn ensure(mut self, options: &SynthesisOptions) -> Self {
        if self.framework_index(options).is_none() {
            tracing::debug!(module = %options.framework.module, "injecting framework root binding");
            self.provide_default(&options.framework);
        }
        if self.mount_index(options).is_none() {
            tracing::debug!(module = %options.dom.module, "injecting DOM mount binding");
            self.provide_default(&options.dom);
        }
        self
    }

    fn provide_default(&mut self, binding: &ModuleBinding) {
        let local = fresh_name(&binding.local, &self.declared);
        self.declared.insert(local.clone());

        let existing = self.records.iter_mut().find(|r| {
            r.module_path == binding.module && r.style == DeclarationStyle::EsModule
        });
        if let Some(record) = existing {
            if record.complete_default(&local) {
                return;
            }
        }
        self.records.push(ImportRecord::new(
            &binding.module,
            BindingKind::Default { local },
            DeclarationStyle::EsModule,
        ));
    }

    /// Records in emission order: DOM mount, framework root, then the rest in
    /// source order.
    pub fn ordered(&self, options: &SynthesisOptions) -> Vec<&ImportRecord> {
        let mut hoisted = Vec::with_capacity(2);
        if let Some((i, _)) = self.mount_index(options) {
            hoisted.push(i);
        }
        if let Some(i) = self.framework_index(options) {
            hoisted.push(i);
        }

        let mut ordered: Vec<&ImportRecord> = hoisted.iter().map(|&i| &self.records[i]).collect();
        ordered.extend(
            self.records
                .iter()
                .enumerate()
                .filter(|(i, _)| !hoisted.contains(i))
                .map(|(_, r)| r),
        );
        ordered
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_program;
    use oxc_allocator::Allocator;

    fn collect(source: &str) -> ImportRegistry {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source).unwrap();
        ImportRegistry::collect(&program, source)
    }

    fn rendered(registry: &ImportRegistry) -> Vec<String> {
        registry
            .ordered(&SynthesisOptions::default())
            .iter()
            .map(|r| r.to_source())
            .collect()
    }

    #[test]
    fn test_collects_every_shape() {
        let registry = collect(
            r#"
            import React from 'react';
            import { render as mount, hydrate } from 'react-dom';
            import * as utils from './utils';
            import 'dep/assets/index.css';
            const Dep = require("dep");
            const { a, b: c } = require('pair');
            require('polyfill');
            "#,
        );
        let records = registry.records();
        assert_eq!(records.len(), 7);
        assert_eq!(records[0].binding, BindingKind::Default { local: "React".into() });
        assert_eq!(
            records[1].binding,
            BindingKind::Named {
                bindings: vec![
                    NamedBinding::new("render", "mount"),
                    NamedBinding::new("hydrate", "hydrate"),
                ]
            }
        );
        assert_eq!(records[2].binding, BindingKind::Namespace { local: "utils".into() });
        assert_eq!(records[3].binding, BindingKind::SideEffectOnly);
        assert_eq!(records[4].style, DeclarationStyle::CommonJs);
        assert_eq!(records[4].default_local(), Some("Dep"));
        assert_eq!(records[5].named_local("b"), Some("c"));
        assert_eq!(records[6].binding, BindingKind::SideEffectOnly);
        assert_eq!(records[6].style, DeclarationStyle::CommonJs);
        assert!(records.iter().all(|r| r.is_verbatim()));
    }

    #[test]
    fn test_ignores_non_import_statements() {
        let registry = collect(
            r#"
            const x = 1;
            const y = require(`tpl`);
            const [first] = require('arr');
            <div />
            "#,
        );
        assert!(registry.is_empty());
        assert!(!registry.owns_statement(0));
    }

    #[test]
    fn test_ensure_injects_es_defaults() {
        let registry = collect("import Dep from 'dep';").ensure(&SynthesisOptions::default());
        assert_eq!(
            rendered(&registry),
            vec![
                "import ReactDOM from 'react-dom';",
                "import React from 'react';",
                "import Dep from 'dep';",
            ]
        );
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let source = "import ReactDOM from 'react-dom';\nimport React from 'react';";
        let before = collect(source);
        let after = before.clone().ensure(&SynthesisOptions::default());
        assert_eq!(before, after);
        let twice = after.clone().ensure(&SynthesisOptions::default());
        assert_eq!(after, twice);
    }

    #[test]
    fn test_ensure_keeps_commonjs_style() {
        let registry = collect("const ReactDOM = require(\"react-dom\");\nconst Dep = require('dep');")
            .ensure(&SynthesisOptions::default());
        assert_eq!(
            rendered(&registry),
            vec![
                "const ReactDOM = require(\"react-dom\");",
                "import React from 'react';",
                "const Dep = require('dep');",
            ]
        );
    }

    #[test]
    fn test_named_render_satisfies_mount() {
        let options = SynthesisOptions::default();
        let registry = collect("import { render } from 'react-dom'").ensure(&options);
        assert_eq!(
            registry.mount_capability(&options),
            Some(MountCapability::Direct { callee: "render".into() })
        );
        assert_eq!(rendered(&registry)[0], "import { render } from 'react-dom';");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_completes_deficient_es_record() {
        let options = SynthesisOptions::default();
        let registry = collect("import { useState } from 'react';").ensure(&options);
        assert_eq!(registry.framework_local(&options), Some("React"));
        assert_eq!(
            rendered(&registry),
            vec![
                "import ReactDOM from 'react-dom';",
                "import React, { useState } from 'react';",
            ]
        );
    }

    #[test]
    fn test_completion_keeps_user_text() {
        let options = SynthesisOptions::default();
        let registry = collect("import { useState } from \"react\"\nimport \"react-dom\"").ensure(&options);
        assert_eq!(
            rendered(&registry),
            vec![
                "import ReactDOM from \"react-dom\";",
                "import React, { useState } from \"react\";",
            ]
        );
        assert!(registry.records().iter().all(|r| r.is_verbatim()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_injected_locals_avoid_declared_names() {
        let options = SynthesisOptions::default();
        let registry =
            collect("const React = window.React;\nfunction ReactDOM() {}\nimport ReactDOM1 from 'x';")
                .ensure(&options);
        assert_eq!(registry.framework_local(&options), Some("React1"));
        assert_eq!(
            registry.mount_capability(&options),
            Some(MountCapability::Member { object: "ReactDOM2".into() })
        );
        assert!(registry.binds("React1") && registry.binds("ReactDOM2"));
    }

    #[test]
    fn test_fresh_name() {
        let taken: BTreeSet<String> = ["App", "App1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(fresh_name("Root", &taken), "Root");
        assert_eq!(fresh_name("App", &taken), "App2");
    }

    #[test]
    fn test_commonjs_destructuring_is_not_extended() {
        let options = SynthesisOptions::default();
        let registry = collect("const { useState } = require('react');").ensure(&options);
        let styles: Vec<_> = registry
            .records()
            .iter()
            .filter(|r| r.module_path == "react")
            .map(|r| r.style)
            .collect();
        assert_eq!(styles, vec![DeclarationStyle::CommonJs, DeclarationStyle::EsModule]);
    }

    #[test]
    fn test_merges_same_module_same_style() {
        let registry = collect(
            "import 'dep';\nimport Dep from 'dep';\nimport { Provider } from 'dep';\nimport Dep from 'dep';",
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.records()[0].render(), "import Dep, { Provider } from 'dep';");
        assert!(!registry.records()[0].is_verbatim());
    }

    #[test]
    fn test_side_effect_duplicate_keeps_text() {
        let registry = collect("import Dep from \"dep\"\nimport \"dep\"");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.records()[0].to_source(), "import Dep from \"dep\";");
    }

    #[test]
    fn test_unmergeable_commonjs_stays_separate() {
        let registry = collect("const A = require('x');\nconst B = require('x');");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_order_is_independent_of_input_permutation() {
        let options = SynthesisOptions::default();
        let permutations = [
            "import Dep from 'dep';\nimport React from 'react';\nimport ReactDOM from 'react-dom';",
            "import React from 'react';\nimport Dep from 'dep';\nimport ReactDOM from 'react-dom';",
            "import ReactDOM from 'react-dom';\nimport Dep from 'dep';\nimport React from 'react';",
        ];
        for source in permutations {
            let registry = collect(source).ensure(&options);
            let modules: Vec<_> = registry
                .ordered(&options)
                .iter()
                .map(|r| r.module_path.as_str())
                .collect();
            assert_eq!(modules, vec!["react-dom", "react", "dep"], "input: {}", source);
        }
    }

    #[test]
    fn test_render_shapes() {
        let es = DeclarationStyle::EsModule;
        let cjs = DeclarationStyle::CommonJs;
        let ns = ImportRecord::new("m", BindingKind::Namespace { local: "M".into() }, es);
        assert_eq!(ns.render(), "import * as M from 'm';");
        let empty = ImportRecord::new("m", BindingKind::Named { bindings: vec![] }, es);
        assert_eq!(empty.render(), "import {} from 'm';");
        let aliased = ImportRecord::new(
            "m",
            BindingKind::Named {
                bindings: vec![NamedBinding::new("a", "a"), NamedBinding::new("b", "c")],
            },
            cjs,
        );
        assert_eq!(aliased.render(), "const { a, b: c } = require('m');");
        let quoted = ImportRecord::new("it's", BindingKind::SideEffectOnly, cjs);
        assert_eq!(quoted.render(), "require('it\\'s');");
    }

    #[test]
    fn test_terminate() {
        assert_eq!(terminate("import a from 'a'"), "import a from 'a';");
        assert_eq!(terminate("import a from 'a';  "), "import a from 'a';");
    }
}
