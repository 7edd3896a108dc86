//! Builders for `export = <ident>` and `export default <ident>` items.

use std::collections::HashSet;

use ee_ast::{
    Decl, ExportDefaultExpr, ExportNamedSpecifier, Expr, Ident, Module, ModuleDecl,
    ModuleExportName, ModuleItem, TsExportAssignment,
};
use swc_common::Span;
use swc_ecma_visit::{Visit, VisitWith};

/// Something whose binding an export assignment designates.
#[derive(Debug, Clone, Copy)]
pub enum ExportTarget<'a> {
    Ident(&'a Ident),
    /// `foo as default`: designates the local `foo`.
    Specifier(&'a ExportNamedSpecifier),
    /// A function or class declaration: designates its name.
    Decl(&'a Decl),
    /// `export default foo` or `export default (foo)`.
    Expr(&'a Expr),
}

impl ExportTarget<'_> {
    /// The identifier this target refers to, if it names one.
    pub fn ident(&self) -> Option<Ident> {
        match self {
            ExportTarget::Ident(ident) => Some((*ident).clone()),
            ExportTarget::Specifier(specifier) => match &specifier.orig {
                ModuleExportName::Ident(ident) => Some(ident.clone()),
                _ => None,
            },
            ExportTarget::Decl(Decl::Fn(func)) => Some(func.ident.clone()),
            ExportTarget::Decl(Decl::Class(class)) => Some(class.ident.clone()),
            ExportTarget::Decl(_) => None,
            ExportTarget::Expr(expr) => expr_ident(expr).cloned(),
        }
    }
}

/// The identifier an expression consists of, looking through parentheses.
pub fn expr_ident(expr: &Expr) -> Option<&Ident> {
    match expr {
        Expr::Ident(ident) => Some(ident),
        Expr::Paren(paren) => expr_ident(&paren.expr),
        _ => None,
    }
}

/// Build an export assignment designating `target`.
///
/// `is_equals_form` selects `export = <ident>`; otherwise the item is the
/// plain `export default <ident>` restatement. Targets without a usable
/// identifier get a fresh name from `names`.
pub fn synthesize_export_assignment(
    target: ExportTarget<'_>,
    span: Span,
    is_equals_form: bool,
    names: &mut NameGenerator,
) -> ModuleItem {
    let ident = target.ident().unwrap_or_else(|| names.next_ident(span));
    export_assignment(Box::new(Expr::Ident(ident)), span, is_equals_form)
}

/// `export = <expr>` or `export default <expr>`.
pub fn export_assignment(expr: Box<Expr>, span: Span, is_equals_form: bool) -> ModuleItem {
    let decl = if is_equals_form {
        ModuleDecl::TsExportAssignment(TsExportAssignment { span, expr })
    } else {
        ModuleDecl::ExportDefaultExpr(ExportDefaultExpr { span, expr })
    };
    ModuleItem::ModuleDecl(decl)
}

/// Deterministic names for anonymous default exports.
///
/// Yields `default_1`, `default_2`, ... in call order, skipping any name
/// already spelled somewhere in the module.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    taken: HashSet<String>,
    counter: usize,
}

impl NameGenerator {
    pub fn for_module(module: &Module) -> Self {
        let mut collector = IdentCollector::default();
        module.visit_with(&mut collector);
        Self {
            taken: collector.names,
            counter: 0,
        }
    }

    pub fn next_name(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("default_{}", self.counter);
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }

    pub fn next_ident(&mut self, span: Span) -> Ident {
        Ident::new_no_ctxt(self.next_name().into(), span)
    }
}

#[derive(Default)]
struct IdentCollector {
    names: HashSet<String>,
}

impl Visit for IdentCollector {
    fn visit_ident(&mut self, node: &Ident) {
        self.names.insert(node.sym.to_string());
    }
}
