//! Rewrite rules for the top-level default-export shapes.
//!
//! - A: `export { foo as default, ...rest }` → `export { ...rest }; export = foo`
//! - B: `export default function foo() {}`  → `function foo() {}; export = foo`
//! - C: `export default foo`                → `export = foo`
//! - D: anything else passes through
//!
//! Whenever one item expands into several, declarations come before the
//! export assignments that designate them.

use ee_ast::{
    BindingIdent, ClassDecl, ClassExpr, Decl, DefaultDecl, ExportDefaultDecl, ExportDefaultExpr,
    ExportNamedSpecifier, ExportSpecifier, FnDecl, FnExpr, Ident, ModuleDecl, ModuleExportName,
    ModuleItem, NamedExport, ParsedFile, Pat, Stmt, TransformOptions, VarDecl, VarDeclKind,
    VarDeclarator, DEFAULT_EXPORT_NAME,
};
use swc_common::Span;

use crate::synth::{
    export_assignment, expr_ident, synthesize_export_assignment, ExportTarget, NameGenerator,
};

/// Outcome of applying the rules to one top-level item.
#[derive(Debug)]
pub enum Rewrite {
    /// No rule matched; the item is returned as-is.
    Keep(ModuleItem),
    /// A rule matched and produced these items, in output order.
    Replace(Vec<ModuleItem>),
}

impl Rewrite {
    pub fn into_items(self) -> Vec<ModuleItem> {
        match self {
            Rewrite::Keep(item) => vec![item],
            Rewrite::Replace(items) => items,
        }
    }
}

/// Applies the rewrite rules to the top-level items of one file.
pub struct Rewriter {
    options: TransformOptions,
    is_declaration_file: bool,
    names: NameGenerator,
}

impl Rewriter {
    pub fn new(file: &ParsedFile, options: TransformOptions) -> Self {
        Self {
            options,
            is_declaration_file: file.is_declaration_file,
            names: NameGenerator::for_module(&file.module),
        }
    }

    pub fn rewrite_item(&mut self, item: ModuleItem) -> Rewrite {
        match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)) => {
                self.rewrite_export_list(export)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                self.rewrite_default_decl(export)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                self.rewrite_default_expr(export)
            }
            other => Rewrite::Keep(other),
        }
    }

    /// Rule A: `export { foo as default, bar }`.
    ///
    /// Re-exports (`export { foo as default } from "./foo"`) have no local
    /// binding to designate and are left alone.
    fn rewrite_export_list(&mut self, mut export: NamedExport) -> Rewrite {
        if export.src.is_some() {
            return Rewrite::Keep(ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)));
        }

        let mut default_specifier = None;
        let mut has_other_specifiers = false;
        let mut specifiers = Vec::with_capacity(export.specifiers.len());

        for specifier in std::mem::take(&mut export.specifiers) {
            match specifier {
                ExportSpecifier::Named(named)
                    if default_specifier.is_none() && is_default_rename(&named) =>
                {
                    if self.options.keep_original_export {
                        specifiers.push(ExportSpecifier::Named(named.clone()));
                    }
                    default_specifier = Some(named);
                }
                other => {
                    has_other_specifiers = true;
                    specifiers.push(other);
                }
            }
        }
        export.specifiers = specifiers;

        let Some(default_specifier) = default_specifier else {
            return Rewrite::Keep(ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)));
        };

        tracing::trace!(has_other_specifiers, "rewriting `export {{ .. as default }}`");

        let assignment = synthesize_export_assignment(
            ExportTarget::Specifier(&default_specifier),
            export.span,
            true,
            &mut self.names,
        );

        if self.options.keep_original_export || has_other_specifiers {
            Rewrite::Replace(vec![
                ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(export)),
                assignment,
            ])
        } else {
            Rewrite::Replace(vec![assignment])
        }
    }

    /// Rule B: `export default function/class`.
    fn rewrite_default_decl(&mut self, export: ExportDefaultDecl) -> Rewrite {
        let ExportDefaultDecl { span, decl } = export;
        let declare = self.is_declaration_file;

        // The declaration takes over the `export` keyword's position so
        // comments written above the export stay attached to it.
        let decl = match decl {
            DefaultDecl::Fn(FnExpr { ident, mut function }) => {
                function.span = span.with_hi(function.span.hi);
                Decl::Fn(FnDecl {
                    ident: ident.unwrap_or_else(|| self.names.next_ident(span)),
                    declare,
                    function,
                })
            }
            DefaultDecl::Class(ClassExpr { ident, mut class }) => {
                class.span = span.with_hi(class.span.hi);
                Decl::Class(ClassDecl {
                    ident: ident.unwrap_or_else(|| self.names.next_ident(span)),
                    declare,
                    class,
                })
            }
            other => {
                return Rewrite::Keep(ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(
                    ExportDefaultDecl { span, decl: other },
                )))
            }
        };

        tracing::trace!(declare, "rewriting `export default` declaration");

        let equals =
            synthesize_export_assignment(ExportTarget::Decl(&decl), span, true, &mut self.names);
        let restated = self.options.keep_original_export.then(|| {
            synthesize_export_assignment(ExportTarget::Decl(&decl), span, false, &mut self.names)
        });

        let mut items = vec![ModuleItem::Stmt(Stmt::Decl(decl)), equals];
        items.extend(restated);
        Rewrite::Replace(items)
    }

    /// Rule C: `export default <expr>`.
    ///
    /// An expression that is not an identifier is exported by value. Keeping
    /// the original export as well would evaluate it twice, so outside
    /// declaration files it is first bound to a generated `const`.
    fn rewrite_default_expr(&mut self, export: ExportDefaultExpr) -> Rewrite {
        let span = export.span;
        let keep = self.options.keep_original_export;

        if expr_ident(&export.expr).is_some() {
            tracing::trace!(keep, "rewriting `export default <ident>`");
            let equals = synthesize_export_assignment(
                ExportTarget::Expr(&export.expr),
                span,
                true,
                &mut self.names,
            );
            return if keep {
                Rewrite::Replace(vec![
                    ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)),
                    equals,
                ])
            } else {
                Rewrite::Replace(vec![equals])
            };
        }

        tracing::trace!(keep, "rewriting `export default <expr>`");

        if !keep {
            return Rewrite::Replace(vec![export_assignment(export.expr, span, true)]);
        }

        if self.is_declaration_file {
            let equals = export_assignment(export.expr.clone(), span, true);
            return Rewrite::Replace(vec![
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)),
                equals,
            ]);
        }

        let ident = self.names.next_ident(span);
        let binding = const_binding(ident.clone(), export, span);
        Rewrite::Replace(vec![
            binding,
            synthesize_export_assignment(ExportTarget::Ident(&ident), span, false, &mut self.names),
            synthesize_export_assignment(ExportTarget::Ident(&ident), span, true, &mut self.names),
        ])
    }
}

/// `foo as default`, naming a local binding.
fn is_default_rename(specifier: &ExportNamedSpecifier) -> bool {
    matches!(
        &specifier.exported,
        Some(ModuleExportName::Ident(exported)) if &*exported.sym == DEFAULT_EXPORT_NAME
    )
}

/// `const <ident> = <expr>;`
fn const_binding(ident: Ident, export: ExportDefaultExpr, span: Span) -> ModuleItem {
    ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span,
        ctxt: Default::default(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span,
            name: Pat::Ident(BindingIdent::from(ident)),
            init: Some(export.expr),
            definite: false,
        }],
    }))))
}
