//! Export surface of a module: does it export `default`, and anything else?
//!
//! The names come from an [`ExportOracle`], normally the host's symbol table.
//! [`SyntacticExports`] is the built-in oracle for hosts without a type
//! checker; it reads the export list straight off the top-level items.

use ee_ast::{
    Decl, ExportSpecifier, ExportSurface, ModuleDecl, ModuleExportName, ModuleItem, ObjectPatProp,
    ParsedFile, Pat, TsModuleName, DEFAULT_EXPORT_NAME,
};

/// Name reported for `export * from "..."`, whose names are unresolved.
pub const STAR_EXPORT_NAME: &str = "*";

/// Name reported for an existing `export = ...` assignment.
pub const EXPORT_EQUALS_NAME: &str = "export=";

/// Name reported for string-literal export names (`export { x as "y" }`).
pub const STRING_EXPORT_NAME: &str = "\"<string>\"";

/// Lists the names a module exports.
pub trait ExportOracle {
    /// `None` when the file has no module symbol (a script without imports or
    /// exports); the transform leaves such files alone.
    fn exports_of_module(&self, file: &ParsedFile) -> Option<Vec<String>>;
}

impl<F> ExportOracle for F
where
    F: Fn(&ParsedFile) -> Option<Vec<String>>,
{
    fn exports_of_module(&self, file: &ParsedFile) -> Option<Vec<String>> {
        self(file)
    }
}

/// Oracle that reads exported names from the module's top-level items.
///
/// Star re-exports cannot be resolved without the target module and are
/// reported as [`STAR_EXPORT_NAME`], which counts as a named export.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticExports;

impl ExportOracle for SyntacticExports {
    fn exports_of_module(&self, file: &ParsedFile) -> Option<Vec<String>> {
        let body = &file.module.body;
        if !body
            .iter()
            .any(|item| matches!(item, ModuleItem::ModuleDecl(_)))
        {
            return None;
        }

        let mut names = Vec::new();
        for item in body {
            if let ModuleItem::ModuleDecl(decl) = item {
                collect_module_decl(decl, &mut names);
            }
        }
        Some(names)
    }
}

/// Ask `oracle` for the surface of `file`.
pub fn analyze_surface<O: ExportOracle + ?Sized>(
    oracle: &O,
    file: &ParsedFile,
) -> Option<ExportSurface> {
    oracle
        .exports_of_module(file)
        .map(|names| ExportSurface::from_names(&names))
}

fn collect_module_decl(decl: &ModuleDecl, names: &mut Vec<String>) {
    match decl {
        ModuleDecl::ExportDecl(export) => collect_decl(&export.decl, names),
        ModuleDecl::ExportNamed(export) => {
            for specifier in &export.specifiers {
                match specifier {
                    ExportSpecifier::Named(named) => {
                        names.push(export_name(named.exported.as_ref().unwrap_or(&named.orig)))
                    }
                    ExportSpecifier::Namespace(namespace) => {
                        names.push(export_name(&namespace.name))
                    }
                    ExportSpecifier::Default(default) => {
                        names.push(default.exported.sym.to_string())
                    }
                }
            }
        }
        ModuleDecl::ExportDefaultDecl(_) | ModuleDecl::ExportDefaultExpr(_) => {
            names.push(DEFAULT_EXPORT_NAME.to_string())
        }
        ModuleDecl::ExportAll(_) => names.push(STAR_EXPORT_NAME.to_string()),
        ModuleDecl::TsExportAssignment(_) => names.push(EXPORT_EQUALS_NAME.to_string()),
        ModuleDecl::TsImportEquals(import) if import.is_export => {
            names.push(import.id.sym.to_string())
        }
        _ => {}
    }
}

fn collect_decl(decl: &Decl, names: &mut Vec<String>) {
    match decl {
        Decl::Class(class) => names.push(class.ident.sym.to_string()),
        Decl::Fn(func) => names.push(func.ident.sym.to_string()),
        Decl::Var(var) => {
            for declarator in &var.decls {
                collect_pat(&declarator.name, names);
            }
        }
        Decl::TsInterface(interface) => names.push(interface.id.sym.to_string()),
        Decl::TsTypeAlias(alias) => names.push(alias.id.sym.to_string()),
        Decl::TsEnum(ts_enum) => names.push(ts_enum.id.sym.to_string()),
        Decl::TsModule(module) => {
            if let TsModuleName::Ident(id) = &module.id {
                names.push(id.sym.to_string());
            }
        }
        _ => {}
    }
}

/// Every binding introduced by a declarator pattern.
fn collect_pat(pat: &Pat, names: &mut Vec<String>) {
    match pat {
        Pat::Ident(binding) => names.push(binding.id.sym.to_string()),
        Pat::Array(array) => {
            for elem in array.elems.iter().flatten() {
                collect_pat(elem, names);
            }
        }
        Pat::Rest(rest) => collect_pat(&rest.arg, names),
        Pat::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => collect_pat(&kv.value, names),
                    ObjectPatProp::Assign(assign) => names.push(assign.key.sym.to_string()),
                    ObjectPatProp::Rest(rest) => collect_pat(&rest.arg, names),
                }
            }
        }
        Pat::Assign(assign) => collect_pat(&assign.left, names),
        _ => {}
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        _ => STRING_EXPORT_NAME.to_string(),
    }
}
