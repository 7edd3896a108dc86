//! ECMAScript/TypeScript AST types for export-equals.
//!
//! Re-exports the standard SWC AST and adds the values the transform passes
//! around:
//! - `ParsedFile` — a parsed module together with its file name
//! - `TransformOptions` — user-facing switches, loadable from JSON config
//! - `ExportSurface` — what a module exports, as reported by an oracle

pub use swc_ecma_ast::*;

use serde::{Deserialize, Serialize};

/// Name under which a module's default export is visible.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// A parsed source file handed to the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub file_name: String,
    /// True for type-only declaration files (`.d.ts`, `.d.mts`, `.d.cts`).
    pub is_declaration_file: bool,
    pub module: Module,
}

impl ParsedFile {
    pub fn new(file_name: impl Into<String>, module: Module) -> Self {
        let file_name = file_name.into();
        let is_declaration_file = is_declaration_file_name(&file_name);
        Self {
            file_name,
            is_declaration_file,
            module,
        }
    }
}

/// Whether `file_name` names a TypeScript declaration file.
pub fn is_declaration_file_name(file_name: &str) -> bool {
    [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// Switches controlling how default exports are rewritten.
///
/// Deserializes from camelCase JSON (`keepOriginalExport`,
/// `allowNamedExports`); missing keys are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Keep the original default export next to the `export =` form.
    ///
    /// ```text
    /// export { foo as default, bar }
    /// //=> export { foo as default, bar }; export = foo
    /// ```
    pub keep_original_export: bool,

    /// Allow named exports to coexist with the rewritten default export.
    ///
    /// When false, a root file exporting both a default and named bindings
    /// fails the transform instead of silently losing the named ones.
    pub allow_named_exports: bool,
}

/// Which kinds of bindings a module exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSurface {
    pub has_default: bool,
    pub has_named: bool,
}

impl ExportSurface {
    /// Classify exported names: `default` versus everything else.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut surface = Self::default();
        for name in names {
            if name.as_ref() == DEFAULT_EXPORT_NAME {
                surface.has_default = true;
            } else {
                surface.has_named = true;
            }
        }
        surface
    }
}
