//! Per-file driver: root check, export surface, conflict policy, rewrite.

use ee_ast::{ParsedFile, TransformOptions};

use crate::error::TransformError;
use crate::roots::RootFiles;
use crate::rules::{Rewrite, Rewriter};
use crate::surface::{analyze_surface, ExportOracle};

/// Read-only state shared by every file of one compilation.
#[derive(Debug, Clone)]
pub struct Compilation<O> {
    pub roots: RootFiles,
    pub oracle: O,
}

impl<O: ExportOracle> Compilation<O> {
    pub fn new(roots: RootFiles, oracle: O) -> Self {
        Self { roots, oracle }
    }
}

/// The default-export transform, bound to a compilation and options.
///
/// Applies the same way to source files and to declaration files, so a host
/// can run it both before emitting JavaScript and after emitting `.d.ts`.
pub struct DefaultExportTransform<'a, O> {
    compilation: &'a Compilation<O>,
    options: TransformOptions,
}

impl<'a, O: ExportOracle> DefaultExportTransform<'a, O> {
    pub fn new(compilation: &'a Compilation<O>, options: TransformOptions) -> Self {
        Self {
            compilation,
            options,
        }
    }

    /// Rewrite the default export of `file`.
    ///
    /// Files outside the root set, scripts, and modules without a default
    /// export come back unchanged. A root file that also has named exports
    /// is rejected unless `allow_named_exports` is set.
    pub fn apply(&self, file: ParsedFile) -> Result<ParsedFile, TransformError> {
        if !self.compilation.roots.contains(&file.file_name) {
            tracing::debug!(file = %file.file_name, "not a root file, skipping");
            return Ok(file);
        }

        let Some(surface) = analyze_surface(&self.compilation.oracle, &file) else {
            tracing::debug!(file = %file.file_name, "no module symbol, skipping");
            return Ok(file);
        };

        tracing::debug!(
            file = %file.file_name,
            has_default = surface.has_default,
            has_named = surface.has_named,
            "export surface"
        );

        if !surface.has_default {
            return Ok(file);
        }

        if surface.has_named && !self.options.allow_named_exports {
            return Err(TransformError::NamedExportsConflict {
                file: file.file_name,
            });
        }

        Ok(rewrite_file(file, self.options))
    }
}

/// Build a host-facing transform for `compilation`.
pub fn transform_default_export<O: ExportOracle>(
    compilation: &Compilation<O>,
    options: TransformOptions,
) -> impl Fn(ParsedFile) -> Result<ParsedFile, TransformError> + '_ {
    let transform = DefaultExportTransform::new(compilation, options);
    move |file| transform.apply(file)
}

fn rewrite_file(mut file: ParsedFile, options: TransformOptions) -> ParsedFile {
    let mut rewriter = Rewriter::new(&file, options);
    let body = std::mem::take(&mut file.module.body);

    let mut rewritten = Vec::with_capacity(body.len());
    let mut matched = false;
    for item in body {
        let rewrite = rewriter.rewrite_item(item);
        matched |= matches!(rewrite, Rewrite::Replace(_));
        rewritten.extend(rewrite.into_items());
    }

    if !matched {
        tracing::warn!(
            file = %file.file_name,
            "module reports a default export but no default export form was found to rewrite"
        );
    }

    file.module.body = rewritten;
    file
}
