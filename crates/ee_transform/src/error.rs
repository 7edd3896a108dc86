use thiserror::Error;

/// Errors raised while rewriting a root file.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The file exports named bindings next to its default export and
    /// `allow_named_exports` is off; rewriting would lose the named ones.
    #[error(
        "Unable to transform the default export of the module \"{file}\". \
         The module has named exports, which could be lost during the transformation. \
         To ignore this, set the `allowNamedExports` option to `true`"
    )]
    NamedExportsConflict { file: String },
}
