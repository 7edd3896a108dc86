//! Rewrites default exports into TypeScript's `export =` form.
//!
//! After CommonJS lowering `export = foo` becomes `module.exports = foo`, so
//! the default export turns into the module's whole export value instead of
//! a `default` property.
//!
//! Transforms (root files only):
//! - `export { foo as default }`     → `export = foo`
//! - `export default function foo()` → `function foo() {}; export = foo`
//! - `export default class Foo`      → `class Foo {}; export = Foo`
//! - `export default foo`            → `export = foo`

pub mod driver;
pub mod error;
pub mod roots;
pub mod rules;
pub mod surface;
pub mod synth;

#[cfg(test)]
pub(crate) mod test_utils;

pub use driver::{transform_default_export, Compilation, DefaultExportTransform};
pub use error::TransformError;
pub use roots::RootFiles;
pub use surface::{analyze_surface, ExportOracle, SyntacticExports};
