//! TypeScript front-end for export-equals.
//!
//! Wraps the standard SWC parser and packages its output as a
//! [`ParsedFile`](ee_ast::ParsedFile). The file name decides the dialect:
//!
//! - `.tsx` enables JSX
//! - `.d.ts` / `.d.mts` / `.d.cts` parse as ambient declaration files

pub mod parse;

pub use parse::{parse_file, ParseResult};
