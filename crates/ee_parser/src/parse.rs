use anyhow::Result;
use ee_ast::{is_declaration_file_name, ParsedFile};
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{Syntax, TsSyntax};

/// Result of parsing a TypeScript source file.
pub struct ParseResult {
    pub file: ParsedFile,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Parse a TypeScript/TSX/declaration source string as a module.
///
/// Syntax errors are reported to stderr through an SWC handler and returned
/// as an error naming the file.
pub fn parse_file(source: &str, filename: &str) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let ts_syntax = Syntax::Typescript(TsSyntax {
        tsx: filename.ends_with(".tsx"),
        decorators: true,
        dts: is_declaration_file_name(filename),
        ..Default::default()
    });

    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        ts_syntax,
        EsVersion::latest(),
        Some(&comments),
        &mut vec![],
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    Ok(ParseResult {
        file: ParsedFile::new(filename, module),
        comments,
        source_map,
    })
}
