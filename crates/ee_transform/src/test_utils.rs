use ee_ast::{is_declaration_file_name, EsVersion, Module, ParsedFile};
use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_parser::{Syntax, TsSyntax};

pub(crate) struct TestFile {
    pub file: ParsedFile,
    pub source_map: Lrc<SourceMap>,
}

/// Parse `code` as a TypeScript module (a declaration file when `file_name`
/// ends in `.d.ts`).
pub(crate) fn parse(code: &str, file_name: &str) -> TestFile {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(file_name.to_string())),
        code.to_string(),
    );

    let syntax = Syntax::Typescript(TsSyntax {
        dts: is_declaration_file_name(file_name),
        ..Default::default()
    });
    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax,
        EsVersion::latest(),
        None,
        &mut vec![],
    )
    .unwrap();

    TestFile {
        file: ParsedFile::new(file_name, module),
        source_map,
    }
}

pub(crate) fn print(source_map: &Lrc<SourceMap>, module: &Module) -> String {
    ee_codegen::emit_module(source_map, module, None).unwrap()
}

/// Drop all whitespace so comparisons don't depend on codegen layout.
pub(crate) fn squash(code: &str) -> String {
    code.split_whitespace().collect()
}
