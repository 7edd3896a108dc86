//! Prints transformed modules back to TypeScript.
//!
//! SWC prints `export = <expr>` without a terminating `;`, so a following
//! statement that starts with `(` or `[` would be read as part of the
//! exported expression. Items are therefore emitted one at a time and every
//! export assignment is closed explicitly.

use anyhow::Result;
use ee_ast::{EsVersion, Module, ModuleDecl, ModuleItem};
use swc_common::{
    comments::{Comment, CommentKind, Comments},
    sync::Lrc,
    BytePos, SourceMap, DUMMY_SP,
};
use swc_ecma_codegen::{
    text_writer::{JsWriter, WriteJs},
    Emitter, Node,
};

/// Print `module` as TypeScript, with comments from `comments` if given.
pub fn emit_module(
    source_map: &Lrc<SourceMap>,
    module: &Module,
    comments: Option<&dyn Comments>,
) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::latest()),
            cm: source_map.clone(),
            comments,
            wr: writer,
        };

        if let Some(shebang) = &module.shebang {
            emitter.wr.write_punct(None, "#!", false)?;
            emitter.wr.write_str_lit(DUMMY_SP, shebang)?;
            emitter.wr.write_line()?;
        }

        for item in &module.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::TsExportAssignment(assign)) => {
                    assign.emit_with(&mut emitter)?;
                    emitter.wr.write_semi(None)?;
                    write_comments(&mut emitter.wr, take_trailing(comments, assign.span.hi))?;
                }
                item => item.emit_with(&mut emitter)?,
            }
            emitter.wr.write_line()?;
        }

        // Comments after the last item belong to the module itself.
        write_comments(&mut emitter.wr, take_trailing(comments, module.span.hi))?;
    }

    Ok(String::from_utf8(buf)?)
}

fn take_trailing(comments: Option<&dyn Comments>, pos: BytePos) -> Vec<Comment> {
    match comments {
        Some(comments) if !pos.is_dummy() => comments.take_trailing(pos).unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn write_comments<W: WriteJs>(wr: &mut W, comments: Vec<Comment>) -> Result<()> {
    for comment in comments {
        match comment.kind {
            CommentKind::Line => {
                wr.write_comment(" //")?;
                wr.write_comment(&comment.text)?;
                wr.write_line()?;
            }
            CommentKind::Block => {
                wr.write_comment(" /*")?;
                wr.write_comment(&comment.text)?;
                wr.write_comment("*/")?;
            }
        }
    }
    Ok(())
}
