use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ee_ast::TransformOptions;
use ee_codegen::emit_module;
use ee_parser::parse_file;
use ee_transform::{analyze_surface, Compilation, DefaultExportTransform, RootFiles, SyntacticExports};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ee",
    about = "export-equals — rewrite default exports into `export =` form"
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the default export of each root file and emit TypeScript.
    Transform {
        /// Input .ts/.tsx/.d.ts files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (single input only; stdout if omitted).
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,
        /// Directory to write outputs into, keeping file names.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Entry files to rewrite. Defaults to every input.
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
        /// JSON file with `keepOriginalExport` / `allowNamedExports`.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep the original default export next to `export =`.
        #[arg(long)]
        keep_original_export: bool,
        /// Allow named exports alongside the default export.
        #[arg(long)]
        allow_named_exports: bool,
    },
    /// Report a file's export surface and whether it would be rewritten.
    Check {
        input: PathBuf,
        #[arg(long)]
        allow_named_exports: bool,
    },
    /// Parse the file and dump the AST.
    Parse {
        input: PathBuf,
        /// Dump as JSON instead of debug output.
        #[arg(long)]
        ast: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Transform {
            inputs,
            output,
            out_dir,
            roots,
            config,
            keep_original_export,
            allow_named_exports,
        } => {
            if output.is_some() && inputs.len() > 1 {
                bail!("--output takes a single input; use --out-dir for several");
            }

            let mut options = match &config {
                Some(path) => load_options(path)?,
                None => TransformOptions::default(),
            };
            options.keep_original_export |= keep_original_export;
            options.allow_named_exports |= allow_named_exports;

            let roots = if roots.is_empty() { &inputs } else { &roots };
            let compilation = Compilation::new(
                RootFiles::new(roots.iter().map(|p| p.display().to_string())),
                SyntacticExports,
            );
            let transform = DefaultExportTransform::new(&compilation, options);

            let out_paths = match &out_dir {
                Some(dir) => {
                    let paths = output_paths(&inputs, dir)?;
                    std::fs::create_dir_all(dir)?;
                    Some(paths)
                }
                None => None,
            };

            for (index, input) in inputs.iter().enumerate() {
                let source = std::fs::read_to_string(input)
                    .with_context(|| format!("failed to read {}", input.display()))?;
                let filename = input.display().to_string();

                let parsed = parse_file(&source, &filename)?;
                let file = transform.apply(parsed.file)?;
                let code =
                    emit_module(&parsed.source_map, &file.module, Some(&parsed.comments))?;

                match (&output, &out_paths) {
                    (Some(path), _) => std::fs::write(path, &code)?,
                    (None, Some(paths)) => {
                        let path = &paths[index];
                        std::fs::write(path, &code)?;
                        tracing::debug!(path = %path.display(), "wrote output");
                    }
                    (None, None) => print!("{code}"),
                }
            }
        }
        Commands::Check {
            input,
            allow_named_exports,
        } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();
            let parsed = parse_file(&source, &filename)?;

            match analyze_surface(&SyntacticExports, &parsed.file) {
                None => eprintln!("{filename}: script (no exports), left unchanged"),
                Some(surface) if !surface.has_default => {
                    eprintln!("{filename}: no default export, left unchanged")
                }
                Some(surface) if surface.has_named && !allow_named_exports => {
                    bail!(
                        "{filename}: default export next to named exports; \
                         pass --allow-named-exports to rewrite it anyway"
                    )
                }
                Some(surface) => eprintln!(
                    "{filename}: default export would be rewritten (named exports: {})",
                    surface.has_named
                ),
            }
        }
        Commands::Parse { input, ast } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();
            let parsed = parse_file(&source, &filename)?;

            if ast {
                let json = serde_json::to_string_pretty(&parsed.file.module)?;
                println!("{json}");
            } else {
                println!("{:#?}", parsed.file.module);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(path: &Path) -> Result<TransformOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Where each input lands under `out_dir`.
///
/// Inputs keep their file names, so two inputs sharing a name would write
/// the same path; that is rejected before anything is written.
fn output_paths(inputs: &[PathBuf], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<&OsStr, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input
            .file_name()
            .with_context(|| format!("{} has no file name", input.display()))?;
        if let Some(previous) = seen.insert(name, input) {
            bail!(
                "{} and {} would both be written to {}; use --output per file or rename one",
                previous.display(),
                input.display(),
                out_dir.join(name).display()
            );
        }
        paths.push(out_dir.join(name));
    }
    Ok(paths)
}
