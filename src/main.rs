//! `pbxproj` CLI: parse a project file and print it back out.
//!
//! ```sh
//! # Reformat with generated object labels (the default)
//! pbxproj App.xcodeproj/project.pbxproj
//!
//! # Drop all comments and write to a file
//! pbxproj project.pbxproj --comments strip -o clean.pbxproj
//!
//! # Dump the parsed tree as JSON
//! pbxproj project.pbxproj --format json
//! ```

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use miette::{IntoDiagnostic, Result, WrapErr};
use pbxproj_core::{parse_with_options, serialize, CommentStrategy, ParseOptions, SerializeOptions};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Comments {
    Strip,
    Generate,
    Preserve,
}

impl From<Comments> for CommentStrategy {
    fn from(mode: Comments) -> Self {
        match mode {
            Comments::Strip => CommentStrategy::Strip,
            Comments::Generate => CommentStrategy::Generate,
            Comments::Preserve => CommentStrategy::Preserve,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pbxproj,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    name = "pbxproj",
    version,
    about = "Parse and re-serialize Xcode .pbxproj files"
)]
struct Cli {
    /// Project file to read
    file: Option<PathBuf>,

    /// How object entries are annotated with comments
    #[arg(long, value_enum, default_value = "generate")]
    comments: Comments,

    /// Spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "pbxproj")]
    format: Format,

    /// Maximum dictionary/array nesting accepted by the parser
    #[arg(long)]
    max_depth: Option<usize>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let Some(path) = cli.file else {
        eprintln!("Usage: pbxproj path/to/project.pbxproj");
        process::exit(1);
    };

    let source = fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let mut parse_options = ParseOptions::new().with_file_name(path.display().to_string());
    if let Some(max_depth) = cli.max_depth {
        parse_options = parse_options.with_max_depth(max_depth);
    }
    let doc = parse_with_options(&source, parse_options)?;
    info!("parsed {} objects from {}", doc.objects.len(), path.display());

    let rendered = match cli.format {
        Format::Pbxproj => {
            let options = SerializeOptions::new()
                .with_comment_strategy(cli.comments.into())
                .with_indent(cli.indent);
            serialize(&doc, &options)
        }
        Format::Json => doc.to_json().into_diagnostic()?,
        Format::Yaml => doc.to_yaml().into_diagnostic()?,
    };

    match cli.output {
        Some(out) => fs::write(&out, rendered + "\n")
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", out.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
