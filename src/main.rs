//! `cssdoc`: generate documentation from annotated stylesheet comments.
//!
//! Two modes:
//!
//! - **stdin mode**: `cssdoc < button.scss`
//! - **file mode**: `cssdoc -o docs/styles styles/*.scss`

use anyhow::{Context, Result};
use clap::Parser;
use cssdoc::render::{self, Renderer};
use cssdoc::{parse, ParseOptions, ParseResult, ParserConfiguration};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cssdoc",
    version,
    about = "Extract documentation from annotated stylesheet comments"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Keep comment whitespace as written (currently has no effect)
    #[arg(long)]
    preserve_whitespace: bool,

    /// Treat comment blocks without any @tag as a description
    #[arg(long)]
    untagged_description: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ParserConfiguration::default();
    config.set_untagged_description(cli.untagged_description);
    let options = ParseOptions {
        preserve_whitespace: cli.preserve_whitespace,
    };
    let renderer = render::create_renderer(&cli.format)?;

    if cli.files.is_empty() {
        return stdin_mode(renderer.as_ref(), &config, &options);
    }

    file_mode(&cli, renderer.as_ref(), &config, &options)
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn parse_text(source: &str, config: &ParserConfiguration, options: &ParseOptions) -> ParseResult {
    let mut parsed = ParseResult::default();
    parse(source, config, options, |result| parsed = result);
    parsed
}

/// stdin mode: read from stdin, write rendered output to stdout.
fn stdin_mode(
    renderer: &dyn Renderer,
    config: &ParserConfiguration,
    options: &ParseOptions,
) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let result = parse_text(&input, config, options);
    print!("{}", renderer.render(&result)?);
    Ok(())
}

/// file mode: one output file per input that yields any record.
fn file_mode(
    cli: &Cli,
    renderer: &dyn Renderer,
    config: &ParserConfiguration,
    options: &ParseOptions,
) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    let input_files = collect_sources(&cli.files)?;
    let ext = renderer.file_extension();

    for path in &input_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let result = parse_text(&content, config, options);
        // Nothing documented (e.g. plain partials)
        if result.blocks.is_empty() {
            debug!("no documented blocks in {}", path.display());
            continue;
        }

        let name = derive_output_name(path);
        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&result)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(
            records = result.blocks.len(),
            "wrote {}",
            out_path.display()
        );
    }

    Ok(())
}

/// File extensions recognized as stylesheet sources.
const SUPPORTED_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];

/// Resolve command-line inputs to stylesheet paths: plain files as given,
/// directories by their stylesheets (non-recursive), anything else as a glob.
fn collect_sources(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            sources.push(path.to_path_buf());
        } else if path.is_dir() {
            sources.extend(stylesheets_in(path)?);
        } else {
            let matched = glob_files(input)?;
            if matched.is_empty() {
                warn!("no files matched: {}", input);
            }
            sources.extend(matched);
        }
    }
    sources.sort();
    sources.dedup();
    Ok(sources)
}

fn stylesheets_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list stylesheet directory {}", dir.display()))?;
    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect())
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).with_context(|| format!("bad input pattern {:?}", pattern))?;
    Ok(paths.flatten().filter(|p| p.is_file()).collect())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// `styles/button.scss` is written as `button.<ext>`; partials keep their
/// underscore (`_grid.scss` → `_grid`).
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_scss() {
        assert_eq!(derive_output_name(Path::new("styles/button.scss")), "button");
        assert_eq!(derive_output_name(Path::new("_grid.scss")), "_grid");
    }

    #[test]
    fn output_name_without_extension() {
        assert_eq!(derive_output_name(Path::new("Stylesheet")), "Stylesheet");
    }

    #[test]
    fn supported_extensions() {
        assert!(has_supported_extension(Path::new("a.css")));
        assert!(has_supported_extension(Path::new("dir/a.less")));
        assert!(!has_supported_extension(Path::new("a.js")));
        assert!(!has_supported_extension(Path::new("Makefile")));
    }
}
