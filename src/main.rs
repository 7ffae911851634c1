//! godox — extract documentation from a tree of Go source files.
//!
//! Prints the documentation model of every package under a directory as
//! JSON (default), markdown-style text or HTML, or serves it over HTTP:
//!
//! - `godox ./src`
//! - `godox -f html -o docs/ ./src`
//! - `godox --serve --addr 0.0.0.0:8080 ./src`

use anyhow::{Context, Result};
use clap::Parser;
use godox::render::{create_renderer, RenderOptions};
use godox::serve::{self, ServeConfig};
use godox::{extract, ExportPolicy, LoadOptions};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "godox",
    about = "Extract a structured documentation model from Go source trees"
)]
struct Cli {
    /// Root directory to scan recursively
    path: PathBuf,

    /// Output format: json (default), text, markdown, md, html
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Include unexported declarations and names
    #[arg(short = 'a', long)]
    all: bool,

    /// Keep same-named packages from different directories apart
    #[arg(long)]
    no_merge: bool,

    /// Ignore *_test.go files
    #[arg(long)]
    skip_tests: bool,

    /// Skip files whose root-relative path matches this glob.
    /// Can be specified multiple times. E.g. --exclude 'vendor/**'
    #[arg(short = 'e', long)]
    exclude: Vec<String>,

    /// Write to this file (or `index.<ext>` inside this directory)
    /// instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Serve the documentation over HTTP instead of printing it
    #[arg(short = 's', long)]
    serve: bool,

    /// Listen address for --serve
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// HTML template file. Supports ${title} and ${content} substitution.
    #[arg(short = 't', long)]
    template: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = LoadOptions {
        merge_directories: !cli.no_merge,
        skip_tests: cli.skip_tests,
        ..LoadOptions::default()
    }
    .with_excludes(&cli.exclude)?;
    let policy = if cli.all {
        ExportPolicy::All
    } else {
        ExportPolicy::Public
    };

    let render_options = RenderOptions {
        template: read_template(cli.template.as_deref())?,
    };

    let doc = extract(&cli.path, &options, policy)
        .with_context(|| format!("failed to extract documentation from {}", cli.path.display()))?;

    if cli.serve {
        let config = ServeConfig {
            addr: cli.addr,
            render: render_options,
        };
        let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        return rt.block_on(serve::serve(&doc, config));
    }

    let renderer = create_renderer(&cli.format, &render_options)?;
    let output = renderer.render(&doc)?;

    match cli.output {
        Some(ref path) => {
            let path = resolve_output(path, renderer.file_extension());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
            }
            fs::write(&path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn read_template(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let template = fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    Ok(Some(template))
}

/// An existing directory receives `index.<ext>`; anything else is the file.
fn resolve_output(path: &Path, ext: &str) -> PathBuf {
    if path.is_dir() {
        path.join(format!("index.{}", ext))
    } else {
        path.to_path_buf()
    }
}
