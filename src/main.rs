use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mdrender::{Config, HtmlOptions, compose_source};

#[derive(Parser)]
#[command(name = "mdrender")]
#[command(about = "Render Markdown to HTML, Typst markup, or PDF")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (defaults to input name with the target extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output target
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,

    /// TOML config file for export settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document title, prepended as a leading heading line
    #[arg(long)]
    title: Option<String>,

    /// Metadata tags (mode/tone/form), prepended as a leading line
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Append a streaming cursor marker (HTML target only)
    #[arg(long)]
    cursor: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Typst => "typ",
            Format::Pdf => "pdf",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let markdown = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let config = cli
        .config
        .as_deref()
        .map(Config::load)
        .unwrap_or_default();

    let tags: Vec<&str> = cli.tags.iter().map(String::as_str).collect();
    let source = compose_source(cli.title.as_deref(), &tags, &markdown);

    let bytes = match cli.format {
        Format::Html => {
            let opts = HtmlOptions {
                streaming: cli.cursor,
            };
            mdrender::markdown_to_html(&source, &opts).into_bytes()
        }
        Format::Typst => {
            mdrender::markdown_to_typst(&source, cli.title.as_deref(), &config).into_bytes()
        }
        Format::Pdf => {
            match mdrender::markdown_to_document(&source, cli.title.as_deref(), &config) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension(cli.format.extension()));

    if let Err(e) = fs::write(&output, bytes) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!("Created {}", output.display());
}
