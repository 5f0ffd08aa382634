//! folio - manuscript to EPUB converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::{BuildRequest, Config, Pipeline, StyleOptions, convert_batch, write_epub};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Convert manuscripts to EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio convert novel.txt novel.epub --author 홍길동
    folio preview novel.docx
    folio batch drafts/*.hwpx --output-dir books")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one manuscript (TXT, MD, PDF, DOCX, HWPX, HWP) to EPUB
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Book title (default: input file name)
        #[arg(long)]
        title: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Cover image (JPEG, PNG, GIF, WebP, SVG)
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,

        #[arg(long)]
        publisher: Option<String>,

        /// Series name
        #[arg(long)]
        series: Option<String>,

        /// Position within the series
        #[arg(long, requires = "series")]
        series_index: Option<u32>,

        /// Body font size in pixels
        #[arg(long, value_name = "PX")]
        font_size: Option<u32>,

        /// Line height multiplier
        #[arg(long)]
        line_height: Option<f32>,

        /// Language tag (e.g. ko, en)
        #[arg(long)]
        language: Option<String>,
    },

    /// Show the detected chapters without converting
    Preview {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert many manuscripts in parallel
    Batch {
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the generated EPUB files
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, folio::Error> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Convert {
            input,
            output,
            title,
            author,
            cover,
            publisher,
            series,
            series_index,
            font_size,
            line_height,
            language,
        } => {
            let style = (font_size.is_some() || line_height.is_some()).then(|| StyleOptions {
                font_size_px: font_size.unwrap_or(config.style.font_size_px),
                line_height: line_height.unwrap_or(config.style.line_height),
            });
            let request = BuildRequest {
                input,
                title,
                author,
                cover,
                publisher,
                series,
                series_index,
                style,
                language,
            };
            convert(Pipeline::new(config), &request, &output, cli.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Preview { input, json } => {
            preview(&Pipeline::new(config), &input, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch { inputs, output_dir } => {
            let report = convert_batch(&Pipeline::new(config), &inputs, &output_dir);
            for item in report.failures() {
                if let Err(e) = &item.result {
                    eprintln!("{}: {e}", item.input.display());
                }
            }
            println!("{} succeeded, {} failed", report.succeeded(), report.failed());
            Ok(if report.failed() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn convert(
    pipeline: Pipeline,
    request: &BuildRequest,
    output: &Path,
    quiet: bool,
) -> Result<(), folio::Error> {
    let book = pipeline.build(request)?;
    write_epub(&book, output)?;

    if !quiet {
        println!(
            "{} -> {} ({} chapters)",
            request.input.display(),
            output.display(),
            book.chapters().len()
        );
    }
    Ok(())
}

fn preview(pipeline: &Pipeline, input: &Path, json: bool) -> Result<(), folio::Error> {
    let preview = pipeline.preview(input)?;

    if json {
        let rendered = serde_json::to_string_pretty(&preview)
            .map_err(|e| folio::Error::Io(std::io::Error::other(e)))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("File: {}", input.display());
    println!("Chapters: {}", preview.total_chapters);
    println!("Characters: {}", preview.total_chars);
    for (i, chapter) in preview.chapters.iter().enumerate() {
        println!();
        println!("{:>3}. {} ({} chars)", i + 1, chapter.title, chapter.char_count);
        if !chapter.snippet.is_empty() {
            println!("     {}", chapter.snippet);
        }
    }
    let hidden = preview.total_chapters - preview.chapters.len();
    if hidden > 0 {
        println!();
        println!("... and {hidden} more");
    }
    Ok(())
}
