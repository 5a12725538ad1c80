//! epub2zefania - ePub chapter HTML to Zefania XML

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use epub2zefania::convert::DEFAULT_EXTENSION;
use epub2zefania::{BibleInfo, ConvertOptions, ConvertSummary, WriteOptions, convert_directory};

#[derive(Parser)]
#[command(name = "epub2zefania")]
#[command(version, about = "Convert ePub chapter HTML into a Zefania XML Bible", long_about = None)]
#[command(after_help = "EXAMPLES:
    epub2zefania                           Convert ./OPS to ./bible_output.xml
    epub2zefania book/OEBPS rv1909.xml     Convert a specific directory
    epub2zefania OPS out.xml --language SPA --bible-name \"Reina-Valera 1909\"")]
struct Cli {
    /// Directory holding the chapter HTML files
    #[arg(value_name = "INPUT_DIR", default_value = "OPS")]
    input: PathBuf,

    /// Zefania XML file to write
    #[arg(value_name = "OUTPUT", default_value = "bible_output.xml")]
    output: PathBuf,

    /// Chapter file extension
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// biblename attribute of the root element
    #[arg(long, value_name = "NAME")]
    bible_name: Option<String>,

    /// INFORMATION/title
    #[arg(long)]
    title: Option<String>,

    /// INFORMATION/description
    #[arg(long)]
    description: Option<String>,

    /// INFORMATION/publisher
    #[arg(long)]
    publisher: Option<String>,

    /// INFORMATION/date
    #[arg(long)]
    date: Option<String>,

    /// INFORMATION/language
    #[arg(long)]
    language: Option<String>,

    /// Write the XML on a single line
    #[arg(long)]
    compact: bool,

    /// Print the conversion summary as JSON
    #[arg(long)]
    json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn bible_info(&self) -> BibleInfo {
        let mut info = BibleInfo::default();
        if let Some(ref name) = self.bible_name {
            info = info.with_bible_name(name);
        }
        if let Some(ref title) = self.title {
            info = info.with_title(title);
        }
        if let Some(ref description) = self.description {
            info = info.with_description(description);
        }
        if let Some(ref publisher) = self.publisher {
            info = info.with_publisher(publisher);
        }
        if let Some(ref date) = self.date {
            info = info.with_date(date);
        }
        if let Some(ref language) = self.language {
            info = info.with_language(language);
        }
        info
    }

    fn options(&self) -> ConvertOptions {
        let write = if self.compact {
            WriteOptions::compact()
        } else {
            WriteOptions::default()
        };
        ConvertOptions::new()
            .with_extension(&self.extension)
            .with_info(self.bible_info())
            .with_write_options(write)
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("epub2zefania={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match convert_directory(&cli.input, &cli.output, &cli.options()) {
        Ok(summary) => {
            if let Err(e) = report(&summary, cli.json, cli.quiet) {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn report(summary: &ConvertSummary, json: bool, quiet: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(summary).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!("Output: {}", summary.output.display());
    println!("Books: {}", summary.books);
    println!("Chapters: {}", summary.chapters);
    println!("Verses: {}", summary.verses);
    if summary.skipped > 0 {
        println!(
            "Skipped: {} of {} files (no <h3> title)",
            summary.skipped, summary.files
        );
    }
    Ok(())
}
