use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medsimplify_core::{ErrorClass, ExtractedText, OpenAiBackend, ServiceConfig, Simplifier};
use medsimplify_ingest::TextExtractor;

mod output;

use output::ColorMode;

/// Medical instruction simplifier - rewrite medical instructions in plain language
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text extracted from a .txt, .md, .csv, or .pdf file
    Extract {
        /// Path to the file
        file_path: PathBuf,
    },

    /// Rewrite instructions from a file or from --text in plain language
    Simplify {
        /// Path to a .txt, .md, .csv, or .pdf file
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        file_path: Option<PathBuf>,

        /// Instructions to simplify, given inline
        #[arg(long)]
        text: Option<String>,
    },
}

/// A failure already classified for reporting.
struct Failure {
    class: ErrorClass,
    message: String,
}

impl Failure {
    fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the extracted or simplified text.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let color = ColorMode(!cli.no_color);
    let mut stdout = std::io::stdout();

    // Only classified failures exit 1 here; stdout write errors propagate as-is.
    match cli.command {
        Command::Extract { file_path } => match read_and_extract(&file_path) {
            Ok(extracted) => output::print_extracted(&mut stdout, &extracted, color)?,
            Err(failure) => exit_with(failure, color)?,
        },
        Command::Simplify { file_path, text } => {
            match simplify(file_path.as_deref(), text).await {
                Ok(result) => output::print_simplified(&mut stdout, &result, color)?,
                Err(failure) => exit_with(failure, color)?,
            }
        }
    }

    Ok(())
}

fn exit_with(failure: Failure, color: ColorMode) -> anyhow::Result<()> {
    output::print_error(&mut std::io::stderr(), failure.class, &failure.message, color)?;
    std::process::exit(1);
}

async fn simplify(file_path: Option<&Path>, text: Option<String>) -> Result<String, Failure> {
    let raw_text = match (file_path, text) {
        (Some(path), _) => read_and_extract(path)?.text,
        (None, Some(text)) => text,
        (None, None) => String::new(),
    };

    if raw_text.trim().is_empty() {
        return Err(Failure::new(ErrorClass::InputValidation, "No text provided"));
    }

    let config = ServiceConfig::from_env()
        .map_err(|e| Failure::new(ErrorClass::DependencyUnavailable, e.to_string()))?;
    let backend = OpenAiBackend::from_config(&config)
        .map_err(|e| Failure::new(e.class(), e.to_string()))?;
    tracing::debug!(model = backend.model(), "resolved model");
    let simplifier = Simplifier::new(Arc::new(backend));
    tracing::debug!(backend = simplifier.backend_name(), "simplifying");

    simplifier
        .simplify(&raw_text)
        .await
        .map_err(|e| Failure::new(e.class(), e.to_string()))
}

fn read_and_extract(file_path: &Path) -> Result<ExtractedText, Failure> {
    let data = std::fs::read(file_path).map_err(|e| {
        Failure::new(
            ErrorClass::InputValidation,
            format!("Failed to read {}: {}", file_path.display(), e),
        )
    })?;

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    TextExtractor::with_default_backends()
        .extract(&file_name, &data)
        .map_err(|e| Failure::new(e.class(), e.to_string()))
}
