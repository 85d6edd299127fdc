//! Entity review CLI.
//!
//! Runs detection over a document and prints the grouped review list, so an
//! operator can decide what to censor before exporting a redacted copy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use autocensor::{
    CaseTogglePolicy, DetectOptions, Detector, DetectorConfig, FileTextExtractor, Label,
    LabelActivation, ReviewSession, ReviewView, TextExtractor,
};

/// Sensitive entity detection for legal documents
///
/// Detects names, organizations, DNI/NIE numbers, emails and phone numbers
/// and lists them grouped for review.
#[derive(Parser)]
#[command(name = "autocensor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect entities and print the grouped review list
    Analyze(AnalyzeArgs),

    /// Extract text from a document (for debugging and verification)
    Extract {
        /// Input document (PDF, DOCX or plain text)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Input document (PDF, DOCX or plain text)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Model language
    #[arg(long, default_value = "es")]
    language: String,

    /// Try smaller models first
    #[arg(long)]
    prefer_small: bool,

    /// Directory with <model>.json gazetteer models
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Skip the pattern matchers (IDs, email, phone)
    #[arg(long)]
    no_regex: bool,

    /// Skip the email and phone matchers
    #[arg(long)]
    no_email_phone: bool,

    /// Labels to show (can be specified multiple times; replaces the defaults)
    #[arg(short, long = "label", value_name = "LABEL")]
    labels: Vec<String>,

    /// Manual term to search for (can be specified multiple times)
    #[arg(short, long = "term", value_name = "TERM")]
    terms: Vec<String>,

    /// Term to leave out of the list (can be specified multiple times)
    #[arg(long = "ignore", value_name = "TERM")]
    ignore: Vec<String>,

    /// Match manual terms and group entries case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Print the review list as JSON
    #[arg(long)]
    json: bool,
}

/// Command handler with dependency injection.
struct ReviewHandler {
    extractor: Box<dyn TextExtractor>,
    verbose: bool,
}

impl ReviewHandler {
    fn new(verbose: bool) -> Self {
        Self {
            extractor: Box::new(FileTextExtractor::new()),
            verbose,
        }
    }

    fn read_text(&self, input: &Path) -> Result<String> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
        self.extractor
            .extract_text(input)
            .with_context(|| "Text extraction failed")
    }

    /// Runs detection and prints the grouped review list.
    fn analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let text = self.read_text(&args.input)?;
        if text.trim().is_empty() {
            println!("⚠ No text could be extracted from {}", args.input.display());
            return Ok(());
        }

        let mut config = DetectorConfig::default()
            .with_language(args.language.clone())
            .prefer_small(args.prefer_small);
        if let Some(dir) = &args.model_dir {
            config = config.with_model_dir(dir);
        }
        let detector = Detector::from_config(&config);

        let mut session = build_session(args);
        let options = DetectOptions {
            use_regex: !args.no_regex,
            include_email_phone: !args.no_email_phone,
        };
        session
            .analyze(&detector, &text, options)
            .with_context(|| "Entity detection failed")?;
        for term in &args.ignore {
            session.ignore(term);
        }

        if self.verbose {
            eprintln!("Input:    {}", args.input.display());
            eprintln!("Language: {}", args.language);
            eprintln!("Model:    {:?}", detector.recognizer().status());
            let active: Vec<_> = session.labels().active().iter().map(Label::to_string).collect();
            eprintln!("Labels:   {}", active.join(", "));
        }

        let view = session.view();
        if args.json {
            let json = serde_json::to_string_pretty(view)
                .with_context(|| "Failed to serialize review list")?;
            println!("{}", json);
        } else {
            print_view(view);
        }

        Ok(())
    }

    /// Extracts text from a document.
    fn extract(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let text = self.read_text(input)?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} characters → {}",
                text.chars().count(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }

        Ok(())
    }
}

/// Builds the review session from command-line options.
fn build_session(args: &AnalyzeArgs) -> ReviewSession {
    let labels = if args.labels.is_empty() {
        LabelActivation::default()
    } else {
        LabelActivation::only(args.labels.iter().map(|l| Label::parse(&l.to_uppercase())))
    };

    let mut session = ReviewSession::new()
        .with_labels(labels)
        .with_case_policy(CaseTogglePolicy::Deferred);
    session.set_case_sensitive(args.case_sensitive);
    for term in &args.terms {
        session.add_manual_term(term);
    }
    session
}

fn print_view(view: &ReviewView) {
    for entry in &view.entries {
        println!("{} (x{}) [{}]", entry.display_text, entry.count, entry.label);
    }
    println!(
        "Detected {} entities ({} groups)",
        view.detected,
        view.entries.len()
    );
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

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let handler = ReviewHandler::new(cli.verbose);

    match &cli.command {
        Commands::Analyze(args) => handler.analyze(args)?,
        Commands::Extract { input, output } => handler.extract(input, output.as_deref())?,
    }

    Ok(())
}
