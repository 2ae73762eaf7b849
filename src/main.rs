//! # Parecer CLI (`parecer`)
//!
//! The `parecer` binary submits documents for automated review and retrieves
//! past analyses.
//!
//! ## Usage
//!
//! ```bash
//! parecer --config ./config/parecer.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `parecer init` | Create the SQLite database and run schema migrations |
//! | `parecer analyze` | Analyze a document or pasted text and store the result |
//! | `parecer history <identifier>` | List stored analyses for an identifier |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! parecer init --config ./config/parecer.toml
//!
//! # Analyze a thesis chapter and write a PDF report
//! parecer analyze --file capitulo.docx --identifier ana@example.com --pdf-out parecer.pdf
//!
//! # Analyze pasted text with an explicit document type
//! parecer analyze --text "Escopo do projeto..." --identifier ana@example.com --doc-type scope
//!
//! # List past résumé analyses and regenerate their reports
//! parecer history ana@example.com --doc-type resume --pdf-dir ./reports
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use parecer::analyze::{self, AnalyzeRequest};
use parecer::config;
use parecer::history::{self, HistoryRequest};
use parecer::migrate;
use parecer::models::DocumentType;

/// Parecer CLI: document analysis with a hosted model, persisted locally.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/parecer.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "parecer",
    about = "Automated document review: classify, analyze with a hosted model, and archive",
    version,
    long_about = "Parecer classifies an uploaded document (thesis, resume, financial statement, \
    design material, project scope, or general), sends it to a hosted chat-completion model with \
    a type-specific rubric, stores the resulting analysis in SQLite, and can render each analysis \
    as a PDF report."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/parecer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the analyses table, then applies
    /// any pending column migrations. Safe to run multiple times.
    Init,

    /// Analyze a document and store the result.
    ///
    /// Reads a .docx, .pdf, .png, .jpeg, or plain-text file (or takes pasted
    /// text), determines the document type, asks the configured model for an
    /// analysis, and appends the result to the local archive.
    Analyze {
        /// Document file to analyze.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Pasted text to analyze instead of a file.
        #[arg(long)]
        text: Option<String>,

        /// Identifier the analysis is stored under (e.g. an email address).
        #[arg(long)]
        identifier: String,

        /// Document type: tcc, resume, financial, design, scope, or general.
        /// Omit to classify automatically.
        #[arg(long)]
        doc_type: Option<DocumentType>,

        /// Write the analysis as a PDF report to this path.
        #[arg(long)]
        pdf_out: Option<PathBuf>,
    },

    /// List stored analyses for an identifier, newest first.
    History {
        /// Identifier to look up (exact match).
        identifier: String,

        /// Filter by document type, or `all`.
        #[arg(long, default_value = "all")]
        doc_type: String,

        /// Regenerate one PDF report per listed analysis into this directory.
        #[arg(long)]
        pdf_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Analyze {
            file,
            text,
            identifier,
            doc_type,
            pdf_out,
        } => {
            analyze::run(
                &cfg,
                AnalyzeRequest {
                    file,
                    text,
                    identifier,
                    document_type: doc_type,
                    pdf_out,
                },
            )
            .await?;
        }
        Commands::History {
            identifier,
            doc_type,
            pdf_dir,
        } => {
            let document_type = match doc_type.as_str() {
                "all" => None,
                other => Some(other.parse::<DocumentType>().map_err(anyhow::Error::msg)?),
            };
            history::run(
                &cfg,
                HistoryRequest {
                    identifier,
                    document_type,
                    pdf_dir,
                },
            )
            .await?;
        }
    }

    Ok(())
}
