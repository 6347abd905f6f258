//! Scholar Pubs - Entry Point
//!
//! `fetch` builds the list from Semantic Scholar; `bibtex`, `csv` and
//! `citations` convert local exports.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_pubs::{
    Config, Normalizer, Pipeline, PublicationEntry, ScholarClient,
    convert::{bibtex, citations, tabular},
    formatters,
    rules::Rules,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-pubs")]
#[command(about = "Build a clean publication list from Semantic Scholar or local exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding the built-in cleaning and filter rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, clean and deduplicate an author's papers from Semantic Scholar
    Fetch {
        /// Semantic Scholar author ID
        #[arg(long)]
        author_id: String,

        /// Semantic Scholar API key (optional, enables higher rate limits)
        #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
        api_key: Option<String>,

        /// Records requested per page
        #[arg(long, default_value = "50")]
        page_size: u32,

        /// Website YAML output
        #[arg(long, default_value = "publications.yml")]
        output: PathBuf,

        /// Detailed JSON output, including citation counts and paper IDs
        #[arg(long, default_value = "publications_detailed.json")]
        detailed: PathBuf,
    },

    /// Convert a BibTeX database
    Bibtex {
        /// Input `.bib` file
        #[arg(default_value = "citations.bib")]
        input: PathBuf,

        /// YAML output
        #[arg(default_value = "publications.yml")]
        output: PathBuf,
    },

    /// Convert a reference-manager CSV export
    Csv {
        /// Input CSV file
        #[arg(default_value = "references.csv")]
        input: PathBuf,

        /// YAML output
        #[arg(default_value = "publications.yml")]
        output: PathBuf,
    },

    /// Convert a numbered plain-text citation dump
    Citations {
        /// Input text file
        #[arg(default_value = "publications.txt")]
        input: PathBuf,

        /// YAML output
        #[arg(default_value = "publications.yml")]
        output: PathBuf,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_rules(path: Option<&Path>) -> anyhow::Result<Rules> {
    match path {
        Some(path) => Rules::from_file(path).with_context(|| format!("loading rules from {}", path.display())),
        None => Ok(Rules::default()),
    }
}

fn write_entries(output: &Path, entries: &[PublicationEntry]) -> anyhow::Result<()> {
    formatters::write_yaml(output, entries).with_context(|| format!("writing {}", output.display()))?;
    println!("Processed {} publications", entries.len());
    println!("Saved to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting scholar-pubs");

    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Command::Fetch { author_id, api_key, page_size, output, detailed } => {
            let mut config = Config::new(api_key.filter(|k| !k.is_empty()));
            config.page_size = page_size;
            if !config.has_api_key() {
                tracing::info!("No API key configured, using the shared rate limit");
            }

            let pipeline = Pipeline::from_config(&config, &rules)?;
            let client = ScholarClient::new(config)?;

            let report = pipeline.run(&client, &author_id).await;
            if report.fetch_truncated {
                tracing::warn!(kept = report.raw_count, "Fetch stopped early, the list may be incomplete");
            }

            let entries: Vec<PublicationEntry> = report.publications.iter().map(PublicationEntry::from).collect();
            formatters::write_yaml(&output, &entries)
                .with_context(|| format!("writing {}", output.display()))?;
            formatters::write_json(&detailed, &report.publications)
                .with_context(|| format!("writing {}", detailed.display()))?;

            println!("{}", formatters::format_summary(&report.publications));
            println!("\nSaved {} publications to {}", entries.len(), output.display());
            println!("Detailed data saved to {}", detailed.display());
        }
        Command::Bibtex { input, output } => {
            let normalizer = Normalizer::new(&rules.cleaning)?;
            let entries = bibtex::read_bibtex_file(&input, &normalizer)
                .with_context(|| format!("reading {}", input.display()))?;
            write_entries(&output, &entries)?;
        }
        Command::Csv { input, output } => {
            let entries =
                tabular::read_csv_file(&input).with_context(|| format!("reading {}", input.display()))?;
            write_entries(&output, &entries)?;
        }
        Command::Citations { input, output } => {
            let entries = citations::read_citations_file(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            write_entries(&output, &entries)?;
        }
    }

    Ok(())
}
