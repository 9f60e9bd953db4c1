use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use keyword_trends::compare::engine::{ComparisonEngine, NamedCondition};
use keyword_trends::corpus::dates::parse_date;
use keyword_trends::corpus::loader::read_corpus;
use keyword_trends::corpus::{Corpus, CorpusKind, CorpusSelector, CorpusSources};
use keyword_trends::output::terminal;
use keyword_trends::pipeline::analysis::{AnalysisCondition, Analyzer};
use keyword_trends::pipeline::cancel::CancelToken;
use keyword_trends::pipeline::concurrent::compare_concurrent;

mod config;

use config::Config;

/// Keyword Trends: period-based keyword frequency analysis.
///
/// Ranks the keywords of patent and paper CSV exports over a date range,
/// and compares rankings across several periods or corpora.
#[derive(Parser)]
#[command(name = "keyword-trends", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CorpusArgs {
    /// Patent CSV export (application date, titles, abstracts, claims)
    #[arg(long)]
    patents: Option<PathBuf>,

    /// Paper CSV export (post date, title, abstract, keywords)
    #[arg(long)]
    papers: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank keywords for one corpus selection and date range
    Analyze {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Which corpus to analyze: patent, paper or both
        #[arg(long, default_value = "both")]
        kind: CorpusSelector,

        /// First date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg, default_value = "2023-01-01")]
        start: chrono::NaiveDate,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg, default_value = "2024-12-31")]
        end: chrono::NaiveDate,

        /// Number of keywords to keep (default: KEYWORD_TRENDS_TOP_N or 100)
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Compare keyword rankings across two or more named conditions
    Compare {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Condition as NAME=KIND:START:END (repeat for each condition)
        #[arg(long = "condition", required = true)]
        conditions: Vec<NamedCondition>,

        /// Keywords kept per condition (default: KEYWORD_TRENDS_COMPARE_TOP_N or 50)
        #[arg(long)]
        top_n: Option<usize>,

        /// Conditions analyzed in parallel (default: KEYWORD_TRENDS_CONCURRENCY or 4)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Common keywords shown in the table (default: 20)
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("keyword_trends=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Analyze {
            corpus,
            kind,
            start,
            end,
            top_n,
        } => {
            let sources = load_sources(&corpus, &config)?;
            warn_missing(&sources, kind);

            let condition = AnalysisCondition::from_dates(kind, start, end)?;
            let top_n = config.top_n(top_n)?;

            let analyzer = Analyzer::standard();
            let cancel = cancel_on_ctrl_c();
            let result = tokio::task::spawn_blocking(move || {
                analyzer.analyze_with_cancel(&sources, &condition, top_n, &cancel)
            })
            .await
            .context("analysis worker panicked")??;

            if corpus.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_analysis(&result, top_n);
            }
        }

        Commands::Compare {
            corpus,
            conditions,
            top_n,
            concurrency,
            limit,
        } => {
            let sources = load_sources(&corpus, &config)?;
            for named in &conditions {
                warn_missing(&sources, named.condition.selector);
            }

            let top_n = config.compare_top_n(top_n)?;
            let concurrency = config.concurrency(concurrency)?;

            let result = compare_concurrent(
                Arc::new(ComparisonEngine::standard()),
                Arc::new(sources),
                conditions,
                top_n,
                concurrency,
                cancel_on_ctrl_c(),
            )
            .await?;

            if corpus.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_comparison(&result, limit);
            }
        }
    }

    Ok(())
}

fn parse_date_arg(raw: &str) -> Result<chrono::NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

/// Read whichever corpora were given on the command line or in the environment.
fn load_sources(args: &CorpusArgs, config: &Config) -> Result<CorpusSources> {
    let patents = args.patents.as_ref().or(config.patent_csv.as_ref());
    let papers = args.papers.as_ref().or(config.paper_csv.as_ref());
    Config::require_corpus(patents, papers)?;

    Ok(CorpusSources::new(
        patents.map(|p| load_csv(p, CorpusKind::Patent)).transpose()?,
        papers.map(|p| load_csv(p, CorpusKind::Paper)).transpose()?,
    ))
}

fn load_csv(path: &Path, kind: CorpusKind) -> Result<Corpus> {
    let file = File::open(path).with_context(|| format!("opening {kind} CSV {}", path.display()))?;
    let corpus =
        read_corpus(file).with_context(|| format!("parsing {kind} CSV {}", path.display()))?;
    info!(kind = %kind, rows = corpus.len(), path = %path.display(), "Corpus loaded");
    Ok(corpus)
}

/// Selecting a corpus that was never loaded is allowed but yields no data.
fn warn_missing(sources: &CorpusSources, selector: CorpusSelector) {
    for &kind in selector.kinds() {
        if sources.get(kind).is_none() {
            warn!(kind = %kind, "Selected corpus was not supplied; it will contribute no keywords");
        }
    }
}

/// A cancel token that fires on Ctrl-C.
fn cancel_on_ctrl_c() -> CancelToken {
    let cancel = CancelToken::new();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling analysis");
            handle.cancel();
        }
    });
    cancel
}
