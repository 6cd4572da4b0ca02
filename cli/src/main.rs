use anyhow::Result;
use clap::{Parser, Subcommand};
use ranker_cli::{create_output, load_index, load_queries, run_rank, RankOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank documents of an inverted index against queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every query in a queries file against an index
    Rank {
        /// Index JSON: {"term": {"doc_id": count}}
        #[arg(long)]
        index: PathBuf,
        /// Queries JSON: {"query_id": {"term": count}} or {"query_id": "free text"}
        #[arg(long)]
        queries: PathBuf,
        /// Term weighting: tf, tfidf or binary (defaults to $RANKER_WEIGHTING, then tfidf)
        #[arg(long)]
        weighting: Option<String>,
        /// Total number of documents for IDF; derived from the index when omitted
        #[arg(long)]
        corpus_size: Option<u32>,
        /// Keep only the top K documents per query
        #[arg(long)]
        limit: Option<usize>,
        /// Include scores in the output
        #[arg(long, default_value_t = false)]
        scores: bool,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { index, queries, weighting, corpus_size, limit, scores, output } => {
            let index = load_index(&index)?;
            let queries = load_queries(&queries)?;
            let opts = RankOptions { weighting, corpus_size, limit, scores };
            let n = match output {
                Some(path) => run_rank(&index, &queries, &opts, create_output(&path)?)?,
                None => run_rank(&index, &queries, &opts, io::stdout().lock())?,
            };
            tracing::info!(queries = n, "ranking complete");
            Ok(())
        }
    }
}
