use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

use nurse_data::app::aggregate_use_case::AggregateUseCase;
use nurse_data::app::enrich_use_case::EnrichUseCase;
use nurse_data::app::sync_use_case::SyncUseCase;
use nurse_data::config::Config;
use nurse_data::constants::ENRICHED_TIMESTAMP_FORMAT;
use nurse_data::infra::{JsonFileEnrichedOutput, JsonFileProfileOutput};
use nurse_data::logging;
use nurse_data::pipeline::ingestion::{corpus::analyze_corpus, name_sheet::load_names};
use nurse_data::pipeline::processing::DefaultEnricher;

#[derive(Parser)]
#[command(name = "nurse_data")]
#[command(about = "Data preparation for the nurse-matching engine")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (defaults to $NURSE_DATA_CONFIG, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate per-visit CSV exports into nurse profiles and a quality report
    Aggregate {
        /// CSV source (repeatable). Replaces the configured engine sources
        #[arg(long = "input")]
        inputs: Vec<PathBuf>,
        /// Directory for nurses.json and the quality report
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Enrich a name sheet with synthetic profile attributes
    Enrich {
        /// Spreadsheet (or CSV) with id, first_name, last_name columns
        #[arg(long)]
        names: Option<PathBuf>,
        /// Existing nurses.json used as the reference distribution
        #[arg(long)]
        corpus: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Report the local dataset size (provider sync is not implemented)
    Sync {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = logging::init_logging(&config.logging.directory, &config.logging.file_prefix);

    match cli.command {
        Commands::Aggregate { inputs, output_dir } => {
            println!("🔄 Aggregating nurse visit data...");
            if !inputs.is_empty() {
                config.aggregate.inputs = inputs;
            }
            if let Some(dir) = output_dir {
                config.aggregate.output_dir = dir;
            }

            let output = JsonFileProfileOutput::new(
                config.aggregate.profiles_path(),
                config.aggregate.report_path(),
            )?;
            let use_case = AggregateUseCase::new(Box::new(output));
            let outcome = use_case.run(&config.aggregate.sources())?;

            println!(
                "✅ Nurses data processing completed: {} visits → {} profiles",
                outcome.visits, outcome.profiles
            );
        }
        Commands::Enrich {
            names,
            corpus,
            output,
            seed,
        } => {
            println!("🚀 Enriching nurse profiles...");
            let enrich = &mut config.enrich;
            if let Some(path) = names {
                enrich.names_path = path;
            }
            if let Some(path) = corpus {
                enrich.corpus_path = path;
            }
            if let Some(path) = output {
                enrich.output_path = path;
            }
            if let Some(seed) = seed {
                enrich.seed = seed;
            }

            let rows = load_names(&enrich.names_path).context("Failed to load nurse names")?;
            let patterns = analyze_corpus(&enrich.corpus_path).context("Failed to analyze existing profiles")?;
            let updated_at = Local::now().format(ENRICHED_TIMESTAMP_FORMAT).to_string();
            let enricher = DefaultEnricher::new(patterns, updated_at)?;

            let use_case = EnrichUseCase::new(
                Box::new(enricher),
                Box::new(JsonFileEnrichedOutput::new(&enrich.output_path)?),
                enrich.progress_interval,
            );

            info!(seed = enrich.seed, "Seeding random generator");
            let mut rng = StdRng::seed_from_u64(enrich.seed);
            let summary = use_case.run(&rows, &mut rng)?;

            println!(
                "✅ Saved {} enriched nurse profiles to {}",
                summary.total,
                enrich.output_path.display()
            );
        }
        Commands::Sync { csv } => {
            println!("🔄 Nurse data sync");
            let csv_path = csv.unwrap_or(config.sync.csv_path);
            let report = SyncUseCase::new(csv_path).run()?;
            println!("📊 Current dataset: {} nurses", report.nurses);
        }
    }
    Ok(())
}
