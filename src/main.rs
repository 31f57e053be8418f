use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use code_nexus::config::Config;
use code_nexus::constants;
use code_nexus::logging;
use code_nexus::metrics;
use code_nexus::pipeline::FaultPolicy;
use code_nexus::types::batch;
use code_nexus::{
    NexusManager, Pipeline, PipelineFormat, ProcessorKind, Stream, StreamItem, StreamKind,
};

#[derive(Parser)]
#[command(name = "code_nexus")]
#[command(about = "Polymorphic stream, processor and pipeline toolkit")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file (defaults to $NEXUS_CONFIG or nexus.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print stream results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sample streams, processors and pipelines
    Demo,
    /// Summarize a JSON batch with a stream
    Stream {
        /// Stream kind. Available: sensor, transaction, event
        #[arg(long)]
        kind: String,
        /// Optional filter criterion applied before summarizing (e.g. High-priority)
        #[arg(long)]
        filter: Option<String>,
        /// JSON array of items
        #[arg(value_name = "BATCH")]
        items: String,
    },
    /// Run a JSON item through the Input -> Transform -> Output pipeline
    Pipeline {
        /// Format label. Available: json, csv, stream
        #[arg(long, default_value = "stream")]
        format: String,
        /// JSON item (a bare word is treated as text)
        item: String,
    },
    /// Describe a JSON item with a processor
    Process {
        /// Processor kind. Available: numeric, text, log
        #[arg(long)]
        processor: String,
        /// JSON item (a bare word is treated as text)
        item: String,
    },
}

fn parse_item(raw: &str) -> StreamItem {
    serde_json::from_str(raw).unwrap_or_else(|_| StreamItem::from(raw))
}

fn config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| std::env::var(constants::CONFIG_ENV_VAR).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_CONFIG_PATH))
}

fn run_demo(config: &Config) {
    println!("=== CODE NEXUS ===\n");

    println!("Processors:");
    let samples = [
        (ProcessorKind::Numeric, StreamItem::from(vec![1, 2, 3, 4, 5])),
        (ProcessorKind::Text, StreamItem::from("Hello Nexus World")),
        (ProcessorKind::Log, StreamItem::from("ERROR: Connection timeout")),
    ];
    for (processor, item) in &samples {
        let result = processor.process(item);
        println!("   {}", processor.format_output(&result));
    }

    let mut manager = NexusManager::new();
    for (id, kind) in [
        ("SENSOR_001", StreamKind::Sensor),
        ("TRANS_001", StreamKind::Transaction),
        ("EVENT_001", StreamKind::Event),
    ] {
        manager.register(Stream::with_bounds(id, kind, config.filters));
    }

    println!("\nStreams:");
    let mut batches = HashMap::new();
    batches.insert("SENSOR_001".to_string(), batch(vec![20.0, 24.2]));
    batches.insert("TRANS_001".to_string(), batch(vec![10, 20, -5, 100]));
    batches.insert(
        "EVENT_001".to_string(),
        batch(vec!["login", "process", "logout"]),
    );
    for (id, summary) in manager.process_streams(&batches) {
        println!("   {}: {}", id, summary);
    }

    let sensor = Stream::with_bounds("SENSOR_001", StreamKind::Sensor, config.filters);
    let trans = Stream::with_bounds("TRANS_001", StreamKind::Transaction, config.filters);
    let alerts = sensor.filter_data(&batch(vec![100, 20, 22, -10]), Some(constants::HIGH_PRIORITY));
    let large = trans.filter_data(&batch(vec![10, 500, 20]), Some(constants::HIGH_PRIORITY));
    println!(
        "   Filtered: {} critical sensor alerts, {} large transaction",
        alerts.len(),
        large.len()
    );

    println!("\nPipelines:");
    let policy = FaultPolicy::from(&config.pipeline);
    let runs = [
        (
            "PIPE_JSON",
            PipelineFormat::Json,
            StreamItem::Record(
                json!({"sensor": "temp", "value": 23.5, "unit": "C"})
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            ),
        ),
        (
            "PIPE_CSV",
            PipelineFormat::Csv,
            StreamItem::from("user, action, timestamp"),
        ),
        (
            "PIPE_STREAM",
            PipelineFormat::Stream,
            StreamItem::from("Real-time sensor stream"),
        ),
        (
            "PIPE_STREAM",
            PipelineFormat::Stream,
            StreamItem::from(config.pipeline.fault_sentinel.as_str()),
        ),
    ];
    for (id, format, item) in runs {
        manager.register(Pipeline::standard(id, format).with_fault_policy(policy.clone()));
        if let Some(result) = manager.dispatch(id, item) {
            println!("   {} ({}): {}", id, format.as_str(), result);
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load_or_default(config_path(cli.config))
        .context("failed to load configuration")?;
    let _guard = logging::init_logging(&config.logging).context("failed to initialize logging")?;
    metrics::init_metrics();

    match cli.command {
        Commands::Demo => {
            info!("Running demo");
            run_demo(&config);
        }
        Commands::Stream {
            kind,
            filter,
            items,
        } => {
            let kind = StreamKind::parse(&kind).ok_or_else(|| {
                anyhow!(
                    "unknown stream kind '{}'. Available: {}",
                    kind,
                    constants::get_supported_stream_kinds().join(", ")
                )
            })?;
            let items: Vec<StreamItem> =
                serde_json::from_str(&items).context("batch must be a JSON array")?;

            let stream = Stream::with_bounds("CLI", kind, config.filters);
            let items = stream.filter_data(&items, filter.as_deref());
            let summary = stream.process_batch(&items);
            if cli.json {
                let report = json!({ "stats": stream.stats(), "summary": summary });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", summary);
            }
        }
        Commands::Pipeline { format, item } => {
            let format = PipelineFormat::parse(&format)
                .ok_or_else(|| anyhow!("unknown pipeline format '{}'", format))?;
            let pipeline = Pipeline::standard("CLI", format)
                .with_fault_policy(FaultPolicy::from(&config.pipeline));
            println!("{}", pipeline.run(parse_item(&item)));
        }
        Commands::Process { processor, item } => {
            let processor = ProcessorKind::parse(&processor)
                .ok_or_else(|| anyhow!("unknown processor '{}'", processor))?;
            let result = processor.process(&parse_item(&item));
            println!("{}", processor.format_output(&result));
        }
    }
    Ok(())
}
