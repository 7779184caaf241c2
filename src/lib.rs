pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod sheet;
pub mod table;
pub mod validate;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{AnalyzeArgs, Cli, Commands, RunArgs, SampleArgs, SourceArgs},
    config::FilterConfig,
    filter::Clause,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet_filter", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => handle_run(&args),
        Commands::Analyze(args) => handle_analyze(&args),
        Commands::Columns(args) => handle_columns(&args),
        Commands::Sample(args) => handle_sample(&args),
    }
}

/// Loads the optional config file and applies command-line overrides.
pub fn resolve_config(source: &SourceArgs) -> Result<FilterConfig> {
    let mut config = match &source.config {
        Some(path) => FilterConfig::load(path)?,
        None => FilterConfig::default(),
    };
    if let Some(input) = &source.input {
        config.input = input.clone();
    }
    if let Some(sheet) = &source.sheet {
        config.sheet = sheet.clone();
    }
    if source.strict {
        config.lenient = false;
    }
    Ok(config)
}

fn handle_run(args: &RunArgs) -> Result<()> {
    let mut config = resolve_config(&args.source)?;
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if !args.conditions.is_empty() {
        config.clauses = args
            .conditions
            .iter()
            .map(|raw| Clause::parse(raw))
            .collect::<Result<Vec<_>>>()?;
    }
    config.required_columns.extend(normalize_columns(&args.require));
    let columns = normalize_columns(&args.columns);
    if !columns.is_empty() {
        config.analyze_columns = columns;
    }
    if let Some(top) = args.top {
        config.top = top;
    }
    if let Some(preview) = args.preview {
        config.preview_rows = preview;
    }
    debug!("Resolved configuration: {config:?}");

    let run = pipeline::run(&config)?;
    print!(
        "{}",
        report::render_run(&run, config.top, config.preview_rows)
    );
    Ok(())
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    let mut config = resolve_config(&args.source)?;
    let columns = normalize_columns(&args.columns);
    if !columns.is_empty() {
        config.analyze_columns = columns;
    }
    let top = args.top.unwrap_or(config.top);
    let sheet = pipeline::loader_for(&config).load(&config.input, &config.sheet)?;
    let distributions = frequency::analyze(&sheet, &config.analyzed());
    if args.json {
        let json = serde_json::to_string_pretty(&distributions)
            .context("Serializing distributions to JSON")?;
        println!("{json}");
    } else {
        println!("Total rows: {}", sheet.row_count());
        println!("Total columns: {}", sheet.column_count());
        println!();
        print!("{}", report::render_distributions(&distributions, top));
    }
    info!(
        "Analyzed {} column(s) across {} row(s)",
        distributions.len(),
        sheet.row_count()
    );
    Ok(())
}

fn handle_columns(args: &SourceArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let sheet = pipeline::loader_for(&config).load(&config.input, &config.sheet)?;
    if sheet.column_count() == 0 {
        info!("Sheet '{}' has no columns", sheet.name());
        return Ok(());
    }
    let rows = sheet
        .headers()
        .iter()
        .enumerate()
        .map(|(idx, name)| vec![(idx + 1).to_string(), name.clone()])
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "name".to_string()];
    table::print_table(&headers, &rows);
    info!(
        "Listed {} column(s) from sheet '{}'",
        sheet.column_count(),
        sheet.name()
    );
    Ok(())
}

fn handle_sample(args: &SampleArgs) -> Result<()> {
    sample::write_sample_workbook(&args.output)?;
    Ok(())
}

fn normalize_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect()
}
