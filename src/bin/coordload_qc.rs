use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use coordload_qc::app::Pipeline;
use coordload_qc::config::{ConfigLoader, Settings};
use coordload_qc::output::{JsonOutput, RunSummary};

/// Paths not given as flags fall back to the environment, then to `--config`.
#[derive(Parser)]
#[command(name = "coordload-qc")]
#[command(about = "Reconcile a gene coordinate feed against the gene registry and write load/QC files")]
#[command(version, author)]
struct Cli {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    input: Option<Utf8PathBuf>,

    #[arg(long)]
    registry: Option<Utf8PathBuf>,

    #[arg(long)]
    load_file: Option<Utf8PathBuf>,

    #[arg(long)]
    curator_log: Option<Utf8PathBuf>,

    #[arg(long)]
    nomen_mismatch_report: Option<Utf8PathBuf>,

    #[arg(long)]
    chr_mismatch_report: Option<Utf8PathBuf>,

    #[arg(long)]
    multiple_coords_report: Option<Utf8PathBuf>,

    #[arg(long, help = "Cross-reference namespace holding the external gene id")]
    namespace: Option<String>,

    #[arg(long, help = "Organism kept from the registry snapshot")]
    organism: Option<String>,

    #[arg(long, help = "Print a JSON run summary on stdout")]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            input: self.input.clone(),
            load_file: self.load_file.clone(),
            curator_log: self.curator_log.clone(),
            nomen_mismatch_report: self.nomen_mismatch_report.clone(),
            chr_mismatch_report: self.chr_mismatch_report.clone(),
            multiple_coords_report: self.multiple_coords_report.clone(),
            registry: self.registry.clone(),
            namespace: self.namespace.clone(),
            organism: self.organism.clone(),
        }
    }
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        println!("{report:?}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref(), cli.overrides())?;
    let summary = Pipeline::from_config(config).run()?;

    if cli.json {
        JsonOutput::print_summary(&summary).into_diagnostic()?;
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let counts = &summary.counts;
    println!("coordload-qc: {} records from {}", summary.records, summary.input);
    println!("  loaded lines:         {}", summary.load_lines);
    println!("  symbol mismatches:    {}", counts.symbol_mismatch_loadable);
    println!("  chromosome mismatch:  {}", counts.chromosome_mismatch);
    println!("  multiple coordinates: {}", counts.multiple_locations);
    println!("  unknown ids:          {}", counts.unknown_id);
    println!("  no external id:       {}", counts.no_external_id);
    println!("  no location:          {}", counts.no_location);
}
