use chrono::Utc;
use tracing::info;

use crate::config::ResolvedConfig;
use crate::error::CoordError;
use crate::feed::Feed;
use crate::fs_util::open_input;
use crate::output::{OutcomeCounts, OutputFiles, RunSummary};
use crate::reconcile::reconcile;
use crate::registry::{RegistryIndex, RegistrySource, TsvRegistrySource};

pub struct Pipeline<S: RegistrySource> {
    config: ResolvedConfig,
    registry: S,
}

impl Pipeline<TsvRegistrySource> {
    /// Uses the registry snapshot named by `config`.
    pub fn from_config(config: ResolvedConfig) -> Self {
        let registry = TsvRegistrySource::new(config.registry.clone(), config.organism.clone());
        Self::new(config, registry)
    }
}

impl<S: RegistrySource> Pipeline<S> {
    pub fn new(config: ResolvedConfig, registry: S) -> Self {
        Self { config, registry }
    }

    /// Runs every stage. Output handles opened here are closed on every return path.
    pub fn run(&self) -> Result<RunSummary, CoordError> {
        let started_at = Utc::now();

        let input = open_input(&self.config.input)?;
        let mut outputs = OutputFiles::create(&self.config.outputs)?;
        info!(input = %self.config.input, "opened input and output files");

        let index = RegistryIndex::build(&self.registry)?;

        let document = Feed::from_reader(input)?;
        info!(records = document.data.len(), "parsed input document");

        let acc = reconcile(&document.data, &index, &self.config.namespace);
        let counts = OutcomeCounts::from_accumulators(&acc);
        info!(
            no_location = counts.no_location,
            no_external_id = counts.no_external_id,
            multiple_locations = counts.multiple_locations,
            unknown_id = counts.unknown_id,
            chromosome_mismatch = counts.chromosome_mismatch,
            symbol_mismatch = counts.symbol_mismatch_loadable,
            "reconciled records"
        );

        let load_lines = outputs.emit(&acc)?;
        outputs.finish()?;
        info!(load_lines, "wrote load file and reports");

        Ok(RunSummary {
            input: self.config.input.to_string(),
            registry_entries: index.len(),
            records: acc.records_seen(),
            load_lines,
            counts,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
