use std::fs::File;
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::OutputPaths;
use crate::error::CoordError;
use crate::fs_util::create_output;
use crate::reconcile::Accumulators;
use crate::report::{self, QcReport};

/// An opened output file remembering its path for error messages.
pub struct OutputFile {
    path: Utf8PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    pub fn create(path: &Utf8Path) -> Result<Self, CoordError> {
        Ok(Self {
            path: path.to_path_buf(),
            writer: create_output(path)?,
        })
    }

    /// Runs `f` against the writer, attaching the path to any I/O error.
    pub fn write_with<T, F>(&mut self, f: F) -> Result<T, CoordError>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<T>,
    {
        f(&mut self.writer).map_err(|err| self.write_error(err))
    }

    fn finish(mut self) -> Result<(), CoordError> {
        self.writer.flush().map_err(|err| self.write_error(err))?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|err| self.write_error(err))
    }

    fn write_error(&self, err: io::Error) -> CoordError {
        CoordError::Write {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

/// Every output of a run, opened together.
///
/// Handles close when this value drops, whichever way the run ends; `finish`
/// is the successful path and reports flush failures.
pub struct OutputFiles {
    pub load: OutputFile,
    pub curator_log: OutputFile,
    pub nomen_mismatch: OutputFile,
    pub chr_mismatch: OutputFile,
    pub multiple_coords: OutputFile,
}

impl OutputFiles {
    pub fn create(paths: &OutputPaths) -> Result<Self, CoordError> {
        Ok(Self {
            load: OutputFile::create(&paths.load_file)?,
            curator_log: OutputFile::create(&paths.curator_log)?,
            nomen_mismatch: OutputFile::create(&paths.nomen_mismatch_report)?,
            chr_mismatch: OutputFile::create(&paths.chr_mismatch_report)?,
            multiple_coords: OutputFile::create(&paths.multiple_coords_report)?,
        })
    }

    /// Renders every stream and returns the number of load lines written.
    pub fn emit(&mut self, acc: &Accumulators) -> Result<usize, CoordError> {
        let written = self
            .load
            .write_with(|out| report::write_load_file(out, acc))?;
        self.nomen_mismatch
            .write_with(|out| report::write_qc_report(out, QcReport::NomenMismatch, acc))?;
        self.chr_mismatch
            .write_with(|out| report::write_qc_report(out, QcReport::ChrMismatch, acc))?;
        self.multiple_coords
            .write_with(|out| report::write_qc_report(out, QcReport::MultipleCoords, acc))?;
        self.curator_log
            .write_with(|out| report::write_curator_log(out, acc))?;
        Ok(written)
    }

    pub fn finish(self) -> Result<(), CoordError> {
        let Self {
            load,
            curator_log,
            nomen_mismatch,
            chr_mismatch,
            multiple_coords,
        } = self;
        let results = [
            load.finish(),
            curator_log.finish(),
            nomen_mismatch.finish(),
            chr_mismatch.finish(),
            multiple_coords.finish(),
        ];
        results.into_iter().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub no_location: usize,
    pub no_external_id: usize,
    pub multiple_locations: usize,
    pub unknown_id: usize,
    pub chromosome_mismatch: usize,
    pub symbol_mismatch_loadable: usize,
}

impl OutcomeCounts {
    pub fn from_accumulators(acc: &Accumulators) -> Self {
        Self {
            no_location: acc.no_location.count(),
            no_external_id: acc.no_external_id.count(),
            multiple_locations: acc.multiple_coords.count(),
            unknown_id: acc.unknown_id.count(),
            chromosome_mismatch: acc.chromosome_mismatch.count(),
            symbol_mismatch_loadable: acc.symbol_mismatch().count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub registry_entries: usize,
    pub records: usize,
    pub load_lines: usize,
    pub counts: OutcomeCounts,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &RunSummary) -> io::Result<()> {
        let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
