use std::collections::HashMap;
use std::io::{BufRead, BufReader};

use camino::Utf8PathBuf;
use tracing::{debug, info};

use crate::domain::ExternalId;
use crate::error::CoordError;
use crate::fs_util::open_input;

pub const DEFAULT_ORGANISM: &str = "human";
const OFFICIAL_STATUS: &str = "official";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub external_id: ExternalId,
    pub symbol: String,
    pub chromosome: String,
}

/// The authoritative store of official gene records for one organism.
pub trait RegistrySource {
    fn official_entries(&self) -> Result<Vec<RegistryEntry>, CoordError>;
}

/// Reads a tab-delimited registry export.
///
/// The first non-comment line names the columns. `external_id`, `symbol` and
/// `chromosome` are required; `organism` and `status` narrow the rows to the
/// configured organism's official records when present.
#[derive(Debug, Clone)]
pub struct TsvRegistrySource {
    path: Utf8PathBuf,
    organism: String,
}

impl TsvRegistrySource {
    pub fn new(path: impl Into<Utf8PathBuf>, organism: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            organism: organism.into(),
        }
    }

    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<RegistryEntry>, CoordError> {
        let mut columns: Option<Columns> = None;
        let mut entries = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|err| CoordError::RegistryUnavailable(err.to_string()))?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();

            let Some(cols) = &columns else {
                columns = Some(Columns::from_header(&fields, line_no)?);
                continue;
            };

            if fields.len() < cols.width {
                return Err(CoordError::RegistryParse {
                    line: line_no,
                    message: format!("expected {} columns, found {}", cols.width, fields.len()),
                });
            }
            if let Some(organism) = cols.organism {
                if !fields[organism].trim().eq_ignore_ascii_case(&self.organism) {
                    continue;
                }
            }
            if let Some(status) = cols.status {
                if !fields[status].trim().eq_ignore_ascii_case(OFFICIAL_STATUS) {
                    continue;
                }
            }

            let external_id = fields[cols.external_id]
                .parse::<ExternalId>()
                .map_err(|err| CoordError::RegistryParse {
                    line: line_no,
                    message: err.to_string(),
                })?;
            entries.push(RegistryEntry {
                external_id,
                symbol: fields[cols.symbol].trim().to_string(),
                chromosome: fields[cols.chromosome].trim().to_string(),
            });
        }

        if columns.is_none() {
            return Err(CoordError::RegistryParse {
                line: 0,
                message: "missing header row".to_string(),
            });
        }
        Ok(entries)
    }
}

impl RegistrySource for TsvRegistrySource {
    fn official_entries(&self) -> Result<Vec<RegistryEntry>, CoordError> {
        let reader = open_input(&self.path).map_err(|err| {
            CoordError::RegistryUnavailable(format!("{}: {err}", self.path))
        })?;
        self.parse(BufReader::new(reader))
    }
}

struct Columns {
    external_id: usize,
    symbol: usize,
    chromosome: usize,
    organism: Option<usize>,
    status: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(fields: &[&str], line: usize) -> Result<Self, CoordError> {
        let find = |name: &str| fields.iter().position(|field| field.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| CoordError::RegistryParse {
                line,
                message: format!("header is missing column {name}"),
            })
        };
        let external_id = require("external_id")?;
        let symbol = require("symbol")?;
        let chromosome = require("chromosome")?;
        let organism = find("organism");
        let status = find("status");
        let width = [Some(external_id), Some(symbol), Some(chromosome), organism, status]
            .into_iter()
            .flatten()
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);
        Ok(Self {
            external_id,
            symbol,
            chromosome,
            organism,
            status,
            width,
        })
    }
}

/// Read-only lookup from external gene id to the registry's canonical record.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    entries: HashMap<ExternalId, RegistryEntry>,
}

impl RegistryIndex {
    pub fn build<S: RegistrySource + ?Sized>(source: &S) -> Result<Self, CoordError> {
        let index = Self::from_entries(source.official_entries()?);
        info!(entries = index.len(), "registry index built");
        Ok(index)
    }

    /// Later entries replace earlier ones sharing an id.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            if let Some(previous) = map.insert(entry.external_id.clone(), entry) {
                debug!(
                    external_id = %previous.external_id,
                    "duplicate registry id, keeping last row"
                );
            }
        }
        Self { entries: map }
    }

    pub fn get(&self, id: &ExternalId) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
