use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{ExternalId, LoadLine, Normalized, NormalizedRecord, Outcome};
use crate::feed::RawRecord;
use crate::normalize::normalize;
use crate::registry::RegistryIndex;

/// Indentation of per-location lines inside a multiple-coordinates stanza.
const STANZA_INDENT: &str = "    ";

/// Rendered lines of one report category, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    lines: Vec<String>,
    count: usize,
}

impl Section {
    /// Appends a single-line entry counted once.
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
        self.count += 1;
    }

    /// Appends a multi-line block counted once.
    pub fn push_block(&mut self, block: impl IntoIterator<Item = String>) {
        self.lines.extend(block);
        self.count += 1;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Per-category results of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct Accumulators {
    pub no_location: Section,
    pub no_external_id: Section,
    pub unknown_id: Section,
    pub multiple_coords: Section,
    pub chromosome_mismatch: Section,
    symbol_mismatch: Vec<(ExternalId, String)>,
    load: IndexMap<ExternalId, Vec<LoadLine>>,
    multiple_ids: HashSet<ExternalId>,
    records: usize,
}

impl Accumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load lines grouped by external id, groups in first-seen order.
    ///
    /// Ids that any record reported with multiple locations are left out.
    pub fn load_groups(&self) -> impl Iterator<Item = (&ExternalId, &[LoadLine])> {
        self.load
            .iter()
            .filter(|(id, _)| !self.multiple_ids.contains(*id))
            .map(|(id, lines)| (id, lines.as_slice()))
    }

    pub fn load_lines(&self) -> impl Iterator<Item = &LoadLine> {
        self.load_groups().flat_map(|(_, lines)| lines.iter())
    }

    /// Symbol mismatches whose record actually reaches the load file.
    ///
    /// A mismatch is dropped when a later record flags the same id with
    /// multiple locations, since that id is then left out of the load file.
    pub fn symbol_mismatch(&self) -> Section {
        let mut section = Section::default();
        for (id, line) in &self.symbol_mismatch {
            if !self.multiple_ids.contains(id) {
                section.push(line.clone());
            }
        }
        section
    }

    pub fn records_seen(&self) -> usize {
        self.records
    }

    /// Routes one shape-checked record to its category.
    pub fn record(&mut self, normalized: Normalized, registry: &RegistryIndex) -> Outcome {
        self.records += 1;
        match normalized {
            Normalized::NoLocation { symbol } => {
                self.no_location.push(symbol);
                Outcome::NoLocation
            }
            Normalized::NoExternalId { symbol } => {
                self.no_external_id.push(symbol);
                Outcome::NoExternalId
            }
            Normalized::Record(record) => classify(record, registry, self),
        }
    }
}

/// Classifies one record against the registry, first matching rule wins:
/// multiple locations, unknown id, chromosome mismatch, then loadable. A symbol
/// mismatch is reported but does not stop the record from loading.
pub fn classify(
    record: NormalizedRecord,
    registry: &RegistryIndex,
    acc: &mut Accumulators,
) -> Outcome {
    let NormalizedRecord {
        symbol,
        external_id,
        locations,
    } = record;

    let location = match locations.as_slice() {
        [location] => location,
        [] => {
            acc.no_location.push(symbol);
            return Outcome::NoLocation;
        }
        _ => {
            let mut stanza = Vec::with_capacity(locations.len() + 1);
            stanza.push(format!("{symbol}\t{external_id}:"));
            stanza.extend(
                locations
                    .iter()
                    .map(|location| format!("{STANZA_INDENT}{location}")),
            );
            acc.multiple_coords.push_block(stanza);
            acc.multiple_ids.insert(external_id);
            return Outcome::MultipleLocations;
        }
    };

    let Some(entry) = registry.get(&external_id) else {
        acc.unknown_id.push(format!("{symbol}\t{external_id}"));
        return Outcome::UnknownId;
    };

    if entry.chromosome != location.chromosome {
        acc.chromosome_mismatch.push(format!(
            "{external_id}\t{}\t{}",
            location.chromosome, entry.chromosome
        ));
        return Outcome::ChromosomeMismatch;
    }

    let outcome = if entry.symbol != symbol {
        acc.symbol_mismatch.push((
            external_id.clone(),
            format!("{external_id}\t{symbol}\t{}", entry.symbol),
        ));
        Outcome::SymbolMismatchLoadable
    } else {
        Outcome::Loadable
    };

    let line = LoadLine::new(external_id.clone(), location);
    acc.load.entry(external_id).or_default().push(line);
    outcome
}

/// Normalizes and classifies every record in input order.
pub fn reconcile<'a>(
    records: impl IntoIterator<Item = &'a RawRecord>,
    registry: &RegistryIndex,
    namespace: &str,
) -> Accumulators {
    let mut acc = Accumulators::new();
    for raw in records {
        let outcome = acc.record(normalize(raw, namespace), registry);
        debug!(symbol = %raw.symbol, %outcome, "classified record");
    }
    acc
}
