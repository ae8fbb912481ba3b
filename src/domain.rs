use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoordError;

/// Cross-reference namespace that carries the external gene identifier.
pub const DEFAULT_NAMESPACE: &str = "NCBI_Gene";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExternalId {
    type Err = CoordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(CoordError::InvalidExternalId(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Splits a `<namespace>:<value>` cross-reference at its first colon.
pub fn split_xref(id: &str) -> Option<(&str, &str)> {
    id.split_once(':')
}

/// Returns the raw value of `xref` when it belongs to `namespace`.
///
/// Only the field after the first colon is kept, so `NS:a:b` yields `a`. The
/// value may be empty; callers decide whether it is a usable id.
pub fn xref_value<'a>(xref: &'a str, namespace: &str) -> Option<&'a str> {
    let (prefix, rest) = split_xref(xref)?;
    if prefix != namespace {
        return None;
    }
    Some(rest.split(':').next().unwrap_or(rest))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub assembly: Option<String>,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub strand: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(assembly) = &self.assembly {
            write!(f, "assembly: {assembly}, ")?;
        }
        write!(
            f,
            "chromosome: {}, startPosition: {}, endPosition: {}, strand: {}",
            self.chromosome,
            self.start,
            self.end,
            self.strand.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub symbol: String,
    pub external_id: ExternalId,
    pub locations: Vec<Location>,
}

/// Result of shape-checking one feed record. Only `Record` is a loading candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    NoLocation { symbol: String },
    NoExternalId { symbol: String },
    Record(NormalizedRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NoLocation,
    NoExternalId,
    MultipleLocations,
    UnknownId,
    ChromosomeMismatch,
    SymbolMismatchLoadable,
    Loadable,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NoLocation => "no_location",
            Outcome::NoExternalId => "no_external_id",
            Outcome::MultipleLocations => "multiple_locations",
            Outcome::UnknownId => "unknown_id",
            Outcome::ChromosomeMismatch => "chromosome_mismatch",
            Outcome::SymbolMismatchLoadable => "symbol_mismatch_loadable",
            Outcome::Loadable => "loadable",
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Outcome::Loadable | Outcome::SymbolMismatchLoadable)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the coordinate load file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLine {
    pub external_id: ExternalId,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub strand: Option<String>,
}

impl LoadLine {
    pub fn new(external_id: ExternalId, location: &Location) -> Self {
        Self {
            external_id,
            chromosome: location.chromosome.clone(),
            start: location.start,
            end: location.end,
            strand: location.strand.clone(),
        }
    }
}

impl fmt::Display for LoadLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.external_id,
            self.chromosome,
            self.start,
            self.end,
            self.strand.as_deref().unwrap_or("")
        )
    }
}
