use std::io::Read;

use camino::Utf8Path;
use serde::Deserialize;

use crate::domain::Location;
use crate::error::CoordError;
use crate::fs_util::open_input;

#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    pub data: Vec<RawRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub symbol: String,
    pub basic_genetic_entity: BasicGeneticEntity,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicGeneticEntity {
    #[serde(default)]
    pub genome_locations: Option<Vec<GenomeLocation>>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomeLocation {
    #[serde(default)]
    pub assembly: Option<String>,
    pub chromosome: String,
    pub start_position: u64,
    pub end_position: u64,
    #[serde(default)]
    pub strand: Option<String>,
}

impl From<&GenomeLocation> for Location {
    fn from(raw: &GenomeLocation) -> Self {
        Location {
            assembly: raw.assembly.clone(),
            chromosome: raw.chromosome.clone(),
            start: raw.start_position,
            end: raw.end_position,
            strand: raw.strand.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossReference {
    #[serde(default)]
    pub id: Option<String>,
}

pub struct Feed;

impl Feed {
    pub fn load(path: &Utf8Path) -> Result<FeedDocument, CoordError> {
        let reader = open_input(path)?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FeedDocument, CoordError> {
        serde_json::from_reader(reader).map_err(|err| CoordError::MalformedInput(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_alliance_shape() {
        let json = r#"{
            "metaData": {"dataProvider": "RGD"},
            "data": [{
                "symbol": "ABC1",
                "basicGeneticEntity": {
                    "primaryId": "HGNC:1",
                    "genomeLocations": [{
                        "assembly": "GRCh38",
                        "chromosome": "1",
                        "startPosition": 100,
                        "endPosition": 200,
                        "strand": "+"
                    }],
                    "crossReferences": [{"id": "NCBI_Gene:123", "pages": ["gene"]}]
                }
            }]
        }"#;
        let doc = Feed::from_reader(json.as_bytes()).unwrap();
        assert_eq!(doc.data.len(), 1);
        let entity = &doc.data[0].basic_genetic_entity;
        let locations = entity.genome_locations.as_ref().unwrap();
        assert_eq!(locations[0].start_position, 100);
        assert_eq!(
            entity.cross_references[0].id.as_deref(),
            Some("NCBI_Gene:123")
        );
    }

    #[test]
    fn missing_optional_blocks_default() {
        let json = r#"{"data": [{"symbol": "X", "basicGeneticEntity": {}}]}"#;
        let doc = Feed::from_reader(json.as_bytes()).unwrap();
        let entity = &doc.data[0].basic_genetic_entity;
        assert!(entity.genome_locations.is_none());
        assert!(entity.cross_references.is_empty());
    }

    #[test]
    fn missing_data_array_is_malformed() {
        let err = Feed::from_reader(r#"{"records": []}"#.as_bytes()).unwrap_err();
        assert_matches!(err, CoordError::MalformedInput(_));
    }

    #[test]
    fn non_numeric_position_is_malformed() {
        let json = r#"{"data": [{"symbol": "X", "basicGeneticEntity": {
            "genomeLocations": [{"chromosome": "1", "startPosition": "a", "endPosition": 2}]
        }}]}"#;
        let err = Feed::from_reader(json.as_bytes()).unwrap_err();
        assert_matches!(err, CoordError::MalformedInput(_));
    }
}
