use crate::domain::{ExternalId, Location, Normalized, NormalizedRecord, xref_value};
use crate::feed::RawRecord;

/// Shape-checks one feed record.
///
/// A record without locations is `NoLocation` before its cross-references are
/// looked at. When several cross-references belong to `namespace`, the last one
/// in input order supplies the external id; if that value is blank the record
/// is `NoExternalId` even when an earlier one was usable.
pub fn normalize(raw: &RawRecord, namespace: &str) -> Normalized {
    let entity = &raw.basic_genetic_entity;
    let locations = match entity.genome_locations.as_deref() {
        Some(locations) if !locations.is_empty() => locations,
        _ => {
            return Normalized::NoLocation {
                symbol: raw.symbol.clone(),
            };
        }
    };

    let external_id = entity
        .cross_references
        .iter()
        .filter_map(|xref| xref.id.as_deref())
        .filter_map(|id| xref_value(id, namespace))
        .last()
        .and_then(|value| value.parse::<ExternalId>().ok());

    let Some(external_id) = external_id else {
        return Normalized::NoExternalId {
            symbol: raw.symbol.clone(),
        };
    };

    Normalized::Record(NormalizedRecord {
        symbol: raw.symbol.clone(),
        external_id,
        locations: locations.iter().map(Location::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::domain::DEFAULT_NAMESPACE;
    use crate::feed::{BasicGeneticEntity, CrossReference, GenomeLocation};

    fn location(chromosome: &str) -> GenomeLocation {
        GenomeLocation {
            assembly: None,
            chromosome: chromosome.to_string(),
            start_position: 10,
            end_position: 20,
            strand: Some("+".to_string()),
        }
    }

    fn xref(id: &str) -> CrossReference {
        CrossReference {
            id: Some(id.to_string()),
        }
    }

    fn raw(locations: Option<Vec<GenomeLocation>>, xrefs: Vec<CrossReference>) -> RawRecord {
        RawRecord {
            symbol: "ABC1".to_string(),
            basic_genetic_entity: BasicGeneticEntity {
                genome_locations: locations,
                cross_references: xrefs,
            },
        }
    }

    #[test]
    fn missing_or_empty_locations_are_no_location() {
        let missing = raw(None, vec![xref("NCBI_Gene:1")]);
        assert_matches!(
            normalize(&missing, DEFAULT_NAMESPACE),
            Normalized::NoLocation { symbol } if symbol == "ABC1"
        );
        let empty = raw(Some(Vec::new()), vec![xref("NCBI_Gene:1")]);
        assert_matches!(
            normalize(&empty, DEFAULT_NAMESPACE),
            Normalized::NoLocation { .. }
        );
    }

    #[test]
    fn no_matching_xref_is_no_external_id() {
        let record = raw(
            Some(vec![location("1")]),
            vec![xref("HGNC:5"), CrossReference { id: None }],
        );
        assert_matches!(
            normalize(&record, DEFAULT_NAMESPACE),
            Normalized::NoExternalId { .. }
        );
    }

    #[test]
    fn last_matching_xref_wins() {
        let record = raw(
            Some(vec![location("1")]),
            vec![xref("NCBI_Gene:1"), xref("HGNC:5"), xref("NCBI_Gene:2")],
        );
        let Normalized::Record(rec) = normalize(&record, DEFAULT_NAMESPACE) else {
            panic!("expected a normalized record");
        };
        assert_eq!(rec.external_id.as_str(), "2");
    }

    #[test]
    fn blank_last_xref_overrides_earlier_match() {
        let record = raw(
            Some(vec![location("1")]),
            vec![xref("NCBI_Gene:1"), xref("NCBI_Gene:")],
        );
        assert_matches!(
            normalize(&record, DEFAULT_NAMESPACE),
            Normalized::NoExternalId { symbol } if symbol == "ABC1"
        );
    }

    #[test]
    fn keeps_every_location_in_order() {
        let record = raw(
            Some(vec![location("1"), location("Y")]),
            vec![xref("NCBI_Gene:9")],
        );
        let Normalized::Record(rec) = normalize(&record, DEFAULT_NAMESPACE) else {
            panic!("expected a normalized record");
        };
        let chromosomes: Vec<_> = rec.locations.iter().map(|l| l.chromosome.as_str()).collect();
        assert_eq!(chromosomes, vec!["1", "Y"]);
    }

    #[test]
    fn namespace_is_configurable() {
        let record = raw(Some(vec![location("1")]), vec![xref("HGNC:5")]);
        assert_matches!(
            normalize(&record, "HGNC"),
            Normalized::Record(rec) if rec.external_id.as_str() == "5"
        );
    }
}
