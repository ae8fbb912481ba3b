use std::borrow::Cow;
use std::io::{self, Write};

use crate::reconcile::{Accumulators, Section};

pub const NOMEN_MISMATCH_HEADER: &str = "
Human Gene Coordinates Load - Nomenclature Mismatches

Report of human genes with coordinates whose nomenclature in the coordinate input file
  is not the same as loaded by the Entrez Gene load in the MGI Database. These are loaded.

column 1 : Gene ID from NCBI
column 2 : Symbol in Coordinates file
column 3 : Symbol in MGI's current data

";

pub const CHR_MISMATCH_HEADER: &str = "
Human Gene Coordinates Load - Chromosome Mismatches

Report of human genes with coordinates whose chromosome in the coordinates input file
  is not the same as loaded by the Entrez Gene load in the MGI Database. These are not loaded.

column 1 : Gene ID from NCBI
column 2 : Chromosome in Coordinates file
column 3 : Chromosome in MGI's current data

";

pub const MULTIPLE_COORDS_HEADER: &str = "
Human Gene Coordinates Load - Multiple Coordinates

Report of human genes that have multiple sets of coordinates in the input file.
  These are not loaded.

Each Stanza represents a Gene's Coordinates and consists of:
Line 1 : Gene Symbol and NCBI ID
Lines 2-n : one set of key/value pairs for each coordinate for the gene

";

pub const NO_LOCATION_TITLE: &str = "Human Symbols with No Coordinates in the Input File:";
pub const NO_EXTERNAL_ID_TITLE: &str = "Human Symbols with No NCBI ID in the Input File:";
pub const UNKNOWN_ID_TITLE: &str = "Human Symbols where NCBI ID is not in the Database:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QcReport {
    NomenMismatch,
    ChrMismatch,
    MultipleCoords,
}

impl QcReport {
    pub fn header(&self) -> &'static str {
        match self {
            QcReport::NomenMismatch => NOMEN_MISMATCH_HEADER,
            QcReport::ChrMismatch => CHR_MISMATCH_HEADER,
            QcReport::MultipleCoords => MULTIPLE_COORDS_HEADER,
        }
    }

    pub fn section<'a>(&self, acc: &'a Accumulators) -> Cow<'a, Section> {
        match self {
            QcReport::NomenMismatch => Cow::Owned(acc.symbol_mismatch()),
            QcReport::ChrMismatch => Cow::Borrowed(&acc.chromosome_mismatch),
            QcReport::MultipleCoords => Cow::Borrowed(&acc.multiple_coords),
        }
    }
}

/// Writes load lines grouped by external id. No header, no trailer.
pub fn write_load_file<W: Write>(out: &mut W, acc: &Accumulators) -> io::Result<usize> {
    let mut written = 0;
    for line in acc.load_lines() {
        writeln!(out, "{line}")?;
        written += 1;
    }
    Ok(written)
}

/// Writes the legend, then the body and `Total:` trailer when the category is non-empty.
pub fn write_qc_report<W: Write>(
    out: &mut W,
    report: QcReport,
    acc: &Accumulators,
) -> io::Result<()> {
    out.write_all(report.header().as_bytes())?;
    write_body(out, &report.section(acc))
}

/// Writes the no-location, no-external-id and unknown-id sections that have entries.
pub fn write_curator_log<W: Write>(out: &mut W, acc: &Accumulators) -> io::Result<()> {
    let sections = [
        (NO_LOCATION_TITLE, &acc.no_location),
        (NO_EXTERNAL_ID_TITLE, &acc.no_external_id),
        (UNKNOWN_ID_TITLE, &acc.unknown_id),
    ];
    for (index, (title, section)) in sections.into_iter().enumerate() {
        if section.is_empty() {
            continue;
        }
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{title}")?;
        write_body(out, section)?;
    }
    Ok(())
}

fn write_body<W: Write>(out: &mut W, section: &Section) -> io::Result<()> {
    if section.is_empty() {
        return Ok(());
    }
    for line in section.lines() {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "Total: {}", section.count())
}
