use crate::output::{OutputError, OutputFormat};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use vecmeta_core::{MetadataIndex, MetadataReport, VectorId};

#[derive(Debug, Serialize)]
pub struct IndexListing<'a> {
    pub metadata_indexes: &'a [MetadataIndex],
    pub total_indexes: usize,
    pub timestamp: DateTime<Utc>,
}

/// Prints the metadata list preceded by the id count, or the whole report
/// when `full` is set.
pub fn print_report<W: Write>(
    report: &MetadataReport,
    format: OutputFormat,
    full: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    if full {
        return format.write(report, out);
    }

    if report.is_empty() {
        writeln!(out, "No vector IDs retrieved.")?;
        return Ok(());
    }

    writeln!(out, "Retrieved {} vector IDs.", report.ids.len())?;
    writeln!(out, "Metadata:")?;
    format.write(&report.metadata, out)
}

pub fn print_ids<W: Write>(
    ids: &[VectorId],
    format: OutputFormat,
    out: &mut W,
) -> Result<(), OutputError> {
    if ids.is_empty() {
        writeln!(out, "No vector IDs retrieved.")?;
        return Ok(());
    }
    format.write(&ids, out)
}

pub fn print_indexes<W: Write>(
    indexes: &[MetadataIndex],
    format: OutputFormat,
    out: &mut W,
) -> Result<(), OutputError> {
    let listing = IndexListing {
        metadata_indexes: indexes,
        total_indexes: indexes.len(),
        timestamp: Utc::now(),
    };
    format.write(&listing, out)
}
