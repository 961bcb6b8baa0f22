//! Per-file JSON report for `sdslens extract`.

use clap::ValueEnum;
use sdslens_extract::{Bucket, Extract, Extraction, Record, Relation};
use sdslens_model::Quad;
use serde::Serialize;

/// Restrict the report to one section.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Records,
    Buckets,
    Relations,
    RemoveRelations,
    Data,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub section: &'static str,
    pub subject: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<Bucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<Relation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_relations: Option<Vec<Relation>>,
    pub data_quads: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Quad>>,
    pub skipped: Vec<SkippedEntry>,
}

impl FileReport {
    pub fn build(file: String, extract: &Extract<'_>, only: Option<Section>) -> Self {
        let wants = |section: Section| only.map_or(section != Section::Data, |o| o == section);
        let mut skipped = Vec::new();

        let records = wants(Section::Records)
            .then(|| collect("records", extract.get_records_report(), &mut skipped));
        let buckets = wants(Section::Buckets)
            .then(|| collect("buckets", extract.get_buckets_report(), &mut skipped));
        let relations = wants(Section::Relations)
            .then(|| collect("relations", extract.get_relations_report(), &mut skipped));
        let remove_relations = wants(Section::RemoveRelations).then(|| {
            collect(
                "remove_relations",
                extract.get_remove_relations_report(),
                &mut skipped,
            )
        });

        FileReport {
            file,
            records,
            buckets,
            relations,
            remove_relations,
            data_quads: extract.get_data().len(),
            data: wants(Section::Data).then(|| extract.get_data().to_vec()),
            skipped,
        }
    }

    pub fn decoded(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
            + self.buckets.as_ref().map_or(0, Vec::len)
            + self.relations.as_ref().map_or(0, Vec::len)
            + self.remove_relations.as_ref().map_or(0, Vec::len)
    }
}

fn collect<T>(
    section: &'static str,
    extraction: Extraction<T>,
    skipped: &mut Vec<SkippedEntry>,
) -> Vec<T> {
    skipped.extend(extraction.skipped.into_iter().map(|s| SkippedEntry {
        section,
        subject: s.subject.to_string(),
        error: s.error.to_string(),
    }));
    extraction.records
}
