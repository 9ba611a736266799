//! Annotation set inspection.
//!
//! Summarises what a file contains and how plotmeter will read it: counts
//! per annotation kind, the tag histogram, every axis and scale directive,
//! and line names that look like directives but do not parse. Calibration
//! errors are reported as problems rather than aborting the inspection.

mod report;

pub use report::{AxisSummary, InspectReport, ScaleSummary, SummarySection, TagCount};

use std::collections::BTreeMap;

use crate::calibration::{self, NameMatch};
use crate::ir::{AnnotationSet, Geometry};

/// Options for annotation inspection.
#[derive(Clone, Debug, Default)]
pub struct InspectOptions {
    /// How calibration directives are matched against line names.
    pub name_match: NameMatch,
}

/// Inspect an annotation set and produce a report.
pub fn inspect_annotations(set: &AnnotationSet, opts: &InspectOptions) -> InspectReport {
    let mut problems = Vec::new();

    let axes = match calibration::find_axes(set, opts.name_match) {
        Ok(axes) => axes
            .iter()
            .map(|axis| {
                let (a, b) = axis.bounds();
                AxisSummary {
                    name: axis.name().to_string(),
                    a,
                    b,
                    log: axis.is_log(),
                }
            })
            .collect(),
        Err(e) => {
            problems.push(e.to_string());
            Vec::new()
        }
    };

    let scales = match calibration::find_scales(set, opts.name_match) {
        Ok(scales) => scales
            .iter()
            .map(|scale| ScaleSummary {
                name: scale.name().to_string(),
                physical_length: scale.physical_length(),
                units_per_px: scale.units_per_px(),
            })
            .collect(),
        Err(e) => {
            problems.push(e.to_string());
            Vec::new()
        }
    };

    let unparsed = calibration::unparsed_directives(set, opts.name_match)
        .into_iter()
        .map(str::to_string)
        .collect();

    InspectReport {
        summary: compute_summary(set),
        tags: compute_tags(set),
        axes,
        scales,
        unparsed,
        problems,
    }
}

fn compute_summary(set: &AnnotationSet) -> SummarySection {
    let mut summary = SummarySection {
        annotations: set.len(),
        ..Default::default()
    };

    for ann in &set.annotations {
        match ann.geometry {
            Geometry::Point(_) => summary.points += 1,
            Geometry::Line { .. } => summary.lines += 1,
            Geometry::Other { .. } => summary.other += 1,
        }
        if ann.tags.is_empty() {
            summary.untagged += 1;
        }
    }

    summary
}

/// Tag histogram, sorted by count descending then tag ascending.
fn compute_tags(set: &AnnotationSet) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in set.annotations.iter().flat_map(|ann| ann.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the BTreeMap's name order within equal counts
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
}
