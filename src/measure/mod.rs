//! Line measurement: convert annotated line lengths to physical units.

use crate::calibration::{self, directive, NameMatch, ScaleCalibration};
use crate::error::PlotmeterError;
use crate::export::{Measurements, NAME_COLUMN};
use crate::ir::AnnotationSet;

/// Options for line measurement.
#[derive(Clone, Debug, Default)]
pub struct MeasureOptions {
    /// Only lines carrying this tag are measured. `None` or an empty string
    /// measures every line.
    pub tag: Option<String>,
    /// How scale directives are matched against line names.
    pub name_match: NameMatch,
    /// Leave the scale reference lines themselves out of the output. By
    /// default they are measured like any other line.
    pub skip_scale_lines: bool,
}

/// Measures every qualifying line against each scale.
///
/// Rows follow the input order of the lines; `names` holds the label of the
/// line behind each row.
pub fn measure_lines(
    set: &AnnotationSet,
    scales: &[ScaleCalibration],
    opts: &MeasureOptions,
) -> Measurements {
    let tag = opts.tag.as_deref();
    let mut names = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); scales.len()];

    for (ann, start, end) in set.lines() {
        if !ann.matches_tag(tag) {
            continue;
        }
        if opts.skip_scale_lines && directive::parse_scale(&ann.name, opts.name_match).is_some() {
            continue;
        }

        names.push(ann.name.clone());
        for (scale, column) in scales.iter().zip(values.iter_mut()) {
            column.push(scale.measure(start, end));
        }
    }

    let columns = scales
        .iter()
        .map(|scale| scale.name().to_string())
        .zip(values)
        .collect();

    Measurements { names, columns }
}

/// Finds the scales in `set` and measures its lines with them.
///
/// # Errors
/// Returns an error if a scale definition is invalid (see
/// [`calibration::find_scales`]), or if a scale is named like the line
/// label column.
pub fn measure(set: &AnnotationSet, opts: &MeasureOptions) -> Result<Measurements, PlotmeterError> {
    let scales = calibration::find_scales(set, opts.name_match)?;
    calibration::unparsed_directives(set, opts.name_match);
    if let Some(scale) = scales.iter().find(|s| s.name() == NAME_COLUMN) {
        return Err(PlotmeterError::ReservedScaleName {
            name: scale.name().to_string(),
        });
    }
    if scales.is_empty() {
        tracing::warn!("no scale calibrations found; output will be empty");
    }

    let measurements = measure_lines(set, &scales, opts);
    tracing::debug!(
        scales = scales.len(),
        lines = measurements.names.len(),
        "measured lines"
    );
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, Coord};

    fn sample_set() -> AnnotationSet {
        AnnotationSet::new(vec![
            Annotation::line("mm: 10", [0.0, 0.0], [5.0, 0.0]),
            Annotation::point("ignored", [1.0, 1.0]).with_tag("A"),
            Annotation::line("left", [0.0, 0.0], [3.0, 4.0]).with_tag("A"),
            Annotation::line("right", [1.0, 1.0], [1.0, 2.0]).with_tag("B"),
            Annotation::line("um: 10000", [0.0, 0.0], [0.0, 5.0]),
        ])
    }

    #[test]
    fn test_measure_includes_scale_lines_by_default() {
        let m = measure(&sample_set(), &MeasureOptions::default()).expect("measure");

        assert_eq!(m.names, vec!["mm: 10", "left", "right", "um: 10000"]);
        let mm = m.columns.get("mm").expect("mm column");
        assert_eq!(mm, &[10.0, 10.0, 2.0, 10.0]);
        let um = m.columns.get("um").expect("um column");
        assert_eq!(um, &[10000.0, 10000.0, 2000.0, 10000.0]);
    }

    #[test]
    fn test_skip_scale_lines() {
        let opts = MeasureOptions {
            skip_scale_lines: true,
            ..Default::default()
        };
        let m = measure(&sample_set(), &opts).expect("measure");

        assert_eq!(m.names, vec!["left", "right"]);
        assert_eq!(m.columns.row_count().expect("rows"), 2);
    }

    #[test]
    fn test_tag_filter() {
        let opts = MeasureOptions {
            tag: Some("A".into()),
            ..Default::default()
        };
        let m = measure(&sample_set(), &opts).expect("measure");

        assert_eq!(m.names, vec!["left"]);
        assert_eq!(m.columns.get("mm"), Some(&[10.0][..]));
    }

    #[test]
    fn test_unit_scale_example() {
        let scale =
            ScaleCalibration::new("s", Coord::new(0.0, 0.0), Coord::new(5.0, 0.0), 10.0)
                .expect("scale");
        let set = AnnotationSet::new(vec![Annotation::line("l", [2.0, 7.0], [2.0, 12.0])]);

        let m = measure_lines(&set, &[scale], &MeasureOptions::default());
        assert_eq!(m.columns.get("s"), Some(&[10.0][..]));
    }

    #[test]
    fn test_no_scales_still_records_names() {
        let set = AnnotationSet::new(vec![Annotation::line("l", [0.0, 0.0], [1.0, 0.0])]);
        let m = measure(&set, &MeasureOptions::default()).expect("measure");

        assert_eq!(m.names, vec!["l"]);
        assert!(m.columns.is_empty());
    }

    #[test]
    fn test_scale_named_like_label_column_is_rejected() {
        let set = AnnotationSet::new(vec![
            Annotation::line("name: 10", [0.0, 0.0], [5.0, 0.0]),
            Annotation::line("crack", [0.0, 0.0], [1.0, 0.0]),
        ]);
        let err = measure(&set, &MeasureOptions::default()).unwrap_err();
        assert!(matches!(err, PlotmeterError::ReservedScaleName { ref name } if name == "name"));
    }

    #[test]
    fn test_duplicate_scale_names_are_rejected() {
        let set = AnnotationSet::new(vec![
            Annotation::line("mm: 1", [0.0, 0.0], [1.0, 0.0]),
            Annotation::line("mm: 2", [0.0, 0.0], [2.0, 0.0]),
        ]);
        let err = measure(&set, &MeasureOptions::default()).unwrap_err();
        assert!(matches!(err, PlotmeterError::DuplicateCalibration { .. }));
    }
}
