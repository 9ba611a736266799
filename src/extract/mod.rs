//! Point extraction: project annotated points onto calibrated axes.
//!
//! Every point that passes the tag filter yields one row, with one value per
//! axis. A point that fails the filter is skipped for all axes at once, so
//! the columns stay aligned.

use crate::calibration::{self, AxisCalibration, NameMatch};
use crate::error::PlotmeterError;
use crate::export::ColumnSet;
use crate::ir::AnnotationSet;

/// Options for point extraction.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Only points carrying this tag are extracted. `None` or an empty
    /// string extracts every point.
    pub tag: Option<String>,
    /// How axis directives are matched against line names.
    pub name_match: NameMatch,
}

/// Projects every qualifying point onto each axis.
///
/// Values within a column follow the input order of the points.
pub fn project_points(
    set: &AnnotationSet,
    axes: &[AxisCalibration],
    tag: Option<&str>,
) -> ColumnSet {
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); axes.len()];

    for (ann, at) in set.points() {
        if !ann.matches_tag(tag) {
            continue;
        }
        for (axis, column) in axes.iter().zip(values.iter_mut()) {
            column.push(axis.project(at));
        }
    }

    axes.iter()
        .map(|axis| axis.name().to_string())
        .zip(values)
        .collect()
}

/// Finds the axes in `set` and projects its points onto them.
///
/// # Errors
/// Returns an error if an axis definition is invalid (see
/// [`calibration::find_axes`]).
pub fn extract(set: &AnnotationSet, opts: &ExtractOptions) -> Result<ColumnSet, PlotmeterError> {
    let axes = calibration::find_axes(set, opts.name_match)?;
    calibration::unparsed_directives(set, opts.name_match);
    if axes.is_empty() {
        tracing::warn!("no axis calibrations found; output will be empty");
    }

    let columns = project_points(set, &axes, opts.tag.as_deref());
    tracing::debug!(axes = axes.len(), "projected points");
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, Coord};

    fn x_axis() -> AxisCalibration {
        AxisCalibration::new("X", Coord::new(0.0, 0.0), Coord::new(10.0, 0.0), 0.0, 100.0, false)
            .expect("axis")
    }

    fn y_axis() -> AxisCalibration {
        AxisCalibration::new("Y", Coord::new(0.0, 10.0), Coord::new(0.0, 0.0), 1.0, 100.0, true)
            .expect("axis")
    }

    fn tagged_points() -> AnnotationSet {
        AnnotationSet::new(vec![
            Annotation::point("", [5.0, 10.0]).with_tag("A"),
            Annotation::point("", [2.0, 5.0]).with_tag("B"),
            Annotation::line("not a point", [5.0, 5.0], [6.0, 6.0]).with_tag("A"),
            Annotation::point("", [10.0, 0.0]).with_tag("A").with_tag("B"),
        ])
    }

    #[test]
    fn test_project_points_all() {
        let cols = project_points(&tagged_points(), &[x_axis(), y_axis()], None);

        assert_eq!(cols.len(), 2);
        assert_eq!(cols.row_count().expect("rows"), 3);

        let x = cols.get("X").expect("X column");
        assert!((x[0] - 50.0).abs() < 1e-9);
        assert!((x[1] - 20.0).abs() < 1e-9);
        assert!((x[2] - 100.0).abs() < 1e-9);

        let y = cols.get("Y").expect("Y column");
        assert!((y[0] - 1.0).abs() < 1e-9);
        assert!((y[1] - 10.0).abs() < 1e-9);
        assert!((y[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tag_filter_keeps_columns_aligned() {
        let cols = project_points(&tagged_points(), &[x_axis(), y_axis()], Some("A"));

        assert_eq!(cols.row_count().expect("rows"), 2);
        let x = cols.get("X").expect("X column");
        let y = cols.get("Y").expect("Y column");
        // Rows 0 and 1 are the first and third point, in that order
        assert!((x[0] - 50.0).abs() < 1e-9 && (y[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 100.0).abs() < 1e-9 && (y[1] - 100.0).abs() < 1e-9);

        let b_only = project_points(&tagged_points(), &[x_axis()], Some("B"));
        assert_eq!(b_only.get("X").map(<[f64]>::len), Some(2));

        let none = project_points(&tagged_points(), &[x_axis()], Some("missing"));
        assert_eq!(none.get("X"), Some(&[][..]));
    }

    #[test]
    fn test_empty_tag_means_no_filter() {
        let cols = project_points(&tagged_points(), &[x_axis()], Some(""));
        assert_eq!(cols.row_count().expect("rows"), 3);
    }

    #[test]
    fn test_no_axes_gives_no_columns() {
        let cols = project_points(&tagged_points(), &[], None);
        assert!(cols.is_empty());
    }

    #[test]
    fn test_extract_end_to_end() {
        let set = AnnotationSet::new(vec![
            Annotation::line("X: 0 100", [0.0, 0.0], [10.0, 0.0]),
            Annotation::point("", [5.0, 0.0]),
            Annotation::point("", [20.0, 0.0]),
        ]);

        let cols = extract(&set, &ExtractOptions::default()).expect("extract");
        let x = cols.get("X").expect("X column");
        assert!((x[0] - 50.0).abs() < 1e-9);
        assert!((x[1] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_rejects_degenerate_axis() {
        let set = AnnotationSet::new(vec![
            Annotation::line("X: 0 100", [4.0, 4.0], [4.0, 4.0]),
            Annotation::point("", [5.0, 0.0]),
        ]);

        let err = extract(&set, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, PlotmeterError::DegenerateCalibration { .. }));
    }
}
