//! Reader for the annotation tool's JSON export.
//!
//! The file is a single object with an `annotations` array:
//!
//! ```json
//! {
//!   "annotations": [
//!     {"type": "line",  "name": "X: 0 100", "coords": [[12, 300], [480, 300]], "tags": []},
//!     {"type": "point", "name": "",         "coords": [140.5, 212.0],          "tags": ["A"]}
//!   ]
//! }
//! ```
//!
//! Points carry one `[x, y]` pair, lines carry exactly two. Records of any
//! other `type` are kept as [`Geometry::Other`](super::Geometry::Other)
//! without looking at their coordinates. Unknown keys are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::model::{Annotation, AnnotationSet, Geometry};
use crate::error::PlotmeterError;

// ============================================================================
// Wire schema (internal to this module)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct AnnotationFile {
    annotations: Vec<RawAnnotation>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawAnnotation {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    coords: serde_json::Value,

    #[serde(default)]
    tags: Option<Vec<String>>,
}

// ============================================================================
// Public API
// ============================================================================

/// Reads an annotation set from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or holds
/// a point/line whose coordinates have the wrong shape.
pub fn read_annotations_json(path: &Path) -> Result<AnnotationSet, PlotmeterError> {
    let file = File::open(path).map_err(PlotmeterError::Io)?;
    let reader = BufReader::new(file);

    let raw: AnnotationFile =
        serde_json::from_reader(reader).map_err(|source| PlotmeterError::AnnotationJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    raw_to_ir(raw, path)
}

/// Reads an annotation set from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_annotations_json_str(json: &str) -> Result<AnnotationSet, PlotmeterError> {
    from_annotations_json_slice(json.as_bytes())
}

/// Reads an annotation set from JSON bytes.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_annotations_json_slice(bytes: &[u8]) -> Result<AnnotationSet, PlotmeterError> {
    let dummy_path = Path::new("<bytes>");
    let raw: AnnotationFile =
        serde_json::from_slice(bytes).map_err(|source| PlotmeterError::AnnotationJsonParse {
            path: dummy_path.to_path_buf(),
            source,
        })?;

    raw_to_ir(raw, dummy_path)
}

/// Writes an annotation set to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_annotations_json_string(set: &AnnotationSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ir_to_raw(set))
}

// ============================================================================
// Conversion
// ============================================================================

fn raw_to_ir(raw: AnnotationFile, path: &Path) -> Result<AnnotationSet, PlotmeterError> {
    let annotations = raw
        .annotations
        .into_iter()
        .enumerate()
        .map(|(idx, item)| raw_annotation_to_ir(idx, item, path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnnotationSet::new(annotations))
}

fn raw_annotation_to_ir(
    idx: usize,
    item: RawAnnotation,
    path: &Path,
) -> Result<Annotation, PlotmeterError> {
    let invalid = |expected: &str, name: &str| PlotmeterError::AnnotationInvalid {
        path: path.to_path_buf(),
        message: format!(
            "annotation #{} ('{}'): {} coords must be {}",
            idx, name, item.kind, expected
        ),
    };

    let geometry = match item.kind.as_str() {
        "point" => {
            let at: Coord = serde_json::from_value(item.coords.clone())
                .map_err(|_| invalid("[x, y]", &item.name))?;
            Geometry::Point(at)
        }
        "line" => {
            let [start, end]: [Coord; 2] = serde_json::from_value(item.coords.clone())
                .map_err(|_| invalid("[[x0, y0], [x1, y1]]", &item.name))?;
            Geometry::Line { start, end }
        }
        other => Geometry::Other {
            kind: other.to_string(),
        },
    };

    Ok(Annotation {
        name: item.name,
        tags: item.tags.unwrap_or_default().into_iter().collect(),
        geometry,
    })
}

fn ir_to_raw(set: &AnnotationSet) -> AnnotationFile {
    let annotations = set
        .annotations
        .iter()
        .map(|ann| {
            let coords = match &ann.geometry {
                Geometry::Point(at) => serde_json::json!(at),
                Geometry::Line { start, end } => serde_json::json!([start, end]),
                Geometry::Other { .. } => serde_json::Value::Null,
            };
            RawAnnotation {
                kind: ann.kind().to_string(),
                name: ann.name.clone(),
                coords,
                tags: Some(ann.tags.iter().cloned().collect()),
            }
        })
        .collect();

    AnnotationFile { annotations }
}
