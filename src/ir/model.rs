//! Core annotation model.
//!
//! The reader in [`io_json`](super::io_json) converts the annotation tool's
//! JSON into these types; everything downstream (calibration, extraction,
//! measurement, inspection) works on them.

use std::collections::BTreeSet;

use super::coord::Coord;

/// All annotations drawn on one plot image, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Creates a set from annotations in input order.
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }

    /// Iterates over point annotations, in input order.
    pub fn points(&self) -> impl Iterator<Item = (&Annotation, Coord)> + '_ {
        self.annotations
            .iter()
            .filter_map(|ann| ann.as_point().map(|c| (ann, c)))
    }

    /// Iterates over line annotations, in input order.
    pub fn lines(&self) -> impl Iterator<Item = (&Annotation, Coord, Coord)> + '_ {
        self.annotations
            .iter()
            .filter_map(|ann| ann.as_line().map(|(start, end)| (ann, start, end)))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

/// The drawn shape of an annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single marked position.
    Point(Coord),
    /// A segment from `start` to `end`, in the order it was drawn.
    Line { start: Coord, end: Coord },
    /// Any other shape the annotation tool produces (rectangles, polygons).
    /// Kept so it can be counted, never projected or measured.
    Other { kind: String },
}

/// A single annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Free-form label. For lines this may carry a calibration directive
    /// such as `X: 0 100 L`.
    pub name: String,

    /// User-assigned tags used to filter which annotations participate.
    pub tags: BTreeSet<String>,

    pub geometry: Geometry,
}

impl Annotation {
    /// Creates an untagged point annotation.
    pub fn point(name: impl Into<String>, at: impl Into<Coord>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            geometry: Geometry::Point(at.into()),
        }
    }

    /// Creates an untagged line annotation.
    pub fn line(name: impl Into<String>, start: impl Into<Coord>, end: impl Into<Coord>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            geometry: Geometry::Line {
                start: start.into(),
                end: end.into(),
            },
        }
    }

    /// Creates an annotation of a kind plotmeter does not interpret.
    pub fn other(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            geometry: Geometry::Other { kind: kind.into() },
        }
    }

    /// Adds a tag to the annotation.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// The `type` string used on the wire.
    pub fn kind(&self) -> &str {
        match &self.geometry {
            Geometry::Point(_) => "point",
            Geometry::Line { .. } => "line",
            Geometry::Other { kind } => kind,
        }
    }

    pub fn as_point(&self) -> Option<Coord> {
        match self.geometry {
            Geometry::Point(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<(Coord, Coord)> {
        match self.geometry {
            Geometry::Line { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// Returns true if the annotation passes the tag filter.
    ///
    /// `None` and the empty string both mean "no filter".
    pub fn matches_tag(&self, filter: Option<&str>) -> bool {
        match filter {
            None | Some("") => true,
            Some(tag) => self.tags.contains(tag),
        }
    }
}
