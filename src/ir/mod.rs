//! In-memory representation of an annotated plot image.
//!
//! The annotation tool exports points and lines drawn over an image. This
//! module holds the typed form of that export ([`AnnotationSet`]) together
//! with the JSON reader/writer that produces it.
//!
//! # Example
//!
//! ```
//! use plotmeter::ir::{Annotation, AnnotationSet, Coord};
//!
//! let set = AnnotationSet::new(vec![
//!     Annotation::line("X: 0 100", [0.0, 0.0], [10.0, 0.0]),
//!     Annotation::point("", [5.0, 0.0]).with_tag("series-a"),
//! ]);
//!
//! assert_eq!(set.points().count(), 1);
//! assert_eq!(set.annotations[1].as_point(), Some(Coord::new(5.0, 0.0)));
//! ```

mod coord;
pub mod io_json;
mod model;

// Re-export core types for convenient access
pub use coord::Coord;
pub use model::{Annotation, AnnotationSet, Geometry};
