//! Axis and scale calibrations.
//!
//! Calibrations are ordinary line annotations whose name carries a
//! directive (see [`directive`]). An axis maps positions along its line to
//! data values, linearly or logarithmically; a scale maps pixel lengths to
//! physical lengths.
//!
//! Construction validates each calibration, so a bad definition is reported
//! once, up front, instead of surfacing as NaN or infinity in the output.

pub mod directive;

pub use directive::{AxisDirective, NameMatch, ScaleDirective};

use std::collections::HashSet;

use crate::error::PlotmeterError;
use crate::ir::{AnnotationSet, Coord};

/// A calibrated axis drawn from `r0` to `r1`.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisCalibration {
    name: String,
    r0: Coord,
    r1: Coord,
    delta: Coord,
    l2: f64,
    log: bool,
    // Bounds in calibration space: ln(value) for log axes.
    a: f64,
    b: f64,
}

impl AxisCalibration {
    /// Builds an axis whose value is `a` at `r0` and `b` at `r1`.
    ///
    /// # Errors
    /// - [`PlotmeterError::DegenerateCalibration`] if the line has zero (or
    ///   non-finite) length.
    /// - [`PlotmeterError::InvalidAxisBounds`] if either bound is not finite,
    ///   the bounds are too far apart to interpolate, or `log` is set and
    ///   either bound is not strictly positive.
    pub fn new(
        name: impl Into<String>,
        r0: Coord,
        r1: Coord,
        a: f64,
        b: f64,
        log: bool,
    ) -> Result<Self, PlotmeterError> {
        let name = name.into();
        let delta = r1 - r0;
        let l2 = delta.norm_squared();
        check_segment(&name, r0, r1, l2)?;

        let invalid = |name: String, reason: &'static str| PlotmeterError::InvalidAxisBounds {
            name,
            a,
            b,
            reason,
        };
        if !(a.is_finite() && b.is_finite()) {
            return Err(invalid(name, "bounds must be finite"));
        }
        if log && !(a > 0.0 && b > 0.0) {
            return Err(invalid(name, "a log axis needs positive bounds"));
        }
        // Bounds in calibration space
        let (ca, cb) = if log { (a.ln(), b.ln()) } else { (a, b) };
        if !(cb - ca).is_finite() {
            return Err(invalid(name, "bounds are too far apart"));
        }

        Ok(Self {
            name,
            r0,
            r1,
            delta,
            l2,
            log,
            a: ca,
            b: cb,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    /// The image-space endpoints `(r0, r1)`.
    pub fn endpoints(&self) -> (Coord, Coord) {
        (self.r0, self.r1)
    }

    /// Data values at `r0` and `r1`, as written in the directive.
    pub fn bounds(&self) -> (f64, f64) {
        if self.log {
            (self.a.exp(), self.b.exp())
        } else {
            (self.a, self.b)
        }
    }

    /// Position of `c` along the axis: 0 at `r0`, 1 at `r1`, unclamped.
    #[inline]
    pub fn parameter(&self, c: Coord) -> f64 {
        (c - self.r0).dot(&self.delta) / self.l2
    }

    /// Projects an image-space point onto the axis and returns its data value.
    ///
    /// Points beyond the drawn segment extrapolate.
    #[inline]
    pub fn project(&self, c: Coord) -> f64 {
        let v = self.a + (self.b - self.a) * self.parameter(c);
        if self.log {
            v.exp()
        } else {
            v
        }
    }
}

/// A length scale: a reference line of known physical length.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleCalibration {
    name: String,
    r0: Coord,
    r1: Coord,
    physical_length: f64,
    units_per_px: f64,
}

impl ScaleCalibration {
    /// Builds a scale from a reference line and its physical length.
    ///
    /// # Errors
    /// - [`PlotmeterError::DegenerateCalibration`] if the line has zero (or
    ///   non-finite) length.
    /// - [`PlotmeterError::InvalidScaleLength`] if `physical_length` is not
    ///   finite.
    pub fn new(
        name: impl Into<String>,
        r0: Coord,
        r1: Coord,
        physical_length: f64,
    ) -> Result<Self, PlotmeterError> {
        let name = name.into();
        let l2 = (r1 - r0).norm_squared();
        check_segment(&name, r0, r1, l2)?;

        if !physical_length.is_finite() {
            return Err(PlotmeterError::InvalidScaleLength {
                name,
                length: physical_length,
            });
        }

        Ok(Self {
            name,
            r0,
            r1,
            physical_length,
            units_per_px: physical_length / l2.sqrt(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoints(&self) -> (Coord, Coord) {
        (self.r0, self.r1)
    }

    pub fn physical_length(&self) -> f64 {
        self.physical_length
    }

    /// Physical units per image pixel.
    pub fn units_per_px(&self) -> f64 {
        self.units_per_px
    }

    /// Physical length of the segment from `start` to `end`.
    #[inline]
    pub fn measure(&self, start: Coord, end: Coord) -> f64 {
        start.distance_to(&end) * self.units_per_px
    }
}

fn check_segment(name: &str, r0: Coord, r1: Coord, l2: f64) -> Result<(), PlotmeterError> {
    if r0.is_finite() && r1.is_finite() && l2 > 0.0 && l2.is_finite() {
        Ok(())
    } else {
        Err(PlotmeterError::DegenerateCalibration {
            name: name.to_string(),
        })
    }
}

/// Finds every axis directive among the line annotations, in input order.
///
/// Lines whose names are not axis directives are skipped.
///
/// # Errors
/// Fails on the first invalid calibration or on a repeated axis name.
pub fn find_axes(
    set: &AnnotationSet,
    mode: NameMatch,
) -> Result<Vec<AxisCalibration>, PlotmeterError> {
    let mut axes = Vec::new();
    let mut seen = HashSet::new();

    for (ann, r0, r1) in set.lines() {
        let Some(d) = directive::parse_axis(&ann.name, mode) else {
            continue;
        };

        if !seen.insert(d.name.clone()) {
            return Err(PlotmeterError::DuplicateCalibration { name: d.name });
        }

        let axis = AxisCalibration::new(d.name, r0, r1, d.a, d.b, d.log)?;
        tracing::debug!(
            axis = axis.name(),
            a = d.a,
            b = d.b,
            log = d.log,
            "found axis calibration"
        );
        axes.push(axis);
    }

    Ok(axes)
}

/// Finds every scale directive among the line annotations, in input order.
///
/// # Errors
/// Fails on the first invalid calibration or on a repeated scale name.
pub fn find_scales(
    set: &AnnotationSet,
    mode: NameMatch,
) -> Result<Vec<ScaleCalibration>, PlotmeterError> {
    let mut scales = Vec::new();
    let mut seen = HashSet::new();

    for (ann, r0, r1) in set.lines() {
        let Some(d) = directive::parse_scale(&ann.name, mode) else {
            continue;
        };

        if !seen.insert(d.name.clone()) {
            return Err(PlotmeterError::DuplicateCalibration { name: d.name });
        }

        let scale = ScaleCalibration::new(d.name, r0, r1, d.length)?;
        tracing::debug!(
            scale = scale.name(),
            units_per_px = scale.units_per_px(),
            "found scale calibration"
        );
        scales.push(scale);
    }

    Ok(scales)
}

/// Returns the line names that look like a directive (`word:`) but parse as
/// neither an axis nor a scale, in input order, logging a warning for each.
///
/// Such lines are treated as ordinary labels.
pub fn unparsed_directives(set: &AnnotationSet, mode: NameMatch) -> Vec<&str> {
    set.lines()
        .map(|(ann, _, _)| ann.name.as_str())
        .filter(|name| {
            directive::looks_like_directive(name)
                && directive::parse_axis(name, mode).is_none()
                && directive::parse_scale(name, mode).is_none()
        })
        .inspect(|name| {
            tracing::warn!(
                name,
                "line name looks like a calibration but does not parse; treating it as a label"
            );
        })
        .collect()
}
