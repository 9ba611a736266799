//! Inspect report types and terminal formatting.

use std::fmt;

use crate::export::format_value;

/// The result of inspecting an annotation set.
#[derive(Clone, Debug)]
pub struct InspectReport {
    /// Counts per annotation kind.
    pub summary: SummarySection,
    /// Tag histogram, most used first.
    pub tags: Vec<TagCount>,
    /// Axis directives, in input order.
    pub axes: Vec<AxisSummary>,
    /// Scale directives, in input order.
    pub scales: Vec<ScaleSummary>,
    /// Line names that look like directives but do not parse.
    pub unparsed: Vec<String>,
    /// Calibration errors that would make `extract` or `measure` fail.
    pub problems: Vec<String>,
}

/// Counts per annotation kind.
#[derive(Clone, Debug, Default)]
pub struct SummarySection {
    pub annotations: usize,
    pub points: usize,
    pub lines: usize,
    /// Annotations of kinds plotmeter ignores (rectangles, polygons, ...).
    pub other: usize,
    /// Annotations without any tag.
    pub untagged: usize,
}

/// A single tag with the number of annotations carrying it.
#[derive(Clone, Debug)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Clone, Debug)]
pub struct AxisSummary {
    pub name: String,
    /// Value at the first endpoint.
    pub a: f64,
    /// Value at the second endpoint.
    pub b: f64,
    pub log: bool,
}

#[derive(Clone, Debug)]
pub struct ScaleSummary {
    pub name: String,
    pub physical_length: f64,
    pub units_per_px: f64,
}

const BAR_WIDTH: usize = 20;

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_summary(f)?;
        writeln!(f)?;
        self.fmt_tags(f)?;
        writeln!(f)?;
        self.fmt_calibrations(f)?;

        if !self.problems.is_empty() {
            writeln!(f)?;
            writeln!(f, "┌─ Problems")?;
            for problem in &self.problems {
                writeln!(f, "│   ✗ {}", problem)?;
            }
            writeln!(f, "└─")?;
        }

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "┌─ Summary")?;
        writeln!(f, "│   Annotations:   {:>8}", format_number(s.annotations))?;
        writeln!(f, "│   Points:        {:>8}", format_number(s.points))?;
        writeln!(f, "│   Lines:         {:>8}", format_number(s.lines))?;
        if s.other > 0 {
            writeln!(f, "│   Other:         {:>8}", format_number(s.other))?;
        }
        writeln!(f, "│   Untagged:      {:>8}", format_number(s.untagged))?;
        writeln!(f, "└─")
    }

    fn fmt_tags(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Tags ({})", self.tags.len())?;

        if self.tags.is_empty() {
            writeln!(f, "│   No tags found.")?;
        } else {
            let max_count = self.tags.iter().map(|t| t.count).max().unwrap_or(1);
            for entry in &self.tags {
                writeln!(
                    f,
                    "│   {:<16} {:>7}  {}",
                    truncate_label(&entry.tag, 16),
                    format_number(entry.count),
                    render_bar(entry.count, max_count, BAR_WIDTH)
                )?;
            }
        }

        writeln!(f, "└─")
    }

    fn fmt_calibrations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Axes ({})", self.axes.len())?;
        for axis in &self.axes {
            writeln!(
                f,
                "│   {:<16} {} → {}{}",
                truncate_label(&axis.name, 16),
                format_value(axis.a),
                format_value(axis.b),
                if axis.log { "  (log)" } else { "" }
            )?;
        }
        writeln!(f, "└─")?;
        writeln!(f)?;

        writeln!(f, "┌─ Scales ({})", self.scales.len())?;
        for scale in &self.scales {
            writeln!(
                f,
                "│   {:<16} {} units, {} units/px",
                truncate_label(&scale.name, 16),
                format_value(scale.physical_length),
                format_value(scale.units_per_px)
            )?;
        }
        writeln!(f, "└─")?;

        if !self.unparsed.is_empty() {
            writeln!(f)?;
            writeln!(f, "┌─ Unparsed directive-like names ({})", self.unparsed.len())?;
            for name in &self.unparsed {
                writeln!(f, "│   ⚠ {:?}", name)?;
            }
            writeln!(f, "└─")?;
        }

        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Truncate a label to `max_chars` characters.
fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}
