#![allow(dead_code)]

use plotmeter::ir::{Annotation, AnnotationSet, Coord};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const TAGS: [&str; 3] = ["A", "B", "C"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Relative closeness check used by projection properties.
pub fn close(actual: f64, expected: f64, rel: f64) -> Result<(), String> {
    let tol = rel * expected.abs().max(1.0);
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(format!("{} differs from {} by more than {}", actual, expected, tol))
    }
}

pub fn arb_coord(limit: f64) -> impl Strategy<Value = Coord> {
    (-limit..limit, -limit..limit).prop_map(|(x, y)| Coord::new(x, y))
}

/// Two image-space endpoints at least a few pixels apart.
pub fn arb_segment() -> impl Strategy<Value = (Coord, Coord)> {
    (arb_coord(2000.0), 5.0..1500.0f64, 0.0..std::f64::consts::TAU).prop_map(
        |(r0, len, angle)| {
            let r1 = Coord::new(r0.x + len * angle.cos(), r0.y + len * angle.sin());
            (r0, r1)
        },
    )
}

pub fn arb_tags() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len())
}

/// A tagged point annotation somewhere on a 4000x4000 image.
pub fn arb_point() -> BoxedStrategy<Annotation> {
    (arb_coord(4000.0), arb_tags())
        .prop_map(|(at, tags)| {
            tags.into_iter()
                .fold(Annotation::point("", at), |ann, tag| ann.with_tag(tag))
        })
        .boxed()
}

/// Plain (non-calibration) tagged lines.
pub fn arb_line() -> BoxedStrategy<Annotation> {
    ("[a-z]{1,8}", arb_coord(4000.0), arb_coord(4000.0), arb_tags())
        .prop_map(|(name, start, end, tags)| {
            tags.into_iter()
                .fold(Annotation::line(name, start, end), |ann, tag| ann.with_tag(tag))
        })
        .boxed()
}

/// A mix of points and plain lines, without any calibration.
pub fn arb_annotations(max: usize) -> BoxedStrategy<AnnotationSet> {
    proptest::collection::vec(prop_oneof![arb_point(), arb_line()], 0..max)
        .prop_map(AnnotationSet::new)
        .boxed()
}
