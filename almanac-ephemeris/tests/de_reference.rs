//! Checks interpolation against a published JPL `testpo.*` reference file.
//!
//! Point the `ALMANAC_EPHEMERIS` environment variable at a binary ephemeris
//! and `ALMANAC_TESTPO` at the matching `testpo` file to run the comparison;
//! without them the test passes vacuously, so ordinary `cargo test` runs do
//! not need the multi-hundred-megabyte data set.

use almanac_ephemeris::{Ephemeris, EphemerisComponent};
use std::fs::File;
use std::io::{BufRead, BufReader};

struct TestPoint {
    jd: f64,
    target: EphemerisComponent,
    center: EphemerisComponent,
    axis: usize,
    value: f64,
}

/// Parses the rows after the `EOT` sentinel. Component and axis numbers are
/// 1-based; the component numbering matches the discriminant order shifted
/// by one.
fn parse_testpo(path: &str) -> Vec<TestPoint> {
    let reader = BufReader::new(File::open(path).unwrap());
    let mut rows = Vec::new();
    let mut seen_sentinel = false;

    for line in reader.lines() {
        let line = line.unwrap();
        if !seen_sentinel {
            seen_sentinel = line.trim() == "EOT";
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 7 {
            continue;
        }
        let target = EphemerisComponent::from_index(fields[3].parse::<usize>().unwrap() - 1);
        let center = EphemerisComponent::from_index(fields[4].parse::<usize>().unwrap() - 1);
        let (Some(target), Some(center)) = (target, center) else {
            continue;
        };
        rows.push(TestPoint {
            jd: fields[2].parse().unwrap(),
            target,
            center,
            axis: fields[5].parse::<usize>().unwrap() - 1,
            value: fields[6].parse().unwrap(),
        });
    }
    rows
}

#[test]
fn matches_published_test_points() {
    let (Ok(ephemeris_path), Ok(testpo_path)) = (
        std::env::var("ALMANAC_EPHEMERIS"),
        std::env::var("ALMANAC_TESTPO"),
    ) else {
        return;
    };

    let mut ephemeris = Ephemeris::open(&ephemeris_path).unwrap();
    let epoch = ephemeris.constant("JDEPOC").unwrap();
    let start = ephemeris.start_epoch();
    let end = ephemeris.final_epoch();

    let mut checked = 0usize;
    for point in parse_testpo(&testpo_path) {
        if point.jd < start || point.jd > end {
            continue;
        }

        let state = ephemeris
            .interpolate(point.jd, point.target, point.center)
            .unwrap();

        // Libration angles grow secularly, so the published tolerance widens
        // with distance from the ephemeris epoch.
        let mut tolerance = 1e-13;
        if point.target == EphemerisComponent::MoonLibration {
            tolerance *= 1.0 + 100.0 * (point.jd - epoch).abs() / 365.25;
        }

        let difference = (state[point.axis] - point.value).abs();
        assert!(
            difference < tolerance,
            "jd {} {} rel {} axis {}: {} vs {} (diff {:e})",
            point.jd,
            point.target,
            point.center,
            point.axis,
            state[point.axis],
            point.value,
            difference
        );
        checked += 1;
    }

    assert!(checked > 0, "no test points fell inside the ephemeris range");
}
