//! Response prediction integration tests
//!
//! Exercises the full curve → peak → trim path the way the session core
//! uses it: realistic multi-band configurations, comparability of curves
//! across configurations, and trim symmetry.

use ep_core::{EqBand, EqConfig, FilterShape};
use ep_dsp::{auto_trim, evaluate, frequency_grid};

fn v_shape(name: &str) -> EqConfig {
    EqConfig::new(
        name,
        -4.0,
        vec![
            EqBand::new(FilterShape::LowShelf, 100.0, 5.0, 0.71),
            EqBand::new(FilterShape::Peaking, 2500.0, -3.0, 1.8),
            EqBand::new(FilterShape::HighShelf, 8000.0, 4.0, 0.71),
        ],
    )
}

fn presence_boost(name: &str) -> EqConfig {
    EqConfig::new(
        name,
        0.0,
        vec![EqBand::new(FilterShape::Peaking, 3000.0, 4.0, 1.0)],
    )
}

#[test]
fn curves_share_one_grid() {
    let a = evaluate(&v_shape("a")).unwrap();
    let b = evaluate(&presence_boost("b")).unwrap();
    let grid = frequency_grid();

    assert_eq!(a.points.len(), grid.len());
    assert_eq!(b.points.len(), grid.len());
    for (pa, pb) in a.points.iter().zip(&b.points) {
        assert_eq!(pa.frequency_hz, pb.frequency_hz);
    }
}

#[test]
fn v_shape_curve_has_expected_profile() {
    let spectrum = evaluate(&v_shape("v")).unwrap();

    let db_at = |target: f64| {
        spectrum
            .points
            .iter()
            .min_by(|x, y| {
                (x.frequency_hz - target)
                    .abs()
                    .total_cmp(&(y.frequency_hz - target).abs())
            })
            .unwrap()
            .magnitude_db
    };

    // Shelved lows and highs sit above the scooped mids.
    assert!(db_at(40.0) > db_at(2500.0) + 5.0);
    assert!(db_at(16000.0) > db_at(2500.0) + 5.0);
    // Preamp pulls the whole curve down: the mid scoop lands below -6 dB.
    assert!(db_at(2500.0) < -6.0);
}

#[test]
fn peak_tracks_the_hottest_region() {
    let spectrum = evaluate(&presence_boost("p")).unwrap();
    let max_point = spectrum
        .points
        .iter()
        .max_by(|x, y| x.magnitude_db.total_cmp(&y.magnitude_db))
        .unwrap();

    assert_eq!(spectrum.peak_gain_db, max_point.magnitude_db);
    // The hottest grid point sits at the boosted band.
    assert!(max_point.frequency_hz > 2000.0 && max_point.frequency_hz < 4500.0);
}

#[test]
fn trim_is_antisymmetric() {
    let a = v_shape("a");
    let b = presence_boost("b");
    let ab = auto_trim(&a, &b).unwrap();
    let ba = auto_trim(&b, &a).unwrap();
    assert!((ab + ba).abs() < 1e-12);
}

#[test]
fn trim_compensates_the_peak_difference() {
    let a = v_shape("a");
    let b = presence_boost("b");
    let trim = auto_trim(&a, &b).unwrap();

    let peak_a = evaluate(&a).unwrap().peak_gain_db;
    let peak_b = evaluate(&b).unwrap().peak_gain_db;
    assert!((peak_b + trim - peak_a).abs() < 1e-12);
}
