//! Acceleration curve synthesis.
//!
//! An acceleration curve maps tick speed (ticks per second) to pixels per tick.
//! Its shape is fixed by two timing bounds and two pixel rates:
//!
//! - ticks further apart than `tick_interval_max` are not consecutive, so
//!   every speed below `1 / tick_interval_max` gets `px_per_tick_base`
//! - at `1 / tick_interval_accel_end` the curve reaches `px_per_tick_end` and
//!   continues linearly from there
//!
//! The standard derivation turns user settings (speed tier, precise flag,
//! smoothing preset, screen size) into those two pixel rates.

use std::time::Duration;

use tracing::{debug, trace};

use crate::curve::{CappedAccelerationCurve, Curve};
use crate::preset::AnimationCurvePreset;
use crate::settings::ScrollSpeed;

/// Screen dimension the pixel rates were tuned on
pub const REFERENCE_SCREEN_SIZE: u32 = 1080;

/// Curvature of every standard curve
pub const STANDARD_CURVATURE: f64 = 2.5;

/// Tolerance on tick speed when evaluating a live acceleration curve
pub const ACCELERATION_EPSILON: f64 = 0.001;

/// Starting rate when the precise setting is on
pub const PRECISE_PX_PER_TICK_BASE: f64 = 10.0;

/// Samples in the debug trace of a newly built curve
const TRACE_SAMPLES: usize = 50;

/// Build an acceleration curve from pixel rates and timing bounds.
///
/// # Panics
/// If either interval is zero, `tick_interval_accel_end >= tick_interval_max`,
/// or `px_per_tick_end < px_per_tick_base`.
pub fn synthesize(
    px_per_tick_base: f64,
    px_per_tick_end: f64,
    tick_interval_max: Duration,
    tick_interval_accel_end: Duration,
    curvature: f64,
) -> Curve {
    assert!(
        !tick_interval_max.is_zero() && !tick_interval_accel_end.is_zero(),
        "tick intervals must be positive (max {tick_interval_max:?}, acceleration end {tick_interval_accel_end:?})"
    );
    assert!(
        tick_interval_accel_end < tick_interval_max,
        "acceleration must end at a shorter tick interval than {tick_interval_max:?} (got {tick_interval_accel_end:?})"
    );

    let x_min = 1.0 / tick_interval_max.as_secs_f64();
    let x_max = 1.0 / tick_interval_accel_end.as_secs_f64();

    let curve: Curve = CappedAccelerationCurve::new(
        x_min,
        px_per_tick_base,
        x_max,
        px_per_tick_end,
        curvature,
        ACCELERATION_EPSILON,
    )
    .into();

    if tracing::enabled!(tracing::Level::TRACE) {
        trace!(
            samples = %curve.trace_string(x_min, x_max, TRACE_SAMPLES),
            "Built acceleration curve"
        );
    }

    curve
}

/// Correction added to the end rate so larger screens scroll further per tick.
///
/// Linear in the ratio to the 1080px reference above it, linear in the
/// inverse ratio below it. A size of 0 counts as the reference.
pub fn screen_size_summand(screen_size: u32) -> f64 {
    if screen_size == 0 {
        return 0.0;
    }
    let factor = screen_size as f64 / REFERENCE_SCREEN_SIZE as f64;
    if factor >= 1.0 {
        20.0 * (factor - 1.0)
    } else {
        -20.0 * (1.0 / factor - 1.0)
    }
}

/// Scale applied to the tier rates for the active smoothing preset.
///
/// # Panics
/// For presets that bring their own acceleration curve (quick, precise) or are
/// never active while scrolling (trackpad, test).
pub fn inertia_factor(smooth_enabled: bool, preset: AnimationCurvePreset) -> f64 {
    if !smooth_enabled {
        return 1.0 / 2.0;
    }
    match preset {
        AnimationCurvePreset::NoInertia
        | AnimationCurvePreset::LowInertia
        | AnimationCurvePreset::TouchDriver
        | AnimationCurvePreset::TouchDriverLinear => 2.0 / 3.0,
        AnimationCurvePreset::MediumInertia => 3.0 / 4.0,
        AnimationCurvePreset::HighInertia | AnimationCurvePreset::HighInertiaPlusTrackpadSim => 1.0,
        AnimationCurvePreset::QuickScroll
        | AnimationCurvePreset::PreciseScroll
        | AnimationCurvePreset::Trackpad
        | AnimationCurvePreset::Test => {
            unreachable!("{preset} has no standard acceleration curve")
        }
    }
}

/// `(base, end)` pixel rates of a speed tier before inertia scaling
fn tier_rates(speed: ScrollSpeed) -> (f64, f64) {
    match speed {
        ScrollSpeed::Low => (30.0, 90.0),
        // System speed leaves acceleration to the OS; the curve is only a fallback.
        ScrollSpeed::Medium | ScrollSpeed::System => (60.0, 140.0),
        ScrollSpeed::High => (90.0, 180.0),
    }
}

/// Settings that feed the standard acceleration curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardCurveInputs {
    pub speed: ScrollSpeed,
    pub precise: bool,
    pub smooth_enabled: bool,
    pub preset: AnimationCurvePreset,
    /// Width or height of the display, depending on the scroll axis
    pub screen_size: u32,
    pub tick_interval_max: Duration,
    pub tick_interval_accel_end: Duration,
}

impl StandardCurveInputs {
    /// `(base, end)` pixel rates, truncated to whole pixels.
    ///
    /// The end rate never drops below the base rate, even on very small screens.
    pub fn px_per_tick(&self) -> (f64, f64) {
        let inertia = inertia_factor(self.smooth_enabled, self.preset);
        let (tier_base, tier_end) = tier_rates(self.speed);

        let base = if self.precise {
            PRECISE_PX_PER_TICK_BASE
        } else {
            (tier_base * inertia).trunc()
        };
        let end = (tier_end * inertia + screen_size_summand(self.screen_size)).trunc();

        debug!(base, end, screen_size = self.screen_size, "Standard px per tick");
        (base, end.max(base))
    }

    pub fn curve(&self) -> Curve {
        let (base, end) = self.px_per_tick();
        synthesize(
            base,
            end,
            self.tick_interval_max,
            self.tick_interval_accel_end,
            STANDARD_CURVATURE,
        )
    }
}

/// Low fixed rates used while the precise modifier is held
pub fn precise_curve(tick_interval_max: Duration, tick_interval_accel_end: Duration) -> Curve {
    synthesize(3.0, 30.0, tick_interval_max, tick_interval_accel_end, 1.0)
}

/// High fixed rates used while the quick modifier is held
pub fn quick_curve(tick_interval_max: Duration, tick_interval_accel_end: Duration) -> Curve {
    synthesize(100.0, 500.0, tick_interval_max, tick_interval_accel_end, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK_MAX: Duration = Duration::from_millis(160);
    const TICK_END: Duration = Duration::from_millis(15);

    fn inputs(speed: ScrollSpeed, preset: AnimationCurvePreset, screen_size: u32) -> StandardCurveInputs {
        StandardCurveInputs {
            speed,
            precise: false,
            smooth_enabled: true,
            preset,
            screen_size,
            tick_interval_max: TICK_MAX,
            tick_interval_accel_end: TICK_END,
        }
    }

    #[test]
    fn test_synthesize_bounds() {
        let curve = synthesize(30.0, 90.0, TICK_MAX, TICK_END, 2.5);
        let Curve::CappedAcceleration(capped) = &curve else {
            panic!("expected a capped acceleration curve");
        };
        assert!((capped.x_min() - 6.25).abs() < 1e-9);
        assert!((capped.y_min() - 30.0).abs() < 1e-9);
        assert!((capped.x_max() - 66.666_666).abs() < 1e-3);
        assert!((capped.y_max() - 90.0).abs() < 1e-9);

        assert!((curve.evaluate(3.0) - 30.0).abs() < 1e-9);
        let expected = 90.0 + capped.tail_slope() * (200.0 - capped.x_max());
        assert!((curve.evaluate(200.0) - expected).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "shorter tick interval")]
    fn test_synthesize_rejects_inverted_intervals() {
        synthesize(30.0, 90.0, TICK_END, TICK_MAX, 2.5);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_synthesize_rejects_zero_interval() {
        synthesize(30.0, 90.0, TICK_MAX, Duration::ZERO, 2.5);
    }

    #[test]
    fn test_screen_size_summand() {
        assert!((screen_size_summand(1080) - 0.0).abs() < 1e-12);
        assert!((screen_size_summand(2160) - 20.0).abs() < 1e-12);
        assert!((screen_size_summand(540) + 20.0).abs() < 1e-12);
        assert!((screen_size_summand(0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_inertia_factor() {
        assert!((inertia_factor(false, AnimationCurvePreset::HighInertia) - 0.5).abs() < 1e-12);
        assert!((inertia_factor(true, AnimationCurvePreset::LowInertia) - 2.0 / 3.0).abs() < 1e-12);
        assert!((inertia_factor(true, AnimationCurvePreset::MediumInertia) - 0.75).abs() < 1e-12);
        assert!((inertia_factor(true, AnimationCurvePreset::HighInertiaPlusTrackpadSim) - 1.0).abs() < 1e-12);
        // Smoothing off short-circuits before the preset matters
        assert!((inertia_factor(false, AnimationCurvePreset::QuickScroll) - 0.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "has no standard acceleration curve")]
    fn test_inertia_factor_rejects_quick_scroll() {
        inertia_factor(true, AnimationCurvePreset::QuickScroll);
    }

    #[test]
    fn test_px_per_tick_high_inertia() {
        let (base, end) = inputs(ScrollSpeed::Medium, AnimationCurvePreset::HighInertia, 1080).px_per_tick();
        assert_eq!((base, end), (60.0, 140.0));

        let (base, end) = inputs(ScrollSpeed::High, AnimationCurvePreset::HighInertia, 2160).px_per_tick();
        assert_eq!((base, end), (90.0, 200.0));
    }

    #[test]
    fn test_px_per_tick_low_inertia_truncates() {
        // 140 * 2/3 = 93.33
        let (base, end) = inputs(ScrollSpeed::Medium, AnimationCurvePreset::LowInertia, 1080).px_per_tick();
        assert_eq!((base, end), (40.0, 93.0));
    }

    #[test]
    fn test_px_per_tick_precise_and_unsmoothed() {
        let mut precise = inputs(ScrollSpeed::High, AnimationCurvePreset::HighInertia, 1080);
        precise.precise = true;
        assert_eq!(precise.px_per_tick(), (10.0, 180.0));

        let mut unsmoothed = inputs(ScrollSpeed::Low, AnimationCurvePreset::NoInertia, 1080);
        unsmoothed.smooth_enabled = false;
        assert_eq!(unsmoothed.px_per_tick(), (15.0, 45.0));
    }

    #[test]
    fn test_tiny_screen_keeps_curve_monotonic() {
        let tiny = inputs(ScrollSpeed::Low, AnimationCurvePreset::LowInertia, 100);
        let (base, end) = tiny.px_per_tick();
        assert!(end >= base);
        let curve = tiny.curve();
        assert!(curve.evaluate(500.0) >= curve.evaluate(1.0));
    }

    #[test]
    fn test_fixed_curves() {
        let precise = precise_curve(TICK_MAX, TICK_END);
        assert!((precise.evaluate(1.0) - 3.0).abs() < 1e-9);
        assert!((precise.evaluate(1.0 / 0.015) - 30.0).abs() < 1e-6);

        let quick = quick_curve(TICK_MAX, TICK_END);
        assert!((quick.evaluate(1.0) - 100.0).abs() < 1e-9);
        assert!((quick.evaluate(1.0 / 0.015) - 500.0).abs() < 1e-6);
    }
}
