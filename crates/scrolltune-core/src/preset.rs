//! Animation curve presets and their physical parameters.
//!
//! The table is hand-tuned; values are reproduced as-is rather than derived.

use std::fmt;
use std::str::FromStr;

use crate::curve::{CubicBezier, Curve, Point};
use crate::error::ConfigError;

/// Tolerance for the animation base curves. Looser values make animations choppy.
const BASE_CURVE_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCurvePreset {
    NoInertia,
    LowInertia,
    MediumInertia,
    HighInertia,
    HighInertiaPlusTrackpadSim,
    /// Applied while a modifier drives a touch gesture (zoom, rotate)
    TouchDriver,
    /// Applied while a modifier drives a linear gesture (swipes, pinch)
    TouchDriverLinear,
    QuickScroll,
    PreciseScroll,
    /// Drag parameters emulating a real trackpad, for gesture simulation
    Trackpad,
    Test,
}

impl AnimationCurvePreset {
    pub const ALL: [AnimationCurvePreset; 11] = [
        Self::NoInertia,
        Self::LowInertia,
        Self::MediumInertia,
        Self::HighInertia,
        Self::HighInertiaPlusTrackpadSim,
        Self::TouchDriver,
        Self::TouchDriverLinear,
        Self::QuickScroll,
        Self::PreciseScroll,
        Self::Trackpad,
        Self::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoInertia => "no_inertia",
            Self::LowInertia => "low_inertia",
            Self::MediumInertia => "medium_inertia",
            Self::HighInertia => "high_inertia",
            Self::HighInertiaPlusTrackpadSim => "high_inertia_plus_trackpad_sim",
            Self::TouchDriver => "touch_driver",
            Self::TouchDriverLinear => "touch_driver_linear",
            Self::QuickScroll => "quick_scroll",
            Self::PreciseScroll => "precise_scroll",
            Self::Trackpad => "trackpad",
            Self::Test => "test",
        }
    }

    /// Parameters for this preset
    pub fn params(&self) -> AnimationCurveParameters {
        params_for(*self)
    }
}

impl fmt::Display for AnimationCurvePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationCurvePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "preset".to_string(),
                value: s.to_string(),
            })
    }
}

/// Physics of the momentum phase after input stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCurve {
    pub exponent: f64,
    pub coefficient: f64,
    pub stop_speed: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCurveParameters {
    /// Shape of each step's animation; `None` when the preset is only used for its drag
    pub base_curve: Option<Curve>,
    /// Duration of one step on the base curve. A drag curve lengthens the actual step.
    pub base_ms_per_step: Option<u32>,
    /// `None` means only the base curve is used
    pub drag: Option<DragCurve>,
    /// Send gesture scroll events instead of plain continuous scroll events
    pub send_gesture_scrolls: bool,
    /// Send momentum events while the drag curve is in control
    pub send_momentum_scrolls: bool,
}

impl AnimationCurveParameters {
    /// Base curve followed by a drag curve
    ///
    /// # Panics
    /// If momentum scrolls are requested without gesture scrolls.
    pub fn with_drag(
        base_curve: Option<Curve>,
        base_ms_per_step: Option<u32>,
        drag: DragCurve,
        send_gesture_scrolls: bool,
        send_momentum_scrolls: bool,
    ) -> Self {
        assert!(
            !send_momentum_scrolls || send_gesture_scrolls,
            "momentum scrolls require gesture scrolls"
        );
        Self {
            base_curve,
            base_ms_per_step,
            drag: Some(drag),
            send_gesture_scrolls,
            send_momentum_scrolls,
        }
    }

    /// Base curve only, no momentum phase
    pub fn base_only(base_curve: Curve, ms_per_step: u32, send_gesture_scrolls: bool) -> Self {
        Self {
            base_curve: Some(base_curve),
            base_ms_per_step: Some(ms_per_step),
            drag: None,
            send_gesture_scrolls,
            send_momentum_scrolls: false,
        }
    }

    #[inline]
    pub fn use_drag_curve(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_exponent(&self) -> Option<f64> {
        self.drag.map(|d| d.exponent)
    }

    pub fn drag_coefficient(&self) -> Option<f64> {
        self.drag.map(|d| d.coefficient)
    }

    pub fn stop_speed(&self) -> Option<u32> {
        self.drag.map(|d| d.stop_speed)
    }
}

/// Bezier easing from rest, used by the touch driver and the no-inertia preset
fn ease_in_bezier(x2: f64) -> Curve {
    CubicBezier::new(
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(x2, 1.0),
            Point::new(1.0, 1.0),
        ],
        BASE_CURVE_EPSILON,
    )
    .into()
}

fn drag(exponent: f64, coefficient: f64, stop_speed: u32) -> DragCurve {
    DragCurve {
        exponent,
        coefficient,
        stop_speed,
    }
}

/// Map a preset to its parameters
pub fn params_for(preset: AnimationCurvePreset) -> AnimationCurveParameters {
    use AnimationCurvePreset::*;
    type P = AnimationCurveParameters;

    match preset {
        // User selected
        NoInertia => P::base_only(ease_in_bezier(0.66), 250, false),
        LowInertia => P::with_drag(Some(Curve::linear()), Some(140), drag(1.05, 15.0, 30), false, false),
        MediumInertia => P::with_drag(Some(Curve::linear()), Some(190), drag(1.0, 17.0, 50), false, false),
        // Snappiest curve that still leaves room for the apps' own momentum handling
        HighInertia => P::with_drag(Some(Curve::linear()), Some(205), drag(0.7, 40.0, 30), false, false),
        HighInertiaPlusTrackpadSim => {
            P::with_drag(Some(Curve::linear()), Some(205), drag(0.7, 40.0, 30), true, true)
        }

        // Dynamically applied
        TouchDriver => P::base_only(ease_in_bezier(0.5), 250, false),
        TouchDriverLinear => P::base_only(Curve::linear(), 180, false),
        QuickScroll => P::with_drag(Some(Curve::linear()), Some(220), drag(0.7, 30.0, 1), true, true),
        PreciseScroll => P::with_drag(Some(Curve::linear()), Some(140), drag(1.0, 20.0, 50), false, false),

        // Other
        Trackpad => P::with_drag(None, None, drag(0.7, 30.0, 1), true, true),
        Test => P::base_only(Curve::linear(), 350, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_implies_gesture() {
        for preset in AnimationCurvePreset::ALL {
            let params = params_for(preset);
            assert!(
                !params.send_momentum_scrolls || params.send_gesture_scrolls,
                "{preset} breaks the momentum/gesture invariant"
            );
        }
    }

    #[test]
    fn test_literal_table() {
        // (preset, ms per step, drag (exp, coeff, stop), gesture, momentum)
        let table: [(AnimationCurvePreset, Option<u32>, Option<(f64, f64, u32)>, bool, bool); 11] = [
            (AnimationCurvePreset::NoInertia, Some(250), None, false, false),
            (AnimationCurvePreset::LowInertia, Some(140), Some((1.05, 15.0, 30)), false, false),
            (AnimationCurvePreset::MediumInertia, Some(190), Some((1.0, 17.0, 50)), false, false),
            (AnimationCurvePreset::HighInertia, Some(205), Some((0.7, 40.0, 30)), false, false),
            (AnimationCurvePreset::HighInertiaPlusTrackpadSim, Some(205), Some((0.7, 40.0, 30)), true, true),
            (AnimationCurvePreset::TouchDriver, Some(250), None, false, false),
            (AnimationCurvePreset::TouchDriverLinear, Some(180), None, false, false),
            (AnimationCurvePreset::QuickScroll, Some(220), Some((0.7, 30.0, 1)), true, true),
            (AnimationCurvePreset::PreciseScroll, Some(140), Some((1.0, 20.0, 50)), false, false),
            (AnimationCurvePreset::Trackpad, None, Some((0.7, 30.0, 1)), true, true),
            (AnimationCurvePreset::Test, Some(350), None, false, false),
        ];

        for (preset, ms, drag, gesture, momentum) in table {
            let params = params_for(preset);
            assert_eq!(params.base_ms_per_step, ms, "{preset}");
            assert_eq!(params.use_drag_curve(), drag.is_some(), "{preset}");
            if let Some((exponent, coefficient, stop)) = drag {
                assert_eq!(params.drag_exponent(), Some(exponent), "{preset}");
                assert_eq!(params.drag_coefficient(), Some(coefficient), "{preset}");
                assert_eq!(params.stop_speed(), Some(stop), "{preset}");
            }
            assert_eq!(params.send_gesture_scrolls, gesture, "{preset}");
            assert_eq!(params.send_momentum_scrolls, momentum, "{preset}");
        }
    }

    #[test]
    fn test_base_curves() {
        assert!(params_for(AnimationCurvePreset::Trackpad).base_curve.is_none());
        assert_eq!(
            params_for(AnimationCurvePreset::LowInertia).base_curve,
            Some(Curve::linear())
        );

        let touch = params_for(AnimationCurvePreset::TouchDriver)
            .base_curve
            .unwrap();
        assert!(matches!(touch, Curve::Bezier(_)));
        assert!((touch.evaluate(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in AnimationCurvePreset::ALL {
            assert_eq!(preset.as_str().parse::<AnimationCurvePreset>().unwrap(), preset);
        }
        assert!("warp_speed".parse::<AnimationCurvePreset>().is_err());
    }

    #[test]
    #[should_panic(expected = "momentum scrolls require gesture scrolls")]
    fn test_invalid_combination_rejected() {
        AnimationCurveParameters::with_drag(None, None, drag(1.0, 1.0, 1), false, true);
    }
}
