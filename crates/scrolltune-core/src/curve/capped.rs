//! Capped acceleration curve.
//!
//! Maps tick speed (ticks per second) to pixels per tick. The curve has three
//! pieces:
//!
//! - below `x_min` it stays at `y_min`, so isolated ticks are never accelerated
//! - between `x_min` and `x_max` it follows a cubic Bezier from `(x_min, y_min)`
//!   to `(x_max, y_max)`
//! - above `x_max` it continues as a straight line with the Bezier's slope at
//!   `x_max`
//!
//! `curvature` pulls the second control point towards `x_min`, which raises
//! the sensitivity for medium tick speeds. A curvature of 1 gives the straight
//! chord. The third control point stays on the chord, so the end slope always
//! equals the chord slope and the tail joins the Bezier with matching slope.

use super::bezier::{CubicBezier, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct CappedAccelerationCurve {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    curvature: f64,
    body: CubicBezier,
    tail_slope: f64,
}

impl CappedAccelerationCurve {
    /// # Panics
    /// If any argument is not finite, `x_min >= x_max`, `y_min > y_max`, or
    /// `curvature <= 0`. A curve built from such values would not be monotonic.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64, curvature: f64, epsilon: f64) -> Self {
        assert!(
            [x_min, y_min, x_max, y_max, curvature]
                .iter()
                .all(|v| v.is_finite()),
            "acceleration curve parameters must be finite"
        );
        assert!(
            x_min < x_max,
            "acceleration curve needs x_min < x_max (got {x_min} >= {x_max})"
        );
        assert!(
            y_min <= y_max,
            "acceleration curve needs y_min <= y_max (got {y_min} > {y_max})"
        );
        assert!(
            curvature > 0.0,
            "acceleration curve curvature must be positive (got {curvature})"
        );

        let dx = x_max - x_min;
        let dy = y_max - y_min;
        let lead = (1.0 / (3.0 * curvature)).min(2.0 / 3.0);

        let body = CubicBezier::new(
            [
                Point::new(x_min, y_min),
                Point::new(x_min + dx * lead, y_min + dy / 3.0),
                Point::new(x_min + dx * 2.0 / 3.0, y_min + dy * 2.0 / 3.0),
                Point::new(x_max, y_max),
            ],
            epsilon,
        );
        let tail_slope = body.end_slope();

        Self {
            x_min,
            y_min,
            x_max,
            y_max,
            curvature,
            body,
            tail_slope,
        }
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Slope of the linear extension beyond `x_max`
    pub fn tail_slope(&self) -> f64 {
        self.tail_slope
    }

    pub fn body(&self) -> &CubicBezier {
        &self.body
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        if x < self.x_min {
            self.y_min
        } else if x <= self.x_max {
            self.body.evaluate(x)
        } else {
            self.y_max + self.tail_slope * (x - self.x_max)
        }
    }

    pub fn derivative(&self, x: f64) -> f64 {
        if x < self.x_min {
            0.0
        } else if x <= self.x_max {
            self.body.derivative(x)
        } else {
            self.tail_slope
        }
    }
}
