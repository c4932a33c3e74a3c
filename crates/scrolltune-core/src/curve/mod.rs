//! Numeric curves `y(x)` used for animation shaping and scroll acceleration.
//!
//! - `linear` - Straight line through two points
//! - `bezier` - Cubic parametric curve evaluated by inverting `x(t)`
//! - `capped` - Acceleration curve: flat head, Bezier body, affine tail
//!
//! Every variant is total: it returns a value for any finite input.

pub mod bezier;
pub mod capped;
pub mod linear;

pub use bezier::{CubicBezier, Point};
pub use capped::CappedAccelerationCurve;
pub use linear::LinearCurve;

/// A curve usable by the animation and acceleration code
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Linear(LinearCurve),
    Bezier(CubicBezier),
    CappedAcceleration(CappedAccelerationCurve),
}

impl Curve {
    /// The identity line through (0,0) and (1,1)
    pub fn linear() -> Self {
        Self::Linear(LinearCurve::unit())
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Linear(curve) => curve.evaluate(x),
            Self::Bezier(curve) => curve.evaluate(x),
            Self::CappedAcceleration(curve) => curve.evaluate(x),
        }
    }

    /// Slope dy/dx at `x`
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Self::Linear(curve) => curve.slope(),
            Self::Bezier(curve) => curve.derivative(x),
            Self::CappedAcceleration(curve) => curve.derivative(x),
        }
    }

    /// Sample `samples` evenly spaced points over `[start, end]`
    pub fn trace(&self, start: f64, end: f64, samples: usize) -> Vec<(f64, f64)> {
        match samples {
            0 => Vec::new(),
            1 => vec![(start, self.evaluate(start))],
            n => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = start + step * i as f64;
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }

    /// Render a trace as `x,y` lines for logging
    pub fn trace_string(&self, start: f64, end: f64, samples: usize) -> String {
        self.trace(start, end, samples)
            .iter()
            .map(|(x, y)| format!("{x:.3},{y:.3}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<LinearCurve> for Curve {
    fn from(curve: LinearCurve) -> Self {
        Self::Linear(curve)
    }
}

impl From<CubicBezier> for Curve {
    fn from(curve: CubicBezier) -> Self {
        Self::Bezier(curve)
    }
}

impl From<CappedAccelerationCurve> for Curve {
    fn from(curve: CappedAccelerationCurve) -> Self {
        Self::CappedAcceleration(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_sample_count() {
        let curve = Curve::linear();
        assert!(curve.trace(0.0, 1.0, 0).is_empty());
        assert_eq!(curve.trace(0.5, 1.0, 1), vec![(0.5, 0.5)]);

        let trace = curve.trace(0.0, 1.0, 5);
        assert_eq!(trace.len(), 5);
        assert!((trace[4].0 - 1.0).abs() < 1e-12);
        assert!((trace[2].1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dispatch() {
        let bezier: Curve = CubicBezier::new(
            [
                Point::new(0.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(0.5, 1.0),
                Point::new(1.0, 1.0),
            ],
            0.001,
        )
        .into();
        assert!((bezier.evaluate(1.0) - 1.0).abs() < 1e-9);
        assert!(bezier.evaluate(0.5) > 0.5);

        let capped: Curve = CappedAccelerationCurve::new(1.0, 2.0, 3.0, 4.0, 1.0, 0.001).into();
        assert!((capped.evaluate(0.0) - 2.0).abs() < 1e-12);
        assert!((capped.derivative(10.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_string() {
        let text = Curve::linear().trace_string(0.0, 1.0, 2);
        assert_eq!(text, "0.000,0.000\n1.000,1.000");
    }
}
