//! Cubic parametric (Bezier) curve evaluated as a function of x.
//!
//! The curve is defined by `x(t)` and `y(t)` for `t` in [0, 1]. Evaluating
//! `y` at a given `x` means solving `x(t) = x` first. The solver bisects a
//! fixed number of times for a given tolerance and then interpolates inside the
//! final bracket, so the solution is continuous and non-decreasing in `x`.

/// Upper bound on bisection iterations
const MAX_BISECTION_STEPS: usize = 64;

/// Below this `|dx/dt|` the slope is taken from a secant instead
const MIN_PARAMETRIC_SLOPE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cubic Bezier curve with an x-monotone control polygon
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    points: [Point; 4],
    epsilon: f64,
}

impl CubicBezier {
    /// Create a curve from four control points.
    ///
    /// `epsilon` is the default tolerance on `x` used when inverting `x(t)`.
    ///
    /// # Panics
    /// If the control points are not ordered by x, or `epsilon` is not positive.
    pub fn new(points: [Point; 4], epsilon: f64) -> Self {
        assert!(
            epsilon > 0.0 && epsilon.is_finite(),
            "bezier epsilon must be a positive number (got {epsilon})"
        );
        assert!(
            points.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
            "bezier control points must be finite"
        );
        assert!(
            points.windows(2).all(|w| w[0].x <= w[1].x),
            "bezier control points must be ordered by x: {points:?}"
        );
        Self { points, epsilon }
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn sample_x(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points;
        cubic(p0.x, p1.x, p2.x, p3.x, t)
    }

    #[inline]
    pub fn sample_y(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points;
        cubic(p0.y, p1.y, p2.y, p3.y, t)
    }

    #[inline]
    fn sample_dx(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points;
        cubic_derivative(p0.x, p1.x, p2.x, p3.x, t)
    }

    #[inline]
    fn sample_dy(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points;
        cubic_derivative(p0.y, p1.y, p2.y, p3.y, t)
    }

    /// Find `t` with `x(t) = x`, to within `epsilon` on `x`.
    ///
    /// Inputs left of the first control point map to `t = 0`, inputs right of
    /// the last one map to `t = 1`. The bracket is halved until its width along
    /// x drops below `epsilon`; the number of halvings depends only on the curve
    /// and `epsilon`, never on `x`, so larger inputs never get a smaller `t`.
    pub fn solve_t(&self, x: f64, epsilon: f64) -> f64 {
        let (first, last) = (self.points[0].x, self.points[3].x);
        if x <= first {
            return 0.0;
        }
        if x >= last {
            return 1.0;
        }

        // Keeps x(low) < x <= x(high)
        let span = last - first;
        let (mut low, mut high) = (0.0_f64, 1.0_f64);
        let (mut x_low, mut x_high) = (first, last);
        for _ in 0..MAX_BISECTION_STEPS {
            if (high - low) * span < epsilon {
                break;
            }
            let mid = (low + high) / 2.0;
            let sampled = self.sample_x(mid);
            if sampled < x {
                low = mid;
                x_low = sampled;
            } else {
                high = mid;
                x_high = sampled;
            }
        }

        let run = x_high - x_low;
        if run <= 0.0 {
            return high;
        }
        let fraction = ((x - x_low) / run).clamp(0.0, 1.0);
        low + (high - low) * fraction
    }

    /// Evaluate `y(x)` with a caller-supplied tolerance
    pub fn evaluate_with_epsilon(&self, x: f64, epsilon: f64) -> f64 {
        self.sample_y(self.solve_t(x, epsilon))
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.evaluate_with_epsilon(x, self.epsilon)
    }

    /// Slope dy/dx at `x`
    pub fn derivative(&self, x: f64) -> f64 {
        let t = self.solve_t(x, self.epsilon);
        self.slope_at(t)
    }

    /// Slope dy/dx at the last control point, from the parametric derivative at `t = 1`
    pub fn end_slope(&self) -> f64 {
        self.slope_at(1.0)
    }

    fn slope_at(&self, t: f64) -> f64 {
        let dx = self.sample_dx(t);
        if dx.abs() >= MIN_PARAMETRIC_SLOPE {
            return self.sample_dy(t) / dx;
        }
        // dx/dt vanishes where control points coincide; fall back to the
        // secant over a small parameter step.
        let h = 1e-4;
        let (a, b) = if t + h <= 1.0 { (t, t + h) } else { (t - h, t) };
        let run = self.sample_x(b) - self.sample_x(a);
        if run.abs() < f64::EPSILON {
            return 0.0;
        }
        (self.sample_y(b) - self.sample_y(a)) / run
    }
}

#[inline]
fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[inline]
fn cubic_derivative(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * (p1 - p0) + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}
