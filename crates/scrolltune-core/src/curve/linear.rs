use super::bezier::Point;

/// Straight line through two points, extended in both directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCurve {
    start: Point,
    end: Point,
}

impl LinearCurve {
    /// # Panics
    /// If both points share the same x coordinate.
    pub fn new(start: Point, end: Point) -> Self {
        assert!(
            start.x != end.x,
            "linear curve endpoints must have distinct x coordinates (got {})",
            start.x
        );
        Self { start, end }
    }

    /// Identity line through (0,0) and (1,1)
    pub fn unit() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        (self.end.y - self.start.y) / (self.end.x - self.start.x)
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.start.y + self.slope() * (x - self.start.x)
    }
}

impl Default for LinearCurve {
    fn default() -> Self {
        Self::unit()
    }
}
