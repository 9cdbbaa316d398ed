/// A range of real values, used for ray distance windows and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The same interval with its upper bound lowered to `max`.
    pub fn with_max(&self, max: f64) -> Interval {
        Interval::new(self.min, self.max.min(max))
    }

    /// Strictly positive distances along a ray, used with `surrounds`.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// The displayable range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
