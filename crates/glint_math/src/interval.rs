/// A closed range of ray parameters `[min, max]`.
///
/// Every intersection routine takes one of these to bound the accepted `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval `[min, +inf)`.
    pub fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Both ends multiplied by `s`.
    ///
    /// Used when a ray is moved into a space where distances are scaled.
    pub fn scaled(&self, s: f32) -> Interval {
        Interval::new(self.min * s, self.max * s)
    }

    /// Same lower end, new upper end.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        // Outside bounds
        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_scaled() {
        let interval = Interval::new(0.5, 4.0).scaled(2.0);
        assert_eq!(interval, Interval::new(1.0, 8.0));

        let open = Interval::from_min(1.0).scaled(3.0);
        assert_eq!(open.min, 3.0);
        assert_eq!(open.max, f32::INFINITY);
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::from_min(0.001).with_max(7.0);
        assert_eq!(interval, Interval::new(0.001, 7.0));
    }

    #[test]
    fn test_interval_inverted_contains_nothing() {
        let inverted = Interval::new(1.0, -1.0);

        assert!(!inverted.contains(0.0));
        assert!(!inverted.contains(1.0));
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::UNIVERSE;

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e10));
        assert!(universe.contains(-1e10));
        assert_eq!(universe.size(), f32::INFINITY);
    }
}
