//! Linear scale for continuous-to-continuous mapping.

use super::Scale;

/// Linear scale mapping a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    /// Create a new linear scale.
    #[must_use]
    pub const fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Get the domain extent.
    #[must_use]
    pub const fn domain(&self) -> (f32, f32) {
        self.domain
    }

    /// Replace the domain extent.
    pub fn set_domain(&mut self, min: f32, max: f32) {
        self.domain = (min, max);
    }

    /// Get the range extent.
    #[must_use]
    pub const fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Replace the range extent.
    pub fn set_range(&mut self, start: f32, end: f32) {
        self.range = (start, end);
    }

    /// Map a domain value to a pixel position.
    ///
    /// A zero-span domain maps everything to the range midpoint.
    #[must_use]
    pub fn convert(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Invert a pixel position back into the domain.
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value - r0) / (r1 - r0);
        d0 + t * (d1 - d0)
    }
}

impl Scale<f32> for LinearScale {
    fn convert(&self, value: &f32) -> f32 {
        LinearScale::convert(self, *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_endpoints() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_relative_eq!(scale.convert(0.0), 0.0);
        assert_relative_eq!(scale.convert(50.0), 0.5);
        assert_relative_eq!(scale.convert(100.0), 1.0);
    }

    #[test]
    fn test_convert_inverted_range() {
        // Screen coordinates grow downward, so value axes flip the range.
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0));
        assert_relative_eq!(scale.convert(0.0), 200.0);
        assert_relative_eq!(scale.convert(10.0), 0.0);
    }

    #[test]
    fn test_invert_round_trips() {
        let scale = LinearScale::new((-3.0, 5.0), (100.0, 500.0));
        assert_relative_eq!(scale.invert(scale.convert(2.0)), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new((4.0, 4.0), (0.0, 100.0));
        assert_relative_eq!(scale.convert(4.0), 50.0);
        assert_relative_eq!(scale.convert(999.0), 50.0);
    }

    #[test]
    fn test_mutable_domain_and_range() {
        let mut scale = LinearScale::default();
        scale.set_domain(0.0, 4.0);
        scale.set_range(0.0, 40.0);
        assert_relative_eq!(scale.convert(1.0), 10.0);
    }
}
