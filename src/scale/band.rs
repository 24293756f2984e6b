//! Band scale for discrete-to-pixel mapping.

use super::Scale;

/// Band scale mapping an ordered discrete domain to contiguous pixel bands
/// of equal width.
///
/// Each domain value owns one band; `padding` reserves a fraction of the
/// step between bands (and the same fraction outside the first and last
/// band), and `round` snaps the step, band start, and bandwidth to whole
/// pixels for crisp rendering. Doubles as the per-category group sub-scale,
/// where the domain is the value-field list and the range is one category
/// band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<D> {
    domain: Vec<D>,
    range: (f32, f32),
    padding: f32,
    round: bool,
}

impl<D> Default for BandScale<D> {
    fn default() -> Self {
        Self {
            domain: Vec::new(),
            range: (0.0, 1.0),
            padding: 0.0,
            round: false,
        }
    }
}

impl<D: PartialEq> BandScale<D> {
    /// Create an empty band scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the domain values.
    #[must_use]
    pub fn domain(&self) -> &[D] {
        &self.domain
    }

    /// Replace the domain values.
    pub fn set_domain(&mut self, domain: Vec<D>) {
        self.domain = domain;
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

    /// Get the padding fraction.
    #[must_use]
    pub const fn padding(&self) -> f32 {
        self.padding
    }

    /// Set the fraction of the step reserved as padding, clamped to [0, 1).
    pub fn set_padding(&mut self, padding: f32) {
        self.padding = padding.clamp(0.0, 0.999);
    }

    /// Whether pixel snapping is on.
    #[must_use]
    pub const fn round(&self) -> bool {
        self.round
    }

    /// Enable or disable pixel snapping.
    pub fn set_round(&mut self, round: bool) {
        self.round = round;
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f32 {
        let n = self.domain.len() as f32;
        let (r0, r1) = self.range;
        let step = (r1 - r0) / 1.0f32.max(n + self.padding);
        if self.round {
            step.floor()
        } else {
            step
        }
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        let bandwidth = self.step() * (1.0 - self.padding);
        if self.round {
            bandwidth.round()
        } else {
            bandwidth
        }
    }

    /// Map a domain value to the pixel position of its band start.
    ///
    /// Values outside the domain convert to NaN.
    #[must_use]
    pub fn convert(&self, value: &D) -> f32 {
        match self.domain.iter().position(|d| d == value) {
            Some(index) => self.band_start() + self.step() * index as f32,
            None => f32::NAN,
        }
    }

    fn band_start(&self) -> f32 {
        let n = self.domain.len() as f32;
        let (r0, r1) = self.range;
        // Leftover space after n bands and inner gaps is split evenly
        // between the two outer gaps.
        let start = r0 + (r1 - r0 - self.step() * (n - self.padding)) / 2.0;
        if self.round {
            start.round()
        } else {
            start
        }
    }
}

impl<D: PartialEq> Scale<D> for BandScale<D> {
    fn convert(&self, value: &D) -> f32 {
        BandScale::convert(self, value)
    }
}
