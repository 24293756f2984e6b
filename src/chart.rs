//! The owning chart, seen through the interface a series needs.
//!
//! The chart container itself (axis ticks, legends, overall layout) lives
//! outside this crate; a series only reads resolved axis scales and a
//! pending-layout flag, and notifies the host when its domains go stale.

use crate::scale::{BandScale, LinearScale};

/// A resolved category axis wrapping a band scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryAxis {
    /// The category-to-pixel scale.
    pub scale: BandScale<String>,
}

/// A resolved value axis wrapping a linear scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueAxis {
    /// The value-to-pixel scale.
    pub scale: LinearScale,
}

/// Interface the owning chart exposes to its series.
///
/// Layout passes receive the host by shared reference, so processing alone
/// can reach [`ChartHost::update_axes`]; a layout pass cannot loop the
/// cascade back into itself.
pub trait ChartHost {
    /// The resolved category axis, if axis layout has run.
    fn x_axis(&self) -> Option<&CategoryAxis>;

    /// The resolved value axis, if axis layout has run.
    fn y_axis(&self) -> Option<&ValueAxis>;

    /// Whether a chart-level layout pass is still outstanding.
    ///
    /// Series layout skips entirely while this is set; the chart re-invokes
    /// layout once it settles.
    fn is_layout_pending(&self) -> bool;

    /// Notification that series domains changed and axes are stale.
    ///
    /// Carries the freshly computed category domain and `(min, max)` value
    /// domain so the host can re-derive its axis scales.
    fn update_axes(&mut self, categories: &[String], value_domain: (f32, f32));
}
