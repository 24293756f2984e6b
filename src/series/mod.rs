//! Chart series implementations.
//!
//! A series owns its slice of the scene graph and keeps it synchronized
//! with data and configuration changes: process rows into domains, let the
//! owning chart resolve axes, then lay nodes out against the resolved
//! scales.

mod bar;
mod process;

pub use bar::BarSeries;
pub use process::ProcessedSeries;
