//! Status bar core functionality.
//!
//! This module provides the metric model, the source adapters, and the
//! display driver that polls sources and pushes formatted results into
//! host display slots.

mod driver;
mod host;
mod metrics;
mod sampler;

pub use driver::{StatusBarDriver, StatusBarRuntime};
pub use host::{BarSide, StatusHost, StatusItem};
pub use metrics::{
    FormattedMetric, GpuReading, MemoryReading, MetricKind, NetworkRates, Reading, NO_DATA,
};
pub use sampler::{MetricSource, SystemMetricSource};
