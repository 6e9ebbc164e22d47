//! Shared data types.

mod account;
mod metric;
mod schedule;
mod snapshot;

pub use account::{Credentials, PortfolioRef, PortfolioSummary, UserSession};
pub use metric::{Metric, MetricClass, MetricDescriptor, METRICS};
pub use schedule::ScheduleConfig;
pub use snapshot::Snapshot;
