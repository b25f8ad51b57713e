pub mod metrics;
pub mod promotion;
pub mod stats;

pub use metrics::{MetricRecord, MetricScope};
pub use promotion::Promotion;
pub use stats::{rating_stats, revenue_report, RatingStats};
