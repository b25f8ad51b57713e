use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use safiri_shared::MetricType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a metric observation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum MetricScope {
    Destination(Uuid),
    Service(Uuid),
    Provider(Uuid),
}

/// One recorded observation, e.g. "revenue 1234.50 for service X on
/// 2024-06-01".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    pub id: Uuid,
    pub scope: MetricScope,
    pub metric_type: MetricType,
    pub value: Decimal,
    pub date_recorded: NaiveDate,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl MetricRecord {
    pub fn new(
        scope: MetricScope,
        metric_type: MetricType,
        value: Decimal,
        date_recorded: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope,
            metric_type,
            value,
            date_recorded,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }
}

/// Sum of all observations of one metric type within a scope and
/// inclusive date range.
pub fn total_for(
    records: &[MetricRecord],
    scope: MetricScope,
    metric_type: MetricType,
    from: NaiveDate,
    to: NaiveDate,
) -> Decimal {
    records
        .iter()
        .filter(|r| {
            r.scope == scope
                && r.metric_type == metric_type
                && r.date_recorded >= from
                && r.date_recorded <= to
        })
        .map(|r| r.value)
        .sum()
}
