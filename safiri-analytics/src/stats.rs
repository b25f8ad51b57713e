use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use safiri_booking::Review;
use safiri_finance::Payment;
use serde::Serialize;
use uuid::Uuid;

use crate::metrics::{total_for, MetricRecord, MetricScope};
use safiri_shared::MetricType;

/// Rating aggregate for one service, computed from moderated reviews
/// only. The catalog never reaches into review storage itself; callers
/// fetch the reviews and hand them in.
#[derive(Debug, Clone, Serialize)]
pub struct RatingStats {
    pub service_id: Uuid,
    pub review_count: u32,
    /// Mean overall rating across approved reviews; 0.0 with none.
    pub average_rating: f64,
}

pub fn rating_stats(service_id: Uuid, reviews: &[Review]) -> RatingStats {
    let mut sum = 0u32;
    let mut count = 0u32;
    for review in reviews {
        if review.service_id == service_id && review.is_approved {
            sum += review.rating.value();
            count += 1;
        }
    }
    RatingStats {
        service_id,
        review_count: count,
        average_rating: if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        },
    }
}

/// Period report over recorded metrics plus payment settlements, in the
/// shape consumed by the reporting UI.
pub fn revenue_report(
    scope: MetricScope,
    records: &[MetricRecord],
    payments: &[Payment],
    from: NaiveDate,
    to: NaiveDate,
) -> serde_json::Value {
    let recorded_revenue = total_for(records, scope, MetricType::Revenue, from, to);
    let recorded_bookings = total_for(records, scope, MetricType::Bookings, from, to);

    let mut settled = Decimal::ZERO;
    let mut commission = Decimal::ZERO;
    for payment in payments.iter().filter(|p| p.is_paid()) {
        settled += payment.amount();
        commission += payment.commission_amount();
    }

    serde_json::json!({
        "scope": scope,
        "period": { "from": from, "to": to },
        "generated_at": Utc::now().to_rfc3339(),
        "metrics": {
            "recorded_revenue": recorded_revenue,
            "recorded_bookings": recorded_bookings,
            "settled_volume": settled,
            "platform_commission": commission,
        }
    })
}
