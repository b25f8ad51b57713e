use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use safiri_shared::{Currency, PromotionType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A paid placement: a business pays the platform to surface a service
/// or package. Counters are bumped by the serving layer; the derived
/// rates guard against empty denominators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub service_id: Option<Uuid>,
    pub package_id: Option<Uuid>,
    pub promotion_type: PromotionType,
    pub title: String,
    pub description: String,

    pub target_destinations: Vec<Uuid>,
    pub target_categories: Vec<Uuid>,

    /// What the business pays for this placement.
    pub price: Decimal,
    pub currency: Currency,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,

    pub is_active: bool,
    pub is_paid: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    pub fn new(
        promotion_type: PromotionType,
        title: impl Into<String>,
        price: Decimal,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            service_id: None,
            package_id: None,
            promotion_type,
            title: title.into(),
            description: String::new(),
            target_destinations: Vec::new(),
            target_categories: Vec::new(),
            price,
            currency: Currency::default(),
            start_date,
            end_date,
            impressions: 0,
            clicks: 0,
            conversions: 0,
            is_active: true,
            is_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Running right now: flagged active and inside the inclusive window.
    pub fn is_currently_active(&self) -> bool {
        let now = Utc::now();
        self.is_active && self.start_date <= now && now <= self.end_date
    }

    pub fn record_impression(&mut self) {
        self.impressions += 1;
        self.updated_at = Utc::now();
    }

    pub fn record_click(&mut self) {
        self.clicks += 1;
        self.updated_at = Utc::now();
    }

    pub fn record_conversion(&mut self) {
        self.conversions += 1;
        self.updated_at = Utc::now();
        tracing::debug!(promotion = %self.id, total = self.conversions, "conversion recorded");
    }

    /// Clicks per hundred impressions; 0.0 when nothing was shown.
    pub fn click_through_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        self.clicks as f64 / self.impressions as f64 * 100.0
    }

    /// Conversions per hundred clicks; 0.0 when nothing was clicked.
    pub fn conversion_rate(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.conversions as f64 / self.clicks as f64 * 100.0
    }
}
