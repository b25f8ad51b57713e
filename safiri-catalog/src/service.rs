use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use safiri_core::{Actor, CoreError, CoreResult};
use safiri_shared::{slugify, Currency, ServiceType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An offerable tourism product: a guided tour, activity, transfer, stay
/// or dining experience. Identity is immutable once created; attributes
/// are mutated only by the owning operator (or an admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourService {
    pub id: Uuid,
    pub provider_id: Uuid,
    /// Operator account that owns the provider, for ownership checks.
    pub operator_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub service_type: ServiceType,
    pub category_id: Option<Uuid>,
    pub destination_id: Uuid,

    pub base_price: Decimal,
    pub currency: Currency,
    pub child_price: Option<Decimal>,
    /// Percentage discount applied to groups, in [0, 100].
    pub group_discount_rate: Decimal,

    pub min_capacity: u32,
    pub max_capacity: u32,
    pub duration_hours: Decimal,

    pub meeting_point: Option<String>,
    pub included_items: Vec<String>,
    pub excluded_items: Vec<String>,
    pub cancellation_policy: String,

    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TourService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider_id: Uuid,
        operator_id: Uuid,
        name: impl Into<String>,
        service_type: ServiceType,
        destination_id: Uuid,
        base_price: Decimal,
        min_capacity: u32,
        max_capacity: u32,
    ) -> CoreResult<Self> {
        if base_price < Decimal::ZERO {
            return Err(CoreError::Validation("base_price must be >= 0".into()));
        }
        if min_capacity == 0 {
            return Err(CoreError::Validation("min_capacity must be >= 1".into()));
        }
        if min_capacity > max_capacity {
            return Err(CoreError::Validation(format!(
                "min_capacity {} exceeds max_capacity {}",
                min_capacity, max_capacity
            )));
        }
        let name = name.into();
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            provider_id,
            operator_id,
            slug: slugify(&name),
            name,
            description: String::new(),
            service_type,
            category_id: None,
            destination_id,
            base_price,
            currency: Currency::default(),
            child_price: None,
            group_discount_rate: Decimal::ZERO,
            min_capacity,
            max_capacity,
            duration_hours: Decimal::ZERO,
            meeting_point: None,
            included_items: Vec::new(),
            excluded_items: Vec::new(),
            cancellation_policy: String::new(),
            is_active: true,
            is_featured: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn authorize(&self, actor: &Actor) -> CoreResult<()> {
        if actor.owns_or_admin(self.operator_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "only the owning operator may edit this service".into(),
            ))
        }
    }

    pub fn set_base_price(&mut self, actor: &Actor, price: Decimal) -> CoreResult<()> {
        self.authorize(actor)?;
        if price < Decimal::ZERO {
            return Err(CoreError::Validation("base_price must be >= 0".into()));
        }
        self.base_price = price;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_group_discount_rate(&mut self, actor: &Actor, rate: Decimal) -> CoreResult<()> {
        self.authorize(actor)?;
        if rate < Decimal::ZERO || rate > Decimal::from(100) {
            return Err(CoreError::Validation(
                "group_discount_rate must be in [0, 100]".into(),
            ));
        }
        self.group_discount_rate = rate;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_active(&mut self, actor: &Actor, active: bool) -> CoreResult<()> {
        self.authorize(actor)?;
        self.is_active = active;
        self.updated_at = Utc::now();
        tracing::info!(service = %self.id, active, "service availability toggled");
        Ok(())
    }

    /// Whether a party of `guests` fits this service's capacity bounds.
    pub fn accepts_party(&self, guests: u32) -> bool {
        guests >= self.min_capacity && guests <= self.max_capacity
    }
}
