use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use safiri_shared::{slugify, Currency};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pre-assembled multi-service itinerary sold as one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub destination_id: Uuid,

    pub total_price: Decimal,
    /// Special price undercutting `total_price` when set.
    pub discounted_price: Option<Decimal>,
    pub currency: Currency,

    pub duration_days: u32,
    pub max_capacity: u32,
    pub included_items: Vec<String>,
    pub excluded_items: Vec<String>,

    pub itinerary: Vec<PackageService>,

    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One service's slot in a package itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageService {
    pub service_id: Uuid,
    /// Day within the package, starting at 1.
    pub day_number: u32,
    /// Order within the day.
    pub sequence: u32,
    pub start_time: Option<NaiveTime>,
    pub notes: String,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        destination_id: Uuid,
        total_price: Decimal,
        duration_days: u32,
    ) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description: String::new(),
            destination_id,
            total_price,
            discounted_price: None,
            currency: Currency::default(),
            duration_days,
            max_capacity: 10,
            included_items: Vec::new(),
            excluded_items: Vec::new(),
            itinerary: Vec::new(),
            is_active: true,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Insert an itinerary entry, keeping day/sequence order.
    pub fn add_service(&mut self, entry: PackageService) {
        self.itinerary.push(entry);
        self.itinerary
            .sort_by_key(|e| (e.day_number, e.sequence));
        self.updated_at = Utc::now();
    }

    /// The price a guest actually pays.
    pub fn final_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.total_price)
    }

    /// Discount relative to the list price, as a percentage; zero when
    /// there is no (effective) discount.
    pub fn discount_percentage(&self) -> Decimal {
        match self.discounted_price {
            Some(discounted)
                if self.total_price > Decimal::ZERO && discounted < self.total_price =>
            {
                ((self.total_price - discounted) / self.total_price * Decimal::from(100))
                    .round_dp(2)
            }
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> Package {
        Package::new(
            "Coast & Crater Combo",
            Uuid::new_v4(),
            Decimal::new(50000, 2), // 500.00
            5,
        )
    }

    #[test]
    fn final_price_prefers_discount() {
        let mut p = package();
        assert_eq!(p.final_price(), Decimal::new(50000, 2));
        p.discounted_price = Some(Decimal::new(40000, 2));
        assert_eq!(p.final_price(), Decimal::new(40000, 2));
    }

    #[test]
    fn discount_percentage_computed() {
        let mut p = package();
        assert_eq!(p.discount_percentage(), Decimal::ZERO);
        p.discounted_price = Some(Decimal::new(40000, 2));
        assert_eq!(p.discount_percentage(), Decimal::from(20));
    }

    #[test]
    fn discount_above_list_price_is_ignored() {
        let mut p = package();
        p.discounted_price = Some(Decimal::new(60000, 2));
        assert_eq!(p.discount_percentage(), Decimal::ZERO);
    }

    #[test]
    fn itinerary_stays_ordered() {
        let mut p = package();
        p.add_service(PackageService {
            service_id: Uuid::new_v4(),
            day_number: 2,
            sequence: 1,
            start_time: None,
            notes: String::new(),
        });
        p.add_service(PackageService {
            service_id: Uuid::new_v4(),
            day_number: 1,
            sequence: 2,
            start_time: None,
            notes: String::new(),
        });
        p.add_service(PackageService {
            service_id: Uuid::new_v4(),
            day_number: 1,
            sequence: 1,
            start_time: None,
            notes: String::new(),
        });
        let order: Vec<(u32, u32)> = p
            .itinerary
            .iter()
            .map(|e| (e.day_number, e.sequence))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1)]);
    }
}
