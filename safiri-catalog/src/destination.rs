use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use safiri_shared::slugify;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A place tourists travel to; the root of the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub country: String,
    pub region: Option<String>,
    pub description: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Destination {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            country: country.into(),
            region: None,
            description: String::new(),
            latitude: None,
            longitude: None,
            is_active: true,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Service classification (e.g. "Wildlife", "Water Sports").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description: String::new(),
            is_active: true,
        }
    }
}

/// A facility or feature a service offers (e.g. "WiFi", "Lunch included").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: None,
        }
    }
}
