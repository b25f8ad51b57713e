use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use safiri_booking::{Booking, BookingRepository};
use safiri_catalog::{InventoryRecord, InventoryRepository};
use safiri_finance::{Payment, PaymentRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// In-memory backing store implementing the repository seams. Used in
/// tests and as the default store where no database is deployed; the
/// engine crates never depend on it directly.
pub struct MemoryStore {
    inventory: RwLock<HashMap<(Uuid, NaiveDate), InventoryRecord>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    payments: RwLock<HashMap<Uuid, Payment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inventory: RwLock::new(HashMap::new()),
            bookings: RwLock::new(HashMap::new()),
            payments: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn get_record(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<InventoryRecord>, BoxError> {
        Ok(self
            .inventory
            .read()
            .await
            .get(&(service_id, date))
            .cloned())
    }

    async fn upsert_record(&self, record: &InventoryRecord) -> Result<(), BoxError> {
        self.inventory
            .write()
            .await
            .insert((record.service_id, record.date), record.clone());
        Ok(())
    }

    async fn list_for_service(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<InventoryRecord>, BoxError> {
        let mut records: Vec<InventoryRecord> = self
            .inventory
            .read()
            .await
            .values()
            .filter(|r| r.service_id == service_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, BoxError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn save_booking(&self, booking: &Booking) -> Result<(), BoxError> {
        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());
        Ok(())
    }

    async fn list_for_tourist(&self, tourist_id: Uuid) -> Result<Vec<Booking>, BoxError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.tourist_id == tourist_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booking_date);
        Ok(bookings)
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn get_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>, BoxError> {
        Ok(self
            .payments
            .read()
            .await
            .values()
            .find(|p| p.booking_id == booking_id)
            .cloned())
    }

    async fn save_payment(&self, payment: &Payment) -> Result<(), BoxError> {
        self.payments
            .write()
            .await
            .insert(payment.id, payment.clone());
        Ok(())
    }
}
