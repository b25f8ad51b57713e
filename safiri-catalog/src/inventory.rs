use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::AvailabilitySchedule;
use crate::service::TourService;

/// One ledger row: sellable capacity for a service on a single date.
///
/// The consistency rule enforced by every mutation path is
/// `booked_slots + blocked_slots <= available_slots`, except when an
/// administrative edit shrinks `available_slots` below current usage —
/// in that case `remaining_slots` floors at zero and further
/// reservations fail, but existing bookings are never touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub available_slots: u32,
    pub booked_slots: u32,
    /// Manual holds taken out of sale by the provider.
    pub blocked_slots: u32,
    /// Per-date price replacing the service base price when set.
    pub price_override: Option<Decimal>,
    /// Soft-disable flag; records are never hard-deleted while bookings
    /// reference them.
    pub is_available: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(service_id: Uuid, date: NaiveDate, available_slots: u32) -> Self {
        let now = Utc::now();
        Self {
            service_id,
            date,
            available_slots,
            booked_slots: 0,
            blocked_slots: 0,
            price_override: None,
            is_available: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Slots still sellable; saturates at zero when an admin edit has
    /// pushed usage above the ceiling.
    pub fn remaining_slots(&self) -> u32 {
        self.available_slots
            .saturating_sub(self.booked_slots)
            .saturating_sub(self.blocked_slots)
    }

    pub fn is_fully_booked(&self) -> bool {
        self.remaining_slots() == 0
    }
}

/// Handle returned by a successful reservation; required to release the
/// slots later. Release through the handle is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotReservation {
    pub id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub guests: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("service {service_id} is not schedulable on {date}")]
    NotSchedulable { service_id: Uuid, date: NaiveDate },

    #[error("insufficient capacity: requested {requested}, remaining {remaining}")]
    InsufficientCapacity { requested: u32, remaining: u32 },

    #[error("inventory record not found: {0}")]
    NotFound(String),
}

/// The availability and inventory ledger: one record per (service, date),
/// plus the schedules that decide which dates are sellable at all.
///
/// Check-and-increment happens inside a single `&mut self` call, so
/// reservations against one ledger are serialized by construction;
/// callers sharing a ledger across tasks put it behind a lock.
pub struct InventoryLedger {
    records: HashMap<(Uuid, NaiveDate), InventoryRecord>,
    schedules: HashMap<Uuid, Vec<AvailabilitySchedule>>,
    active_reservations: HashSet<Uuid>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            schedules: HashMap::new(),
            active_reservations: HashSet::new(),
        }
    }

    pub fn add_schedule(&mut self, schedule: AvailabilitySchedule) {
        self.schedules
            .entry(schedule.service_id)
            .or_default()
            .push(schedule);
    }

    /// A date is schedulable when any active schedule covers it.
    pub fn is_schedulable(&self, service_id: Uuid, date: NaiveDate) -> bool {
        self.schedules
            .get(&service_id)
            .map(|list| list.iter().any(|s| s.covers(date)))
            .unwrap_or(false)
    }

    /// Open a date for sale with the given capacity ceiling.
    pub fn open_date(&mut self, service_id: Uuid, date: NaiveDate, available_slots: u32) {
        tracing::debug!(service = %service_id, %date, available_slots, "opening date for sale");
        self.records
            .insert((service_id, date), InventoryRecord::new(service_id, date, available_slots));
    }

    pub fn record(&self, service_id: Uuid, date: NaiveDate) -> Option<&InventoryRecord> {
        self.records.get(&(service_id, date))
    }

    /// Reserve `guest_count` slots for a service on a date.
    ///
    /// Fails `NotSchedulable` when no active schedule covers the date or
    /// the date has not been opened (or is soft-disabled); fails
    /// `InsufficientCapacity` when the party exceeds the remaining slots.
    /// On success the booked count is incremented in the same call that
    /// checked it, and a release handle is returned.
    pub fn reserve(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        guest_count: u32,
    ) -> Result<SlotReservation, InventoryError> {
        if !self.is_schedulable(service_id, date) {
            return Err(InventoryError::NotSchedulable { service_id, date });
        }

        let record = self
            .records
            .get_mut(&(service_id, date))
            .filter(|r| r.is_available)
            .ok_or(InventoryError::NotSchedulable { service_id, date })?;

        let remaining = record.remaining_slots();
        if guest_count > remaining {
            return Err(InventoryError::InsufficientCapacity {
                requested: guest_count,
                remaining,
            });
        }

        record.booked_slots += guest_count;
        record.updated_at = Utc::now();

        let reservation = SlotReservation {
            id: Uuid::new_v4(),
            service_id,
            date,
            guests: guest_count,
        };
        self.active_reservations.insert(reservation.id);
        tracing::info!(
            service = %service_id,
            %date,
            guests = guest_count,
            remaining = record.remaining_slots(),
            "slots reserved"
        );
        Ok(reservation)
    }

    /// Return a reservation's slots to the pool. Releasing a handle that
    /// was already released (or never issued by this ledger) is a no-op.
    pub fn release(&mut self, reservation: &SlotReservation) {
        if !self.active_reservations.remove(&reservation.id) {
            return;
        }
        if let Some(record) = self
            .records
            .get_mut(&(reservation.service_id, reservation.date))
        {
            record.booked_slots = record.booked_slots.saturating_sub(reservation.guests);
            record.updated_at = Utc::now();
            tracing::info!(
                service = %reservation.service_id,
                date = %reservation.date,
                guests = reservation.guests,
                "slots released"
            );
        }
    }

    /// Take slots out of sale manually (maintenance, private hire).
    pub fn block(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        slots: u32,
    ) -> Result<(), InventoryError> {
        let record = self.record_mut(service_id, date)?;
        let remaining = record.remaining_slots();
        if slots > remaining {
            return Err(InventoryError::InsufficientCapacity {
                requested: slots,
                remaining,
            });
        }
        record.blocked_slots += slots;
        record.updated_at = Utc::now();
        Ok(())
    }

    pub fn unblock(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        slots: u32,
    ) -> Result<(), InventoryError> {
        let record = self.record_mut(service_id, date)?;
        record.blocked_slots = record.blocked_slots.saturating_sub(slots);
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Administrative capacity edit. Deliberately allowed to go below
    /// current usage: remaining floors at zero and new reservations fail,
    /// but already-sold bookings are never auto-cancelled.
    pub fn set_available_slots(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        available_slots: u32,
    ) -> Result<(), InventoryError> {
        let record = self.record_mut(service_id, date)?;
        if available_slots < record.booked_slots + record.blocked_slots {
            tracing::warn!(
                service = %service_id,
                %date,
                available_slots,
                booked = record.booked_slots,
                blocked = record.blocked_slots,
                "capacity lowered below current usage"
            );
        }
        record.available_slots = available_slots;
        record.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_price_override(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        price: Option<Decimal>,
    ) -> Result<(), InventoryError> {
        let record = self.record_mut(service_id, date)?;
        record.price_override = price;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Soft-disable (or re-enable) a date without touching its bookings.
    pub fn set_available(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
        available: bool,
    ) -> Result<(), InventoryError> {
        let record = self.record_mut(service_id, date)?;
        record.is_available = available;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Price for a service on a date: the record's override when present,
    /// otherwise the service base price.
    pub fn price_for(&self, service: &TourService, date: NaiveDate) -> Decimal {
        self.records
            .get(&(service.id, date))
            .and_then(|r| r.price_override)
            .unwrap_or(service.base_price)
    }

    pub fn is_fully_booked(&self, service_id: Uuid, date: NaiveDate) -> bool {
        self.records
            .get(&(service_id, date))
            .map(|r| r.is_fully_booked())
            .unwrap_or(true)
    }

    fn record_mut(
        &mut self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<&mut InventoryRecord, InventoryError> {
        self.records
            .get_mut(&(service_id, date))
            .ok_or_else(|| InventoryError::NotFound(format!("{}/{}", service_id, date)))
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}
