use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use safiri_catalog::{InventoryError, InventoryLedger, TourService};
use safiri_shared::BookingStatus;
use uuid::Uuid;

use crate::codes::generate_confirmation_code;
use crate::models::{Booking, BookingRequest};

const MAX_CODE_ATTEMPTS: u32 = 64;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("cancellation window expired: bookings close {window_hours}h before the service")]
    CancellationWindowExpired { window_hours: i64 },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("could not generate a unique confirmation code")]
    CodeSpaceExhausted,
}

/// Owns bookings, the confirmation-code registry, and the state machine
/// `Pending -> Confirmed -> Completed` with `Pending|Confirmed ->
/// Cancelled`. Creation and slot reservation are a single all-or-nothing
/// step: a booking is never stored without its reservation.
pub struct BookingManager {
    bookings: HashMap<Uuid, Booking>,
    codes: HashSet<String>,
    cancellation_window_hours: i64,
    code_length: usize,
}

impl BookingManager {
    pub fn new() -> Self {
        Self::with_rules(24, 10)
    }

    pub fn with_rules(cancellation_window_hours: i64, code_length: usize) -> Self {
        Self {
            bookings: HashMap::new(),
            codes: HashSet::new(),
            cancellation_window_hours,
            code_length,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Booking> {
        self.bookings.get(id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Booking> {
        self.bookings.values().find(|b| b.confirmation_code == code)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Create a booking, reserving inventory in the same step.
    ///
    /// Validation and code generation happen before the ledger is
    /// touched; a failed reservation therefore leaves no booking, no
    /// registered code, and no inventory change behind. A reservation
    /// failure surfaces unchanged (`NotSchedulable` /
    /// `InsufficientCapacity`).
    pub fn create_booking(
        &mut self,
        ledger: &mut InventoryLedger,
        service: &TourService,
        request: BookingRequest,
    ) -> Result<Booking, BookingError> {
        if request.number_of_adults == 0 {
            return Err(BookingError::Validation(
                "a booking needs at least one adult".into(),
            ));
        }
        let guests = request.total_guests();
        if !service.accepts_party(guests) {
            return Err(BookingError::Validation(format!(
                "party of {} outside service capacity {}..={}",
                guests, service.min_capacity, service.max_capacity
            )));
        }
        if request.discount_amount < Decimal::ZERO {
            return Err(BookingError::Validation(
                "discount_amount must be >= 0".into(),
            ));
        }

        let unit_price = ledger.price_for(service, request.service_date);
        let child_price = service.child_price.unwrap_or(unit_price);
        let total_amount = unit_price * Decimal::from(request.number_of_adults)
            + child_price * Decimal::from(request.number_of_children);

        let group_discount = (total_amount * service.group_discount_rate
            / Decimal::from(100))
        .round_dp(2);
        let discount_amount = request.discount_amount + group_discount;
        let final_amount = total_amount - discount_amount;
        if final_amount < Decimal::ZERO {
            return Err(BookingError::Validation(
                "discount exceeds booking total".into(),
            ));
        }

        let code = self.unique_code()?;

        // Last fallible step before insertion; nothing is persisted if
        // the reservation is refused.
        let reservation = ledger.reserve(service.id, request.service_date, guests)?;

        self.codes.insert(code.clone());
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            tourist_id: request.tourist_id,
            service_id: service.id,
            booking_date: now,
            service_date: request.service_date,
            service_time: request.service_time,
            number_of_adults: request.number_of_adults,
            number_of_children: request.number_of_children,
            guest_names: request.guest_names,
            total_amount,
            discount_amount,
            final_amount,
            currency: service.currency,
            status: BookingStatus::Pending,
            special_requests: request.special_requests,
            emergency_contact_name: request.emergency_contact_name,
            emergency_contact_phone: request.emergency_contact_phone,
            confirmation_code: code,
            reservation,
            confirmed_at: None,
            cancelled_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(
            booking = %booking.id,
            code = %booking.confirmation_code,
            service = %service.id,
            guests,
            "booking created"
        );
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    /// `Pending -> Confirmed`.
    pub fn confirm(&mut self, id: &Uuid) -> Result<&Booking, BookingError> {
        let booking = self.get_mut(id)?;
        if booking.status != BookingStatus::Pending {
            return Err(BookingError::InvalidTransition {
                from: booking.status.as_str().to_string(),
                to: BookingStatus::Confirmed.as_str().to_string(),
            });
        }
        booking.status = BookingStatus::Confirmed;
        booking.confirmed_at = Some(Utc::now());
        booking.updated_at = Utc::now();
        tracing::info!(booking = %id, "booking confirmed");
        Ok(booking)
    }

    /// `Pending|Confirmed -> Cancelled`, only outside the cancellation
    /// window. Releases the slot reservation; release is idempotent so a
    /// retried cancellation cannot double-free slots.
    pub fn cancel(
        &mut self,
        ledger: &mut InventoryLedger,
        id: &Uuid,
    ) -> Result<&Booking, BookingError> {
        let window = self.cancellation_window_hours;
        let booking = self
            .bookings
            .get_mut(id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        if !matches!(
            booking.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        ) {
            return Err(BookingError::InvalidTransition {
                from: booking.status.as_str().to_string(),
                to: BookingStatus::Cancelled.as_str().to_string(),
            });
        }
        if !booking.can_cancel(window) {
            return Err(BookingError::CancellationWindowExpired {
                window_hours: window,
            });
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(Utc::now());
        booking.updated_at = Utc::now();
        ledger.release(&booking.reservation);
        tracing::info!(booking = %id, "booking cancelled");
        Ok(booking)
    }

    /// `Confirmed -> Completed`, once the service date has passed.
    pub fn complete(&mut self, id: &Uuid) -> Result<&Booking, BookingError> {
        let booking = self.get_mut(id)?;
        if booking.status != BookingStatus::Confirmed {
            return Err(BookingError::InvalidTransition {
                from: booking.status.as_str().to_string(),
                to: BookingStatus::Completed.as_str().to_string(),
            });
        }
        if !booking.is_past() {
            return Err(BookingError::Validation(
                "service date has not passed yet".into(),
            ));
        }
        booking.status = BookingStatus::Completed;
        booking.completed_at = Some(Utc::now());
        booking.updated_at = Utc::now();
        tracing::info!(booking = %id, "booking completed");
        Ok(booking)
    }

    fn get_mut(&mut self, id: &Uuid) -> Result<&mut Booking, BookingError> {
        self.bookings
            .get_mut(id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// Draw codes until one is unused. Collisions against the registry
    /// are retried internally and never surfaced to callers.
    fn unique_code(&self) -> Result<String, BookingError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_confirmation_code(self.code_length);
            if !self.codes.contains(&code) {
                return Ok(code);
            }
            tracing::debug!("confirmation code collision, retrying");
        }
        Err(BookingError::CodeSpaceExhausted)
    }
}

impl Default for BookingManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};
    use safiri_catalog::{AvailabilitySchedule, WeekdaySet};
    use safiri_shared::ServiceType;

    fn service(max_capacity: u32) -> TourService {
        TourService::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Diani Beach Snorkeling",
            ServiceType::Activity,
            Uuid::new_v4(),
            Decimal::new(10000, 2), // 100.00
            1,
            max_capacity,
        )
        .unwrap()
    }

    fn open_ledger(service: &TourService, date: NaiveDate, slots: u32) -> InventoryLedger {
        let mut ledger = InventoryLedger::new();
        ledger.add_schedule(AvailabilitySchedule::new(
            service.id,
            date - Duration::days(365),
            date + Duration::days(365),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            WeekdaySet::ALL,
        ));
        ledger.open_date(service.id, date, slots);
        ledger
    }

    fn future_date() -> NaiveDate {
        (Utc::now() + Duration::days(30)).date_naive()
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn create_reserves_and_prices() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();

        let booking = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 2, 1),
            )
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.confirmation_code.len(), 10);
        assert_eq!(booking.total_amount, Decimal::new(30000, 2));
        assert_eq!(booking.final_amount, Decimal::new(30000, 2));
        assert_eq!(ledger.record(svc.id, date).unwrap().remaining_slots(), 7);
    }

    #[test]
    fn create_uses_price_override_and_group_discount() {
        let mut svc = service(20);
        let owner = safiri_core::Actor::new(svc.operator_id, safiri_shared::UserRole::Operator);
        svc.set_group_discount_rate(&owner, Decimal::from(10)).unwrap();
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 20);
        ledger
            .set_price_override(svc.id, date, Some(Decimal::new(8000, 2)))
            .unwrap();
        let mut manager = BookingManager::new();

        let booking = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 5, 0),
            )
            .unwrap();

        // 5 * 80.00 = 400.00, 10% group discount = 40.00
        assert_eq!(booking.total_amount, Decimal::new(40000, 2));
        assert_eq!(booking.discount_amount, Decimal::new(4000, 2));
        assert_eq!(booking.final_amount, Decimal::new(36000, 2));
    }

    #[test]
    fn failed_reservation_persists_nothing() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 4);
        let mut manager = BookingManager::new();

        let err = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 5, 0),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            BookingError::Inventory(InventoryError::InsufficientCapacity { .. })
        ));
        assert!(manager.is_empty());
        assert_eq!(ledger.record(svc.id, date).unwrap().booked_slots, 0);
    }

    #[test]
    fn unschedulable_date_fails_creation() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = InventoryLedger::new();
        ledger.open_date(svc.id, date, 10);
        let mut manager = BookingManager::new();

        let err = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 2, 0),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Inventory(InventoryError::NotSchedulable { .. })
        ));
        assert!(manager.is_empty());
    }

    #[test]
    fn party_outside_capacity_is_rejected_before_reserving() {
        let svc = service(4);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();

        let err = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 4, 1),
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert_eq!(ledger.record(svc.id, date).unwrap().booked_slots, 0);
    }

    #[test]
    fn confirm_twice_is_invalid() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 1, 0),
            )
            .unwrap()
            .id;

        manager.confirm(&id).unwrap();
        assert_eq!(manager.get(&id).unwrap().status, BookingStatus::Confirmed);
        assert!(manager.get(&id).unwrap().confirmed_at.is_some());

        let err = manager.confirm(&id).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[test]
    fn cancel_releases_slots() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 6, 0),
            )
            .unwrap()
            .id;
        assert_eq!(ledger.record(svc.id, date).unwrap().remaining_slots(), 4);

        manager.confirm(&id).unwrap();
        manager.cancel(&mut ledger, &id).unwrap();

        let booking = manager.get(&id).unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert!(booking.cancelled_at.is_some());
        assert_eq!(ledger.record(svc.id, date).unwrap().remaining_slots(), 10);
    }

    #[test]
    fn late_cancel_fails_and_leaves_status() {
        let svc = service(10);
        let date = Utc::now().date_naive();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, Utc::now().time(), 2, 0),
            )
            .unwrap()
            .id;

        let err = manager.cancel(&mut ledger, &id).unwrap_err();
        assert!(matches!(err, BookingError::CancellationWindowExpired { .. }));
        assert_eq!(manager.get(&id).unwrap().status, BookingStatus::Pending);
        assert_eq!(ledger.record(svc.id, date).unwrap().booked_slots, 2);
    }

    #[test]
    fn cancelled_booking_cannot_be_confirmed_or_recancelled() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 2, 0),
            )
            .unwrap()
            .id;

        manager.cancel(&mut ledger, &id).unwrap();
        assert!(matches!(
            manager.confirm(&id),
            Err(BookingError::InvalidTransition { .. })
        ));
        assert!(matches!(
            manager.cancel(&mut ledger, &id),
            Err(BookingError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn complete_requires_confirmed_and_past_date() {
        let svc = service(10);
        let past = (Utc::now() - Duration::days(2)).date_naive();
        let mut ledger = open_ledger(&svc, past, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), past, noon(), 2, 0),
            )
            .unwrap()
            .id;

        // Pending -> Completed is not a legal edge.
        assert!(matches!(
            manager.complete(&id),
            Err(BookingError::InvalidTransition { .. })
        ));

        manager.confirm(&id).unwrap();
        manager.complete(&id).unwrap();
        let booking = manager.get(&id).unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
        assert!(booking.completed_at.is_some());
        assert!(booking.can_review());
    }

    #[test]
    fn complete_before_service_date_is_rejected() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();
        let id = manager
            .create_booking(
                &mut ledger,
                &svc,
                BookingRequest::new(Uuid::new_v4(), date, noon(), 2, 0),
            )
            .unwrap()
            .id;

        manager.confirm(&id).unwrap();
        assert!(matches!(
            manager.complete(&id),
            Err(BookingError::Validation(_))
        ));
        assert_eq!(manager.get(&id).unwrap().status, BookingStatus::Confirmed);
    }

    #[test]
    fn confirmation_codes_are_unique_across_bookings() {
        let svc = service(10);
        let date = future_date();
        let mut ledger = open_ledger(&svc, date, 10);
        let mut manager = BookingManager::new();

        let mut codes = std::collections::HashSet::new();
        for _ in 0..8 {
            let booking = manager
                .create_booking(
                    &mut ledger,
                    &svc,
                    BookingRequest::new(Uuid::new_v4(), date, noon(), 1, 0),
                )
                .unwrap();
            assert!(codes.insert(booking.confirmation_code));
        }
    }
}
