use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use safiri_catalog::SlotReservation;
use safiri_shared::{BookingStatus, Currency};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tourist's reservation of a service for a specific date and time.
///
/// A booking is only ever constructed through `BookingManager`, which
/// pairs it with a successful slot reservation — the `reservation`
/// handle here is what gets released on cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub tourist_id: Uuid,
    pub service_id: Uuid,

    pub booking_date: DateTime<Utc>,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,

    pub number_of_adults: u32,
    pub number_of_children: u32,
    pub guest_names: Vec<String>,

    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    /// Always `total_amount - discount_amount`, never negative.
    pub final_amount: Decimal,
    pub currency: Currency,

    pub status: BookingStatus,

    pub special_requests: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,

    /// Unique human-presentable identifier, 10 chars of A-Z and 0-9.
    pub confirmation_code: String,
    pub reservation: SlotReservation,

    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn total_guests(&self) -> u32 {
        self.number_of_adults + self.number_of_children
    }

    /// The scheduled start as a UTC instant.
    pub fn service_instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.service_date.and_time(self.service_time))
    }

    pub fn is_upcoming(&self) -> bool {
        self.service_date >= Utc::now().date_naive()
    }

    pub fn is_past(&self) -> bool {
        self.service_date < Utc::now().date_naive()
    }

    /// Cancellable while pending or confirmed, and only up to
    /// `window_hours` before the scheduled start.
    pub fn can_cancel(&self, window_hours: i64) -> bool {
        if !matches!(
            self.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        ) {
            return false;
        }
        let hours_until = (self.service_instant() - Utc::now()).num_hours();
        hours_until >= window_hours
    }

    /// Reviewable once completed and the service date has passed.
    pub fn can_review(&self) -> bool {
        self.status == BookingStatus::Completed && self.is_past()
    }
}

/// What a guest submits to create a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub tourist_id: Uuid,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub number_of_adults: u32,
    pub number_of_children: u32,
    pub guest_names: Vec<String>,
    /// Extra discount granted on top of any group discount.
    pub discount_amount: Decimal,
    pub special_requests: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

impl BookingRequest {
    pub fn new(
        tourist_id: Uuid,
        service_date: NaiveDate,
        service_time: NaiveTime,
        adults: u32,
        children: u32,
    ) -> Self {
        Self {
            tourist_id,
            service_date,
            service_time,
            number_of_adults: adults,
            number_of_children: children,
            guest_names: Vec::new(),
            discount_amount: Decimal::ZERO,
            special_requests: String::new(),
            emergency_contact_name: None,
            emergency_contact_phone: None,
        }
    }

    pub fn total_guests(&self) -> u32 {
        self.number_of_adults + self.number_of_children
    }
}
