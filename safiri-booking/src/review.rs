use chrono::{DateTime, Utc};
use safiri_shared::Rating;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::manager::BookingError;
use crate::models::Booking;

/// A guest's review of a completed booking; at most one per booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub tourist_id: Uuid,
    pub service_id: Uuid,

    pub rating: Rating,
    pub title: String,
    pub comment: String,

    pub value_for_money: Option<Rating>,
    pub service_quality: Option<Rating>,
    pub cleanliness: Option<Rating>,

    /// Reviews are hidden until moderated.
    pub is_approved: bool,
    pub provider_response: Option<String>,
    pub provider_response_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Reviews may only be written for completed, past bookings.
    pub fn for_booking(booking: &Booking, rating: Rating) -> Result<Self, BookingError> {
        if !booking.can_review() {
            return Err(BookingError::Validation(
                "booking is not reviewable: it must be completed and past".into(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            tourist_id: booking.tourist_id,
            service_id: booking.service_id,
            rating,
            title: String::new(),
            comment: String::new(),
            value_for_money: None,
            service_quality: None,
            cleanliness: None,
            is_approved: false,
            provider_response: None,
            provider_response_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn respond(&mut self, response: impl Into<String>) {
        self.provider_response = Some(response.into());
        self.provider_response_date = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Mean of the overall rating and whichever category ratings exist.
    pub fn average_rating(&self) -> f64 {
        let mut sum = self.rating.value() as f64;
        let mut count = 1u32;
        for extra in [self.value_for_money, self.service_quality, self.cleanliness]
            .into_iter()
            .flatten()
        {
            sum += extra.value() as f64;
            count += 1;
        }
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};
    use rust_decimal::Decimal;
    use safiri_catalog::SlotReservation;
    use safiri_shared::{BookingStatus, Currency};

    fn completed_booking() -> Booking {
        let now = Utc::now();
        let service_date = (now - Duration::days(3)).date_naive();
        Booking {
            id: Uuid::new_v4(),
            tourist_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            booking_date: now,
            service_date,
            service_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            number_of_adults: 2,
            number_of_children: 0,
            guest_names: vec![],
            total_amount: Decimal::new(20000, 2),
            discount_amount: Decimal::ZERO,
            final_amount: Decimal::new(20000, 2),
            currency: Currency::USD,
            status: BookingStatus::Completed,
            special_requests: String::new(),
            emergency_contact_name: None,
            emergency_contact_phone: None,
            confirmation_code: "REV123TEST".into(),
            reservation: SlotReservation {
                id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                date: service_date,
                guests: 2,
            },
            confirmed_at: Some(now),
            cancelled_at: None,
            completed_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn review_requires_reviewable_booking() {
        let mut booking = completed_booking();
        assert!(Review::for_booking(&booking, Rating::Excellent).is_ok());

        booking.status = BookingStatus::Confirmed;
        assert!(matches!(
            Review::for_booking(&booking, Rating::Good),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn average_includes_optional_categories() {
        let booking = completed_booking();
        let mut review = Review::for_booking(&booking, Rating::Excellent).unwrap();
        assert_eq!(review.average_rating(), 5.0);

        review.value_for_money = Some(Rating::Good);
        review.service_quality = Some(Rating::VeryGood);
        // (5 + 3 + 4) / 3
        assert!((review.average_rating() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn provider_response_recorded() {
        let booking = completed_booking();
        let mut review = Review::for_booking(&booking, Rating::Fair).unwrap();
        review.respond("Sorry to hear that — we've improved the pickup logistics.");
        assert!(review.provider_response.is_some());
        assert!(review.provider_response_date.is_some());
    }
}
