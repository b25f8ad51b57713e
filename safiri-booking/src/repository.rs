use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Booking;

/// Persistence seam for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_booking(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save_booking(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_for_tourist(
        &self,
        tourist_id: Uuid,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;
}
