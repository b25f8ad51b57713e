use async_trait::async_trait;
use uuid::Uuid;

use crate::payment::Payment;

/// Persistence seam for payments; keyed 1:1 to bookings.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get_by_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Payment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save_payment(
        &self,
        payment: &Payment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
