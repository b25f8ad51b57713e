use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::inventory::InventoryRecord;

/// Persistence seam for inventory records. The engine itself owns the
/// invariants; implementations only store and fetch rows.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn get_record(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<InventoryRecord>, Box<dyn std::error::Error + Send + Sync>>;

    async fn upsert_record(
        &self,
        record: &InventoryRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_for_service(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<InventoryRecord>, Box<dyn std::error::Error + Send + Sync>>;
}
