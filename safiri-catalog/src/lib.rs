pub mod destination;
pub mod inventory;
pub mod provider;
pub mod repository;
pub mod schedule;
pub mod service;

pub use destination::{Amenity, Category, Destination};
pub use inventory::{InventoryError, InventoryLedger, InventoryRecord, SlotReservation};
pub use provider::ServiceProvider;
pub use repository::InventoryRepository;
pub use schedule::{AvailabilitySchedule, WeekdaySet};
pub use service::TourService;
