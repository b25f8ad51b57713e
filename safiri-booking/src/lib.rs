pub mod codes;
pub mod manager;
pub mod models;
pub mod package;
pub mod repository;
pub mod review;

pub use manager::{BookingError, BookingManager};
pub use models::{Booking, BookingRequest};
pub use package::{Package, PackageService};
pub use repository::BookingRepository;
pub use review::Review;
