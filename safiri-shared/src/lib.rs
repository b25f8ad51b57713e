pub mod enums;
pub mod slug;

pub use enums::{
    BookingStatus, Currency, MetricType, PaymentMethod, PaymentStatus, PromotionType, Rating,
    ServiceType, UserRole,
};
pub use slug::slugify;
