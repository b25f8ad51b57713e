pub mod commission;
pub mod payment;
pub mod repository;
pub mod settlement;

pub use commission::commission_split;
pub use payment::{FinanceError, Payment};
pub use repository::PaymentRepository;
pub use settlement::settlement_report;
