//! Request/response orchestration on top of the HTTP adapter.

mod payment_service;
mod resource_service;

pub use payment_service::{ChargeOptions, PaymentService, TransactionOptions};
pub use resource_service::ResourceService;
