mod auth_service;
pub mod decoder;
mod event_bus;
mod ingest_service;
mod notification_service;
mod reading_service;
mod threshold_service;

pub use auth_service::*;
pub use event_bus::*;
pub use ingest_service::*;
pub use notification_service::*;
pub use reading_service::*;
pub use threshold_service::*;
