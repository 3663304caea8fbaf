mod notification;
mod patient;
mod telemetry;

pub use notification::*;
pub use patient::*;
pub use telemetry::*;

pub type Id = i32;
