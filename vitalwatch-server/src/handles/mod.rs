mod docs_handle;
mod notification_handle;
mod patient_handle;
mod telemetry_handle;

pub use docs_handle::*;
pub use notification_handle::*;
pub use patient_handle::*;
pub use telemetry_handle::*;
