mod acceleration_reading;
mod device;
mod notification;
mod patient;
mod reading;
mod sequence;

pub use acceleration_reading::{AccelerationReading, AccelerationReadingTable};
pub use device::{Device, DeviceTable};
pub use notification::{Notification, NotificationTable};
pub use patient::{Patient, PatientTable};
pub use reading::{Reading, ReadingTable};
pub use sequence::SequenceTable;

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
