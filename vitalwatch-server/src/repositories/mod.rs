mod acceleration_reading;
mod device;
mod notification;
mod patient;
mod reading;
mod sequence;

pub use acceleration_reading::AccelerationReadingRepository;
pub use device::DeviceRepository;
pub use notification::NotificationRepository;
pub use patient::PatientRepository;
pub use reading::ReadingRepository;
pub use sequence::SequenceRepository;
