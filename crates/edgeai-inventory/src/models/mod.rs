pub mod device;
pub mod record;

pub use device::{ApplicationKind, DeviceCategory, NormalizedDevice};
pub use record::RawRecord;
