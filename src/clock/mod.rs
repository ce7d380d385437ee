pub mod local_offset;
pub mod system_zone;

pub use local_offset::{resolve, LocalObservation, OffsetMethod};
