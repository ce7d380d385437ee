pub mod features;
pub mod offset_label;

pub use features::{annotate, twelve_hour_time, AnnotatedFeature, DayPhase};
