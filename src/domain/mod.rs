mod duration;

pub use duration::{DurationParseError, HumanDuration, parse_duration};
