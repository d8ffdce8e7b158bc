mod profile;
pub mod validation;

pub use profile::{
    DEFAULT_ATTEMPTS, DEFAULT_EXPONENT, DEFAULT_TOTAL_DURATION, PlanInputs, PlanSettings, Profile,
};
