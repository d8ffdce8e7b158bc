mod filesystem;

pub use filesystem::write_output;
pub(crate) use filesystem::{read_to_string_if_exists, write_atomic_file};
