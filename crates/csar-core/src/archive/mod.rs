//! ZIP container validation and extraction.

pub mod extract;
pub mod probe;

pub use extract::extract_zip;
pub use probe::EndOfCentralDirectory;
pub use probe::probe_zip;
