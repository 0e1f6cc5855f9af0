// Types representing RML configuration sections and the values in them

mod error;
mod section;
mod types;
pub mod units;

// Re-export all public symbols
pub use error::*;
pub use section::*;
pub use types::*;
