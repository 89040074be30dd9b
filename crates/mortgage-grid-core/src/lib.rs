pub mod config;
pub mod error;
pub mod grid;
pub mod payment;
pub mod types;

pub use error::MortgageGridError;
pub use types::*;

/// Standard result type for all mortgage-grid operations
pub type MortgageGridResult<T> = Result<T, MortgageGridError>;
