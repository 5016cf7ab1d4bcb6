pub mod dto;
pub mod habit;

pub use dto::*;
pub use habit::*;
