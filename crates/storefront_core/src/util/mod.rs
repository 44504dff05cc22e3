//! Display helpers shared by pages and payload validation.

pub mod date;
pub mod image;
