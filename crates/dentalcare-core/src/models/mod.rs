//! Domain models for dentalcare.

mod appointment;
mod backup;
mod patient;
mod treatment;

pub use appointment::*;
pub use backup::*;
pub use patient::*;
pub use treatment::*;
