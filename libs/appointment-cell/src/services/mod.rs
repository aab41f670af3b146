pub mod booking;
pub mod lifecycle;
pub mod receipt;
pub mod validation;
