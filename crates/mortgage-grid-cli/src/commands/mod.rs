pub mod controls;
pub mod grid;
pub mod payment;
