//! # Slotwise Core
//!
//! Domain types and scheduling rules shared by the database, notification and
//! API crates.
//!
//! - [`business_hours`]: the weekly open/close table
//! - [`availability`]: slot generation and conflict filtering
//! - [`booking`]: validation of booking submissions and status changes
//! - [`store`]: the persistence seam the API talks to

pub mod availability;
pub mod booking;
pub mod business_hours;
pub mod errors;
pub mod models;
pub mod store;
