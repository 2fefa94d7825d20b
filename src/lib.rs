//! Appointment calendar core for the clinic front desk.
//!
//! Fetches the clinic's appointments once, then lays them out in day, week,
//! month and year views driven by a small navigation state machine.

pub mod calendar;
pub mod client;
pub mod config;
pub mod datetime;
pub mod error;
pub mod layout;
pub mod models;
pub mod view;
