//! Weather notifier domain logic.
//!
//! This crate holds the alert evaluation engine and the plain data shapes it
//! operates on:
//!
//! - [`condition`] — watched attributes, comparison operators, and alert
//!   conditions.
//! - [`weather`] — observed weather snapshots.
//! - [`alert`] — the comparator and alert-set generator.
//! - [`message`] — notification message formatting.
//! - [`subscription`] — the subscription shape the notification cycle
//!   evaluates.
//!
//! Everything here is pure: no database access, no HTTP, no SMTP. Callers
//! fetch data and pass it in.

pub mod alert;
pub mod condition;
pub mod error;
pub mod message;
pub mod subscription;
pub mod types;
pub mod weather;
