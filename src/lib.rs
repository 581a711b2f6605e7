//! Payroll net pay and anomaly detection engine.
//!
//! This crate computes an employee's net pay from gross compensation using a
//! configurable, slab-based rule table, and flags payroll batches that look
//! anomalous before they are finalized.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
