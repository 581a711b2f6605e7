//! Calculation logic for the payroll engine.
//!
//! This module contains slab selection and the net pay calculator that
//! derives gross pay, company tax, social security, professional tax, and
//! net pay for one employee.

mod net_pay;
mod slab;

pub use net_pay::compute_net_pay;
pub use slab::find_slab;
