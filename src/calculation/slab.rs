//! Slab selection.

use rust_decimal::Decimal;

use crate::config::Slab;

/// Finds the slab whose inclusive `[min, max]` range contains `amount`.
///
/// Slabs are scanned in order and the first match wins, so when two slabs
/// share a boundary value the earlier one applies. Returns `None` when the
/// amount falls in a gap; callers treat that as a zero charge.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::find_slab;
/// use payroll_engine::config::TaxSlab;
/// use rust_decimal::Decimal;
///
/// let slabs = vec![
///     TaxSlab { min: Decimal::ZERO, max: Some(Decimal::from(50000)), rate: Decimal::new(5, 2) },
///     TaxSlab { min: Decimal::from(50000), max: None, rate: Decimal::new(20, 2) },
/// ];
///
/// assert_eq!(find_slab(&slabs, Decimal::from(50000)).unwrap().rate, Decimal::new(5, 2));
/// assert_eq!(find_slab(&slabs, Decimal::from(50001)).unwrap().rate, Decimal::new(20, 2));
/// ```
pub fn find_slab<S: Slab>(slabs: &[S], amount: Decimal) -> Option<&S> {
    slabs.iter().find(|slab| slab.contains(amount))
}
