//! Total-order comparison of floating-point values.

use std::cmp::Ordering;

/// Compare two floats for sorting.
///
/// Uses relational operators only, never `a - b`. Values that have no
/// relational answer (either operand NaN) fall back to [`f64::total_cmp`],
/// which keeps the comparator a total order so sorting stays well defined:
/// positive NaN sorts last and negative NaN first. `-0.0` and `+0.0` compare
/// equal.
#[must_use]
#[inline]
#[allow(clippy::trivially_copy_pass_by_ref, clippy::float_cmp)]
pub fn compare_floats(a: &f64, b: &f64) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(b)
    }
}
