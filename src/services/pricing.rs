//! Pricing: rental and purchase totals.
//!
//! Totals are always recomputed from the current catalog price at the time
//! of the request; nothing here is cached.

/// Rental total: daily rate times number of days.
/// `None` when the product does not fit in an `i64`.
pub fn rental_total(daily_rate: i64, days: i64) -> Option<i64> {
    daily_rate.checked_mul(days)
}

/// Purchase total: unit price times quantity.
/// `None` when the product does not fit in an `i64`.
pub fn purchase_total(unit_price: i64, qty: i64) -> Option<i64> {
    unit_price.checked_mul(qty)
}

/// Quantities and durations below 1 are clamped, not rejected: the
/// storefront's decrement control stops at 1, and the server mirrors that.
pub fn clamp_quantity(qty: i64) -> i64 {
    qty.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rental_total_is_rate_times_days() {
        assert_eq!(rental_total(1_200, 1), Some(1_200));
        assert_eq!(rental_total(1_200, 7), Some(8_400));
        assert_eq!(rental_total(3_000, 30), Some(90_000));
    }

    #[test]
    fn purchase_total_is_price_times_qty() {
        assert_eq!(purchase_total(780_000, 1), Some(780_000));
        assert_eq!(purchase_total(18_000, 3), Some(54_000));
    }

    #[test]
    fn overflowing_totals_are_refused_not_wrapped() {
        assert_eq!(rental_total(1_200, i64::MAX), None);
        assert_eq!(purchase_total(i64::MAX, 2), None);
        // the largest representable quantity still works
        assert_eq!(rental_total(1, i64::MAX), Some(i64::MAX));
    }

    #[test]
    fn quantities_below_one_clamp_to_one() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(42), 42);
    }
}
