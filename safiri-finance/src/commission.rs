use rust_decimal::Decimal;

/// Split an amount into (platform commission, provider payout).
///
/// `rate` is a percentage in [0, 100]. The commission is rounded to the
/// smallest currency unit (two decimal places, banker's rounding) and
/// the payout is the exact remainder, so the two always sum back to the
/// original amount with no rounding leakage.
///
/// Pure and re-entrant: callers recompute on every amount or rate
/// change rather than caching the result.
pub fn commission_split(amount: Decimal, rate: Decimal) -> (Decimal, Decimal) {
    let commission = (amount * rate / Decimal::from(100)).round_dp(2);
    let payout = amount - commission;
    (commission, payout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_of_one_hundred() {
        let (commission, payout) =
            commission_split(Decimal::new(10000, 2), Decimal::new(1000, 2));
        assert_eq!(commission, Decimal::new(1000, 2)); // 10.00
        assert_eq!(payout, Decimal::new(9000, 2)); // 90.00
    }

    #[test]
    fn split_always_sums_back_exactly() {
        for amount_cents in [0i64, 1, 99, 10_000, 123_456, 999_999_99] {
            for rate_bp in [0i64, 1, 250, 1000, 3333, 10_000] {
                let amount = Decimal::new(amount_cents, 2);
                let rate = Decimal::new(rate_bp, 2);
                let (commission, payout) = commission_split(amount, rate);
                assert_eq!(commission + payout, amount, "amount={} rate={}", amount, rate);
                assert!(commission >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn full_rate_takes_everything() {
        let (commission, payout) =
            commission_split(Decimal::new(5000, 2), Decimal::from(100));
        assert_eq!(commission, Decimal::new(5000, 2));
        assert_eq!(payout, Decimal::ZERO);
    }

    #[test]
    fn sub_cent_commission_rounds_to_even() {
        // 0.33 at 10% = 0.033 -> rounds to 0.03
        let (commission, payout) =
            commission_split(Decimal::new(33, 2), Decimal::from(10));
        assert_eq!(commission, Decimal::new(3, 2));
        assert_eq!(payout, Decimal::new(30, 2));
    }
}
