use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::payment::Payment;

/// Settlement rollup for one provider over a set of payments.
///
/// Completed payments count toward gross/commission/payout; refunded
/// payments are reported separately (their commission stays earned).
pub fn settlement_report(provider_id: Uuid, payments: &[Payment]) -> serde_json::Value {
    let mut gross = Decimal::ZERO;
    let mut commission = Decimal::ZERO;
    let mut payout = Decimal::ZERO;
    let mut refunded = Decimal::ZERO;
    let mut completed_count = 0u32;
    let mut refunded_count = 0u32;

    for payment in payments {
        if payment.is_paid() {
            gross += payment.amount();
            commission += payment.commission_amount();
            payout += payment.provider_payout();
            completed_count += 1;
        } else if payment.is_refunded() {
            refunded += payment.refund_amount;
            commission += payment.commission_amount();
            refunded_count += 1;
        }
    }

    serde_json::json!({
        "provider_id": provider_id,
        "report_date": Utc::now().to_rfc3339(),
        "metrics": {
            "gross_volume": gross,
            "platform_commission": commission,
            "provider_payout": payout,
            "refunded_volume": refunded,
            "completed_payments": completed_count,
            "refunded_payments": refunded_count,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use safiri_shared::{Currency, PaymentMethod};

    fn paid(amount_cents: i64) -> Payment {
        let mut p = Payment::new(
            Uuid::new_v4(),
            Decimal::new(amount_cents, 2),
            Currency::USD,
            PaymentMethod::Stripe,
            Decimal::from(10),
        )
        .unwrap();
        p.complete("pi_x", serde_json::Value::Null).unwrap();
        p
    }

    fn decimal_at(report: &serde_json::Value, key: &str) -> Decimal {
        Decimal::from_str_exact(report["metrics"][key].as_str().unwrap()).unwrap()
    }

    #[test]
    fn report_totals_completed_payments() {
        let provider = Uuid::new_v4();
        let payments = vec![paid(10000), paid(20000)];
        let report = settlement_report(provider, &payments);

        assert_eq!(report["metrics"]["completed_payments"], 2);
        assert_eq!(decimal_at(&report, "gross_volume"), Decimal::new(30000, 2));
        assert_eq!(
            decimal_at(&report, "platform_commission"),
            Decimal::new(3000, 2)
        );
    }

    #[test]
    fn refunds_keep_commission_in_report() {
        let provider = Uuid::new_v4();
        let mut refunded = paid(10000);
        refunded
            .refund(Decimal::new(10000, 2), "weather cancellation")
            .unwrap();
        let report = settlement_report(provider, &[refunded]);

        assert_eq!(report["metrics"]["completed_payments"], 0);
        assert_eq!(report["metrics"]["refunded_payments"], 1);
        assert_eq!(
            decimal_at(&report, "platform_commission"),
            Decimal::new(1000, 2)
        );
    }
}
