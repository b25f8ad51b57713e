use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use safiri_shared::{Currency, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commission::commission_split;

#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid payment transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Payment record, one-to-one with a booking.
///
/// `commission_amount` and `provider_payout` are derived values: every
/// change to `amount` or `commission_rate` goes through a setter that
/// recomputes the split, so the pair is never stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    /// External gateway transaction id; opaque to this core.
    pub payment_id: Option<String>,

    amount: Decimal,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub status: PaymentStatus,

    commission_rate: Decimal,
    commission_amount: Decimal,
    provider_payout: Decimal,

    /// Raw gateway payload, stored as-is for audit.
    pub gateway_response: serde_json::Value,

    pub refund_amount: Decimal,
    pub refund_date: Option<DateTime<Utc>>,
    pub refund_reason: Option<String>,

    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        booking_id: Uuid,
        amount: Decimal,
        currency: Currency,
        method: PaymentMethod,
        commission_rate: Decimal,
    ) -> Result<Self, FinanceError> {
        if amount < Decimal::ZERO {
            return Err(FinanceError::Validation("amount must be >= 0".into()));
        }
        Self::check_rate(commission_rate)?;
        let (commission_amount, provider_payout) = commission_split(amount, commission_rate);
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            booking_id,
            payment_id: None,
            amount,
            currency,
            method,
            status: PaymentStatus::Pending,
            commission_rate,
            commission_amount,
            provider_payout,
            gateway_response: serde_json::Value::Null,
            refund_amount: Decimal::ZERO,
            refund_date: None,
            refund_reason: None,
            created_at: now,
            completed_at: None,
            updated_at: now,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn commission_rate(&self) -> Decimal {
        self.commission_rate
    }

    pub fn commission_amount(&self) -> Decimal {
        self.commission_amount
    }

    pub fn provider_payout(&self) -> Decimal {
        self.provider_payout
    }

    pub fn set_amount(&mut self, amount: Decimal) -> Result<(), FinanceError> {
        if amount < Decimal::ZERO {
            return Err(FinanceError::Validation("amount must be >= 0".into()));
        }
        self.amount = amount;
        self.recompute_split();
        Ok(())
    }

    pub fn set_commission_rate(&mut self, rate: Decimal) -> Result<(), FinanceError> {
        Self::check_rate(rate)?;
        self.commission_rate = rate;
        self.recompute_split();
        Ok(())
    }

    /// Record the gateway's success callback.
    pub fn complete(
        &mut self,
        payment_id: impl Into<String>,
        gateway_response: serde_json::Value,
    ) -> Result<(), FinanceError> {
        if self.status != PaymentStatus::Pending {
            return Err(self.bad_transition(PaymentStatus::Completed));
        }
        self.payment_id = Some(payment_id.into());
        self.gateway_response = gateway_response;
        self.status = PaymentStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.updated_at = Utc::now();
        tracing::info!(payment = %self.id, booking = %self.booking_id, "payment completed");
        Ok(())
    }

    pub fn fail(&mut self, gateway_response: serde_json::Value) -> Result<(), FinanceError> {
        if self.status != PaymentStatus::Pending {
            return Err(self.bad_transition(PaymentStatus::Failed));
        }
        self.gateway_response = gateway_response;
        self.status = PaymentStatus::Failed;
        self.updated_at = Utc::now();
        tracing::warn!(payment = %self.id, booking = %self.booking_id, "payment failed");
        Ok(())
    }

    /// Refund up to the paid amount. Commission already earned is
    /// deliberately left untouched: the platform does not claw back its
    /// cut on refunds.
    pub fn refund(
        &mut self,
        amount: Decimal,
        reason: impl Into<String>,
    ) -> Result<(), FinanceError> {
        if self.status != PaymentStatus::Completed {
            return Err(self.bad_transition(PaymentStatus::Refunded));
        }
        if amount < Decimal::ZERO || amount > self.amount {
            return Err(FinanceError::Validation(format!(
                "refund {} outside [0, {}]",
                amount, self.amount
            )));
        }
        self.refund_amount = amount;
        self.refund_reason = Some(reason.into());
        self.refund_date = Some(Utc::now());
        self.status = PaymentStatus::Refunded;
        self.updated_at = Utc::now();
        tracing::info!(payment = %self.id, %amount, "payment refunded");
        Ok(())
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    pub fn is_refunded(&self) -> bool {
        self.status == PaymentStatus::Refunded
    }

    fn recompute_split(&mut self) {
        let (commission, payout) = commission_split(self.amount, self.commission_rate);
        self.commission_amount = commission;
        self.provider_payout = payout;
        self.updated_at = Utc::now();
    }

    fn check_rate(rate: Decimal) -> Result<(), FinanceError> {
        if rate < Decimal::ZERO || rate > Decimal::from(100) {
            return Err(FinanceError::Validation(
                "commission_rate must be in [0, 100]".into(),
            ));
        }
        Ok(())
    }

    fn bad_transition(&self, to: PaymentStatus) -> FinanceError {
        FinanceError::InvalidTransition {
            from: self.status.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
