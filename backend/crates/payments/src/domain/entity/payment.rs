//! Payment entity
//!
//! The reconciled record of a gateway payment attempt, successful or
//! not. One order can accumulate several failed payments and at most
//! one captured one.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, PaymentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Captured,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Captured => "captured",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    /// Gateway-side payment id (e.g. `pay_...`)
    pub provider_payment_id: String,
    pub amount_paise: i64,
    pub status: PaymentStatus,
    /// Instrument reported by the gateway (upi, card, netbanking...)
    pub method: Option<String>,
    /// Gateway failure description, when failed
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn captured(
        order_id: OrderId,
        provider_payment_id: String,
        amount_paise: i64,
        method: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            order_id,
            provider_payment_id,
            amount_paise,
            status: PaymentStatus::Captured,
            method,
            failure_reason: None,
            created_at: now,
        }
    }

    pub fn failed(
        order_id: OrderId,
        provider_payment_id: String,
        amount_paise: i64,
        failure_reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            order_id,
            provider_payment_id,
            amount_paise,
            status: PaymentStatus::Failed,
            method: None,
            failure_reason,
            created_at: now,
        }
    }
}
