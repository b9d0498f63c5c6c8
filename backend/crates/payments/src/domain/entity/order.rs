//! Order entity and its state machine
//!
//! One order per payment attempt against an application. The state
//! machine is deliberately narrow: a paid or cancelled order is final,
//! and a failed order may be retried (the gateway reuses the same
//! provider order for retries).

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationRef, OrderId, UserRef};

use crate::error::{PaymentsError, PaymentsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Created,
    Paid,
    Failed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::Failed => "failed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> PaymentsResult<Self> {
        match value {
            "created" => Ok(OrderStatus::Created),
            "paid" => Ok(OrderStatus::Paid),
            "failed" => Ok(OrderStatus::Failed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(PaymentsError::Validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }

    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Created, Paid) | (Created, Failed) | (Created, Cancelled)
                | (Failed, Paid) | (Failed, Failed)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_ref: UserRef,
    pub application_ref: ApplicationRef,
    /// Gateway-side order id (e.g. `order_...`)
    pub provider_order_id: String,
    pub amount_paise: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        user_ref: UserRef,
        application_ref: ApplicationRef,
        provider_order_id: String,
        amount_paise: i64,
        currency: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user_ref,
            application_ref,
            provider_order_id,
            amount_paise,
            currency,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn transition(&mut self, to: OrderStatus, now: DateTime<Utc>) -> PaymentsResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(PaymentsError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            UserRef::new(),
            ApplicationRef::new(),
            "order_test".to_string(),
            150_000,
            "INR".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_happy_path() {
        let mut o = order();
        o.transition(OrderStatus::Paid, Utc::now()).unwrap();
        assert_eq!(o.status, OrderStatus::Paid);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut o = order();
        o.transition(OrderStatus::Failed, Utc::now()).unwrap();
        // A later retry against the same order may still succeed
        o.transition(OrderStatus::Paid, Utc::now()).unwrap();
        assert_eq!(o.status, OrderStatus::Paid);
    }

    #[test]
    fn test_paid_is_final() {
        let mut o = order();
        o.transition(OrderStatus::Paid, Utc::now()).unwrap();
        assert!(matches!(
            o.transition(OrderStatus::Cancelled, Utc::now()),
            Err(PaymentsError::InvalidTransition { .. })
        ));
        assert!(o.transition(OrderStatus::Failed, Utc::now()).is_err());
    }

    #[test]
    fn test_cancelled_is_final() {
        let mut o = order();
        o.transition(OrderStatus::Cancelled, Utc::now()).unwrap();
        assert!(o.transition(OrderStatus::Paid, Utc::now()).is_err());
    }

    #[test]
    fn test_failure_is_idempotent() {
        let mut o = order();
        o.transition(OrderStatus::Failed, Utc::now()).unwrap();
        o.transition(OrderStatus::Failed, Utc::now()).unwrap();
        assert_eq!(o.status, OrderStatus::Failed);
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Created,
            OrderStatus::Paid,
            OrderStatus::Failed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("refunded").is_err());
    }
}
