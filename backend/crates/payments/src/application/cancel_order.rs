//! Cancel order use case
//!
//! Only freshly created orders can be cancelled; anything that has seen
//! a payment attempt keeps its history.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserRef;

use crate::domain::entity::OrderStatus;
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentsError, PaymentsResult};

pub struct CancelOrderUseCase<R> {
    repo: Arc<R>,
}

impl<R> CancelOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_ref: UserRef, provider_order_id: &str) -> PaymentsResult<()> {
        let mut order = self
            .repo
            .find_order_for_user(provider_order_id, user_ref)
            .await?
            .ok_or(PaymentsError::OrderNotFound)?;

        order.transition(OrderStatus::Cancelled, Utc::now())?;
        self.repo.update_status(&order).await?;

        tracing::info!(
            user_ref = %user_ref,
            provider_order_id = %provider_order_id,
            "order cancelled"
        );
        Ok(())
    }
}
