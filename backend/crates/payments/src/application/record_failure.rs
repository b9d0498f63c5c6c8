//! Record failure use case
//!
//! The client reports that checkout failed. The order moves to
//! `failed` (idempotently, since checkout widgets can fire the failure
//! callback more than once) and the failed attempt is kept for support.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserRef;

use crate::domain::entity::{OrderStatus, Payment};
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentsError, PaymentsResult};

#[derive(Debug, Clone)]
pub struct RecordFailureInput {
    pub provider_order_id: String,
    pub provider_payment_id: Option<String>,
    pub reason: Option<String>,
}

pub struct RecordFailureUseCase<R> {
    repo: Arc<R>,
}

impl<R> RecordFailureUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_ref: UserRef,
        input: RecordFailureInput,
    ) -> PaymentsResult<()> {
        let now = Utc::now();

        let mut order = self
            .repo
            .find_order_for_user(&input.provider_order_id, user_ref)
            .await?
            .ok_or(PaymentsError::OrderNotFound)?;
        order.transition(OrderStatus::Failed, now)?;

        let payment = input.provider_payment_id.map(|payment_id| {
            Payment::failed(order.id, payment_id, order.amount_paise, input.reason, now)
        });
        self.repo.mark_failed(&order, payment.as_ref()).await?;

        tracing::warn!(
            user_ref = %user_ref,
            provider_order_id = %input.provider_order_id,
            "payment failure recorded"
        );
        Ok(())
    }
}
