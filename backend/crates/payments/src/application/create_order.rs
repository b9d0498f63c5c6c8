//! Create order use case
//!
//! Opens a gateway order for an application fee. The amount always
//! comes from the stored application, never from the client.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{ApplicationRef, UserRef};

use crate::application::config::PaymentsConfig;
use crate::application::gateway::PaymentGateway;
use crate::domain::entity::Order;
use crate::domain::money::to_paise;
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentsError, PaymentsResult};

#[derive(Debug, Clone)]
pub struct CreateOrderOutput {
    pub provider_order_id: String,
    pub amount_paise: i64,
    pub currency: String,
    /// Public key id the client passes to the checkout widget
    pub key_id: String,
}

pub struct CreateOrderUseCase<R, G> {
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<PaymentsConfig>,
}

impl<R, G> CreateOrderUseCase<R, G>
where
    R: OrderRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<PaymentsConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_ref: UserRef,
        application_ref: ApplicationRef,
    ) -> PaymentsResult<CreateOrderOutput> {
        let application = self
            .repo
            .find_billable_application(user_ref, application_ref)
            .await?
            .ok_or(PaymentsError::ApplicationNotFound)?;
        if application.paid {
            return Err(PaymentsError::AlreadyPaid);
        }

        let amount_paise = to_paise(application.amount)?;
        let gateway_order = self
            .gateway
            .create_order(
                amount_paise,
                &self.config.currency,
                &application_ref.to_string(),
            )
            .await?;

        let order = Order::new(
            user_ref,
            application_ref,
            gateway_order.provider_order_id.clone(),
            amount_paise,
            gateway_order.currency.clone(),
            Utc::now(),
        );
        self.repo.create_order(&order).await?;

        tracing::info!(
            user_ref = %user_ref,
            provider_order_id = %gateway_order.provider_order_id,
            amount_paise,
            "payment order created"
        );
        Ok(CreateOrderOutput {
            provider_order_id: gateway_order.provider_order_id,
            amount_paise,
            currency: gateway_order.currency,
            key_id: self.config.key_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::support::{test_config, FakeGateway, InMemoryOrderStore};
    use crate::domain::repository::BillableApplication;
    use rust_decimal::Decimal;

    fn use_case(
        store: Arc<InMemoryOrderStore>,
        gateway: Arc<FakeGateway>,
    ) -> CreateOrderUseCase<InMemoryOrderStore, FakeGateway> {
        CreateOrderUseCase::new(store, gateway, Arc::new(test_config()))
    }

    #[tokio::test]
    async fn test_create_order_uses_stored_amount() {
        let store = Arc::new(InMemoryOrderStore::default());
        let user_ref = UserRef::new();
        let application_ref = ApplicationRef::new();
        store.add_application(
            user_ref,
            BillableApplication {
                ref_id: application_ref,
                amount: Decimal::from(1500),
                paid: false,
            },
        );
        let gateway = Arc::new(FakeGateway::default());

        let out = use_case(store.clone(), gateway)
            .execute(user_ref, application_ref)
            .await
            .unwrap();

        assert_eq!(out.amount_paise, 150_000);
        assert_eq!(out.currency, "INR");
        assert_eq!(out.key_id, "rzp_test_key");
        let order = store
            .find_order_for_user(&out.provider_order_id, user_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.amount_paise, 150_000);
    }

    #[tokio::test]
    async fn test_unknown_application() {
        let store = Arc::new(InMemoryOrderStore::default());
        let err = use_case(store, Arc::new(FakeGateway::default()))
            .execute(UserRef::new(), ApplicationRef::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::ApplicationNotFound));
    }

    #[tokio::test]
    async fn test_already_paid_rejected() {
        let store = Arc::new(InMemoryOrderStore::default());
        let user_ref = UserRef::new();
        let application_ref = ApplicationRef::new();
        store.add_application(
            user_ref,
            BillableApplication {
                ref_id: application_ref,
                amount: Decimal::from(1500),
                paid: true,
            },
        );

        let err = use_case(store, Arc::new(FakeGateway::default()))
            .execute(user_ref, application_ref)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::AlreadyPaid));
    }
}
