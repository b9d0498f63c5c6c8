//! Verify payment use case
//!
//! The trust boundary of the whole payments flow. Nothing in the
//! client's callback payload is believed until three independent checks
//! pass: our own HMAC over the order/payment pair, the gateway's view
//! of the payment (captured, against this order), and an exact amount
//! match against the stored order.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserRef;

use crate::application::config::PaymentsConfig;
use crate::application::gateway::PaymentGateway;
use crate::application::signature::signature_valid;
use crate::domain::entity::{OrderStatus, Payment};
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentsError, PaymentsResult};

#[derive(Debug, Clone)]
pub struct VerifyPaymentInput {
    pub provider_order_id: String,
    pub provider_payment_id: String,
    pub signature: String,
}

pub struct VerifyPaymentUseCase<R, G> {
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<PaymentsConfig>,
}

impl<R, G> VerifyPaymentUseCase<R, G>
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
        input: VerifyPaymentInput,
    ) -> PaymentsResult<()> {
        let now = Utc::now();

        let mut order = self
            .repo
            .find_order_for_user(&input.provider_order_id, user_ref)
            .await?
            .ok_or(PaymentsError::OrderNotFound)?;
        if order.status == OrderStatus::Paid {
            return Err(PaymentsError::AlreadyPaid);
        }

        if !signature_valid(
            &self.config.key_secret,
            &input.provider_order_id,
            &input.provider_payment_id,
            &input.signature,
        ) {
            return Err(PaymentsError::SignatureMismatch);
        }

        let gateway_payment = self
            .gateway
            .fetch_payment(&input.provider_payment_id)
            .await?;
        if gateway_payment.provider_order_id != input.provider_order_id {
            return Err(PaymentsError::Validation(
                "payment does not belong to this order".to_string(),
            ));
        }
        if !gateway_payment.is_captured() {
            return Err(PaymentsError::PaymentNotCaptured);
        }
        if gateway_payment.amount_paise != order.amount_paise {
            return Err(PaymentsError::AmountMismatch);
        }

        order.transition(OrderStatus::Paid, now)?;
        let payment = Payment::captured(
            order.id,
            gateway_payment.provider_payment_id,
            gateway_payment.amount_paise,
            gateway_payment.method,
            now,
        );
        self.repo.mark_paid(&order, &payment).await?;

        tracing::info!(
            user_ref = %user_ref,
            provider_order_id = %input.provider_order_id,
            "payment verified and reconciled"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::support::{
        sign, test_config, FakeGateway, InMemoryOrderStore,
    };
    use crate::domain::entity::Order;
    use crate::domain::repository::BillableApplication;
    use kernel::id::ApplicationRef;
    use rust_decimal::Decimal;

    struct Fixture {
        store: Arc<InMemoryOrderStore>,
        gateway: Arc<FakeGateway>,
        user_ref: UserRef,
        application_ref: ApplicationRef,
    }

    fn fixture() -> Fixture {
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
        Fixture {
            store,
            gateway: Arc::new(FakeGateway::default()),
            user_ref,
            application_ref,
        }
    }

    async fn seed_order(f: &Fixture) -> Order {
        let order = Order::new(
            f.user_ref,
            f.application_ref,
            "order_test_1".to_string(),
            150_000,
            "INR".to_string(),
            Utc::now(),
        );
        f.store.create_order(&order).await.unwrap();
        order
    }

    fn use_case(f: &Fixture) -> VerifyPaymentUseCase<InMemoryOrderStore, FakeGateway> {
        VerifyPaymentUseCase::new(
            Arc::clone(&f.store),
            Arc::clone(&f.gateway),
            Arc::new(test_config()),
        )
    }

    fn input(order_id: &str, payment_id: &str) -> VerifyPaymentInput {
        VerifyPaymentInput {
            provider_order_id: order_id.to_string(),
            provider_payment_id: payment_id.to_string(),
            signature: sign(order_id, payment_id),
        }
    }

    #[tokio::test]
    async fn test_happy_path_marks_everything_paid() {
        let f = fixture();
        let order = seed_order(&f).await;
        f.gateway
            .add_captured_payment("pay_1", "order_test_1", 150_000);

        use_case(&f)
            .execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap();

        let stored = f
            .store
            .find_order_for_user("order_test_1", f.user_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, OrderStatus::Paid);
        assert!(f.store.application_paid(order.application_ref));
        assert_eq!(f.store.payments_for(order.id).len(), 1);
    }

    #[tokio::test]
    async fn test_bad_signature_rejected() {
        let f = fixture();
        seed_order(&f).await;
        f.gateway
            .add_captured_payment("pay_1", "order_test_1", 150_000);

        let mut bad = input("order_test_1", "pay_1");
        bad.signature = sign("order_test_1", "pay_other");
        let err = use_case(&f)
            .execute(f.user_ref, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::SignatureMismatch));
    }

    #[tokio::test]
    async fn test_uncaptured_payment_rejected() {
        let f = fixture();
        seed_order(&f).await;
        f.gateway.add_payment("pay_1", "order_test_1", "authorized", 150_000);

        let err = use_case(&f)
            .execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::PaymentNotCaptured));
    }

    #[tokio::test]
    async fn test_amount_mismatch_rejected() {
        let f = fixture();
        seed_order(&f).await;
        // Gateway says 100 rupees were captured against a 1500 rupee order
        f.gateway
            .add_captured_payment("pay_1", "order_test_1", 10_000);

        let err = use_case(&f)
            .execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::AmountMismatch));
    }

    #[tokio::test]
    async fn test_payment_for_other_order_rejected() {
        let f = fixture();
        seed_order(&f).await;
        f.gateway
            .add_captured_payment("pay_1", "order_other", 150_000);

        let err = use_case(&f)
            .execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_double_verify_rejected() {
        let f = fixture();
        seed_order(&f).await;
        f.gateway
            .add_captured_payment("pay_1", "order_test_1", 150_000);
        let uc = use_case(&f);

        uc.execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap();
        let err = uc
            .execute(f.user_ref, input("order_test_1", "pay_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::AlreadyPaid));
    }

    #[tokio::test]
    async fn test_foreign_order_not_found() {
        let f = fixture();
        seed_order(&f).await;
        f.gateway
            .add_captured_payment("pay_1", "order_test_1", 150_000);

        let err = use_case(&f)
            .execute(UserRef::new(), input("order_test_1", "pay_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentsError::OrderNotFound));
    }
}
