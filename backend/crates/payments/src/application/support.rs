//! In-memory fakes for payments use case tests

use std::collections::HashMap;
use std::sync::Mutex;

use kernel::id::{ApplicationRef, OrderId, UserRef};
use platform::crypto::{hmac_sha256, to_hex};

use crate::application::config::PaymentsConfig;
use crate::application::gateway::{GatewayError, GatewayOrder, GatewayPayment, PaymentGateway};
use crate::domain::entity::{Order, Payment};
use crate::domain::repository::{BillableApplication, OrderRepository};
use crate::error::PaymentsResult;

pub(crate) fn test_config() -> PaymentsConfig {
    PaymentsConfig::new("rzp_test_key".to_string(), "test_key_secret".to_string())
}

/// Signature as the gateway would compute it, with the test secret.
pub(crate) fn sign(provider_order_id: &str, provider_payment_id: &str) -> String {
    let payload = format!("{provider_order_id}|{provider_payment_id}");
    to_hex(&hmac_sha256(b"test_key_secret", payload.as_bytes()))
}

#[derive(Default)]
pub(crate) struct InMemoryOrderStore {
    applications: Mutex<HashMap<(UserRef, ApplicationRef), BillableApplication>>,
    orders: Mutex<Vec<Order>>,
    payments: Mutex<Vec<Payment>>,
}

impl InMemoryOrderStore {
    pub fn add_application(&self, user_ref: UserRef, application: BillableApplication) {
        self.applications
            .lock()
            .unwrap()
            .insert((user_ref, application.ref_id), application);
    }

    pub fn application_paid(&self, application_ref: ApplicationRef) -> bool {
        self.applications
            .lock()
            .unwrap()
            .values()
            .any(|a| a.ref_id == application_ref && a.paid)
    }

    pub fn payments_for(&self, order_id: OrderId) -> Vec<Payment> {
        self.payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect()
    }

    fn store_order(&self, order: &Order) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(existing) = orders.iter_mut().find(|o| o.id == order.id) {
            *existing = order.clone();
        } else {
            orders.push(order.clone());
        }
    }
}

impl OrderRepository for InMemoryOrderStore {
    async fn find_billable_application(
        &self,
        user_ref: UserRef,
        application_ref: ApplicationRef,
    ) -> PaymentsResult<Option<BillableApplication>> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .get(&(user_ref, application_ref))
            .cloned())
    }

    async fn create_order(&self, order: &Order) -> PaymentsResult<()> {
        self.store_order(order);
        Ok(())
    }

    async fn find_order_for_user(
        &self,
        provider_order_id: &str,
        user_ref: UserRef,
    ) -> PaymentsResult<Option<Order>> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.provider_order_id == provider_order_id && o.user_ref == user_ref)
            .cloned())
    }

    async fn mark_paid(&self, order: &Order, payment: &Payment) -> PaymentsResult<()> {
        self.store_order(order);
        self.payments.lock().unwrap().push(payment.clone());
        let mut applications = self.applications.lock().unwrap();
        if let Some(application) = applications.get_mut(&(order.user_ref, order.application_ref)) {
            application.paid = true;
        }
        Ok(())
    }

    async fn mark_failed(&self, order: &Order, payment: Option<&Payment>) -> PaymentsResult<()> {
        self.store_order(order);
        if let Some(payment) = payment {
            self.payments.lock().unwrap().push(payment.clone());
        }
        Ok(())
    }

    async fn update_status(&self, order: &Order) -> PaymentsResult<()> {
        self.store_order(order);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    payments: Mutex<HashMap<String, GatewayPayment>>,
    counter: Mutex<u32>,
}

impl FakeGateway {
    pub fn add_payment(&self, payment_id: &str, order_id: &str, status: &str, amount_paise: i64) {
        self.payments.lock().unwrap().insert(
            payment_id.to_string(),
            GatewayPayment {
                provider_payment_id: payment_id.to_string(),
                provider_order_id: order_id.to_string(),
                status: status.to_string(),
                amount_paise,
                method: Some("upi".to_string()),
            },
        );
    }

    pub fn add_captured_payment(&self, payment_id: &str, order_id: &str, amount_paise: i64) {
        self.add_payment(payment_id, order_id, "captured", amount_paise);
    }
}

impl PaymentGateway for FakeGateway {
    async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(GatewayOrder {
            provider_order_id: format!("order_fake_{counter}"),
            amount_paise,
            currency: currency.to_string(),
        })
    }

    async fn fetch_payment(
        &self,
        provider_payment_id: &str,
    ) -> Result<GatewayPayment, GatewayError> {
        self.payments
            .lock()
            .unwrap()
            .get(provider_payment_id)
            .cloned()
            .ok_or(GatewayError::Service { status: 404 })
    }
}
