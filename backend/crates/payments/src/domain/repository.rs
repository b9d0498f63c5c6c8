//! Repository trait for the payments domain

use kernel::id::{ApplicationRef, UserRef};
use rust_decimal::Decimal;

use crate::domain::entity::{Order, Payment};
use crate::error::PaymentsResult;

/// The slice of an application that billing needs.
#[derive(Debug, Clone)]
pub struct BillableApplication {
    pub ref_id: ApplicationRef,
    /// Fee in rupees, frozen at application time
    pub amount: Decimal,
    pub paid: bool,
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// The user's application, if it exists and belongs to them.
    async fn find_billable_application(
        &self,
        user_ref: UserRef,
        application_ref: ApplicationRef,
    ) -> PaymentsResult<Option<BillableApplication>>;

    async fn create_order(&self, order: &Order) -> PaymentsResult<()>;

    /// Order by gateway order id, scoped to the user.
    async fn find_order_for_user(
        &self,
        provider_order_id: &str,
        user_ref: UserRef,
    ) -> PaymentsResult<Option<Order>>;

    /// Atomically: order goes to `paid`, the captured payment row is
    /// inserted, and the application is marked paid.
    async fn mark_paid(&self, order: &Order, payment: &Payment) -> PaymentsResult<()>;

    /// Record a failed attempt: order to `failed` plus a failed payment
    /// row when the gateway supplied a payment id.
    async fn mark_failed(&self, order: &Order, payment: Option<&Payment>) -> PaymentsResult<()>;

    /// Persist the order's current status (used for cancellation).
    async fn update_status(&self, order: &Order) -> PaymentsResult<()>;
}
