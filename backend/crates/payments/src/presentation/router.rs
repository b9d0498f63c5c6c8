//! Payments route table

use axum::routing::post;
use axum::Router;

use crate::application::gateway::PaymentGateway;
use crate::domain::repository::OrderRepository;
use crate::presentation::handler::{self, PaymentsState};

/// Routes mounted under `/api/payments`. Every route expects an
/// authenticated principal, so the caller layers the auth middleware on
/// top of this router.
pub fn payments_router<R, G>(state: PaymentsState<R, G>) -> Router
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/create-order", post(handler::create_order::<R, G>))
        .route("/verify", post(handler::verify_payment::<R, G>))
        .route("/failure", post(handler::record_failure::<R, G>))
        .route("/cancel", post(handler::cancel_order::<R, G>))
        .with_state(state)
}
