use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use kernel::id::ApplicationRef;
use kernel::principal::Principal;

use crate::application::cancel_order::CancelOrderUseCase;
use crate::application::config::PaymentsConfig;
use crate::application::create_order::CreateOrderUseCase;
use crate::application::gateway::PaymentGateway;
use crate::application::record_failure::{RecordFailureInput, RecordFailureUseCase};
use crate::application::verify_payment::{VerifyPaymentInput, VerifyPaymentUseCase};
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentsError, PaymentsResult};
use crate::presentation::dto::{
    CancelOrderRequest, CreateOrderRequest, CreateOrderResponse, PaymentFailureRequest,
    PaymentStatusResponse, VerifyPaymentRequest,
};

pub struct PaymentsState<R, G> {
    pub create_order: Arc<CreateOrderUseCase<R, G>>,
    pub verify_payment: Arc<VerifyPaymentUseCase<R, G>>,
    pub record_failure: Arc<RecordFailureUseCase<R>>,
    pub cancel_order: Arc<CancelOrderUseCase<R>>,
}

impl<R, G> Clone for PaymentsState<R, G> {
    fn clone(&self) -> Self {
        Self {
            create_order: Arc::clone(&self.create_order),
            verify_payment: Arc::clone(&self.verify_payment),
            record_failure: Arc::clone(&self.record_failure),
            cancel_order: Arc::clone(&self.cancel_order),
        }
    }
}

impl<R, G> PaymentsState<R, G>
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: PaymentsConfig) -> Self {
        let config = Arc::new(config);
        Self {
            create_order: Arc::new(CreateOrderUseCase::new(
                Arc::clone(&repo),
                Arc::clone(&gateway),
                Arc::clone(&config),
            )),
            verify_payment: Arc::new(VerifyPaymentUseCase::new(
                Arc::clone(&repo),
                gateway,
                config,
            )),
            record_failure: Arc::new(RecordFailureUseCase::new(Arc::clone(&repo))),
            cancel_order: Arc::new(CancelOrderUseCase::new(repo)),
        }
    }
}

fn parse_application_ref(raw: &str) -> PaymentsResult<ApplicationRef> {
    ApplicationRef::parse(raw)
        .map_err(|_| PaymentsError::Validation("invalid application id".to_string()))
}

pub async fn create_order<R, G>(
    State(state): State<PaymentsState<R, G>>,
    principal: Principal,
    Json(request): Json<CreateOrderRequest>,
) -> PaymentsResult<Json<CreateOrderResponse>>
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let application_ref = parse_application_ref(&request.application_id)?;
    let output = state
        .create_order
        .execute(principal.user_ref, application_ref)
        .await?;
    Ok(Json(output.into()))
}

pub async fn verify_payment<R, G>(
    State(state): State<PaymentsState<R, G>>,
    principal: Principal,
    Json(request): Json<VerifyPaymentRequest>,
) -> PaymentsResult<Json<PaymentStatusResponse>>
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    state
        .verify_payment
        .execute(
            principal.user_ref,
            VerifyPaymentInput {
                provider_order_id: request.order_id,
                provider_payment_id: request.payment_id,
                signature: request.signature,
            },
        )
        .await?;
    Ok(Json(PaymentStatusResponse::paid()))
}

pub async fn record_failure<R, G>(
    State(state): State<PaymentsState<R, G>>,
    principal: Principal,
    Json(request): Json<PaymentFailureRequest>,
) -> PaymentsResult<Json<PaymentStatusResponse>>
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    state
        .record_failure
        .execute(
            principal.user_ref,
            RecordFailureInput {
                provider_order_id: request.order_id,
                provider_payment_id: request.payment_id,
                reason: request.reason,
            },
        )
        .await?;
    Ok(Json(PaymentStatusResponse::failed()))
}

pub async fn cancel_order<R, G>(
    State(state): State<PaymentsState<R, G>>,
    principal: Principal,
    Json(request): Json<CancelOrderRequest>,
) -> PaymentsResult<Json<PaymentStatusResponse>>
where
    R: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    state
        .cancel_order
        .execute(principal.user_ref, &request.order_id)
        .await?;
    Ok(Json(PaymentStatusResponse::cancelled()))
}
