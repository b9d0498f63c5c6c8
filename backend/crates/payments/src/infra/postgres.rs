//! Postgres persistence for orders and payments
//!
//! `mark_paid` is the reconciliation point and runs in one transaction:
//! the order, the payment row and the application status move together
//! or not at all.

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationRef, OrderId, UserRef};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entity::{Order, OrderStatus, Payment};
use crate::domain::repository::{BillableApplication, OrderRepository};
use crate::error::{PaymentsError, PaymentsResult};

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_ref: Uuid,
    application_ref: Uuid,
    provider_order_id: String,
    amount_paise: i64,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> PaymentsResult<Order> {
        Ok(Order {
            id: OrderId::from_uuid(self.id),
            user_ref: UserRef::from_uuid(self.user_ref),
            application_ref: ApplicationRef::from_uuid(self.application_ref),
            provider_order_id: self.provider_order_id,
            amount_paise: self.amount_paise,
            currency: self.currency,
            status: OrderStatus::parse(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

async fn insert_payment<'e, E>(executor: E, payment: &Payment) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO payments \
         (id, order_id, provider_payment_id, amount_paise, status, method, failure_reason, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(payment.id.as_uuid())
    .bind(payment.order_id.as_uuid())
    .bind(&payment.provider_payment_id)
    .bind(payment.amount_paise)
    .bind(payment.status.as_str())
    .bind(&payment.method)
    .bind(&payment.failure_reason)
    .bind(payment.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

impl OrderRepository for PgOrderRepository {
    async fn find_billable_application(
        &self,
        user_ref: UserRef,
        application_ref: ApplicationRef,
    ) -> PaymentsResult<Option<BillableApplication>> {
        let row = sqlx::query(
            "SELECT a.ref_id, a.amount, (a.status = 'paid') AS paid \
             FROM applications a \
             JOIN users u ON u.id = a.user_id \
             WHERE u.ref_id = $1 AND a.ref_id = $2",
        )
        .bind(user_ref.as_uuid())
        .bind(application_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let ref_id: Uuid = row.get("ref_id");
            let amount: Decimal = row.get("amount");
            BillableApplication {
                ref_id: ApplicationRef::from_uuid(ref_id),
                amount,
                paid: row.get("paid"),
            }
        }))
    }

    async fn create_order(&self, order: &Order) -> PaymentsResult<()> {
        let result = sqlx::query(
            "INSERT INTO orders \
             (id, user_id, application_id, provider_order_id, amount_paise, currency, status, created_at, updated_at) \
             SELECT $1, u.id, a.id, $2, $3, $4, $5, $6, $7 \
             FROM users u, applications a \
             WHERE u.ref_id = $8 AND a.ref_id = $9",
        )
        .bind(order.id.as_uuid())
        .bind(&order.provider_order_id)
        .bind(order.amount_paise)
        .bind(&order.currency)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.user_ref.as_uuid())
        .bind(order.application_ref.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PaymentsError::ApplicationNotFound);
        }
        Ok(())
    }

    async fn find_order_for_user(
        &self,
        provider_order_id: &str,
        user_ref: UserRef,
    ) -> PaymentsResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT o.id, u.ref_id AS user_ref, a.ref_id AS application_ref, \
                    o.provider_order_id, o.amount_paise, o.currency, o.status, \
                    o.created_at, o.updated_at \
             FROM orders o \
             JOIN users u ON u.id = o.user_id \
             JOIN applications a ON a.id = o.application_id \
             WHERE o.provider_order_id = $1 AND u.ref_id = $2",
        )
        .bind(provider_order_id)
        .bind(user_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn mark_paid(&self, order: &Order, payment: &Payment) -> PaymentsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(order.id.as_uuid())
            .bind(order.status.as_str())
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await?;

        insert_payment(&mut *tx, payment).await?;

        sqlx::query(
            "UPDATE applications SET status = 'paid', updated_at = NOW() \
             WHERE id = (SELECT application_id FROM orders WHERE id = $1)",
        )
        .bind(order.id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn mark_failed(&self, order: &Order, payment: Option<&Payment>) -> PaymentsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(order.id.as_uuid())
            .bind(order.status.as_str())
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await?;

        if let Some(payment) = payment {
            insert_payment(&mut *tx, payment).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_status(&self, order: &Order) -> PaymentsResult<()> {
        sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(order.id.as_uuid())
            .bind(order.status.as_str())
            .bind(order.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
