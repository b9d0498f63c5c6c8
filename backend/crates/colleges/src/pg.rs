//! Postgres implementation of the colleges repository
//!
//! Public refs (UUIDs) come in through the trait; internal bigserial
//! ids never leave this module. Bookmarks are soft-deleted so a
//! re-save restores the original row.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::{ApplicationRef, CollegeRef, UserRef};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::error::{CollegesError, CollegesResult};
use crate::model::{
    Application, ApplicationStatus, Category, College, CollegeFilter, Page, SavedCollege,
};
use crate::repository::CollegeRepository;

#[derive(Clone)]
pub struct PgCollegeRepository {
    pool: PgPool,
}

impl PgCollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CollegeRow {
    ref_id: Uuid,
    name: String,
    city: String,
    state: String,
    category: String,
    description: Option<String>,
    application_fee: Decimal,
    ranking: Option<i32>,
    image_url: Option<String>,
    established_year: Option<i32>,
    affiliation: Option<String>,
}

impl CollegeRow {
    fn into_college(self) -> College {
        College {
            ref_id: CollegeRef::from_uuid(self.ref_id),
            name: self.name,
            city: self.city,
            state: self.state,
            category: self.category,
            description: self.description,
            application_fee: self.application_fee,
            ranking: self.ranking,
            image_url: self.image_url,
            established_year: self.established_year,
            affiliation: self.affiliation,
        }
    }
}

const COLLEGE_COLUMNS: &str = "c.ref_id, c.name, c.city, c.state, t.name AS category, \
     c.description, c.application_fee, c.ranking, c.image_url, c.established_year, c.affiliation";

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &CollegeFilter) {
    if let Some(category) = &filter.category {
        builder.push(" AND t.name = ").push_bind(category.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (c.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.city ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(city) = &filter.city {
        builder.push(" AND c.city ILIKE ").push_bind(city.clone());
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    ref_id: Uuid,
    college_ref: Uuid,
    college_name: String,
    college_city: String,
    status: String,
    amount: Decimal,
    applied_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> CollegesResult<Application> {
        let status = ApplicationStatus::parse(&self.status)
            .map_err(|_| CollegesError::App(AppError::internal("corrupt application status")))?;
        Ok(Application {
            ref_id: ApplicationRef::from_uuid(self.ref_id),
            college_ref: CollegeRef::from_uuid(self.college_ref),
            college_name: self.college_name,
            college_city: self.college_city,
            status,
            amount: self.amount,
            applied_at: self.applied_at,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

impl CollegeRepository for PgCollegeRepository {
    async fn list(&self, filter: &CollegeFilter) -> CollegesResult<Page<College>> {
        let mut count_builder = QueryBuilder::new(
            "SELECT COUNT(*) FROM colleges c \
             JOIN college_types t ON t.id = c.college_type_id \
             WHERE c.is_active = TRUE",
        );
        push_filters(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {COLLEGE_COLUMNS} FROM colleges c \
             JOIN college_types t ON t.id = c.college_type_id \
             WHERE c.is_active = TRUE",
        ));
        push_filters(&mut builder, filter);
        builder
            .push(" ORDER BY c.ranking ASC NULLS LAST, c.name ASC LIMIT ")
            .push_bind(filter.limit as i64)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows: Vec<CollegeRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(Page {
            items: rows.into_iter().map(CollegeRow::into_college).collect(),
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn categories(&self) -> CollegesResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM college_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn find_by_ref(&self, college_ref: CollegeRef) -> CollegesResult<Option<College>> {
        let row = sqlx::query_as::<_, CollegeRow>(&format!(
            "SELECT {COLLEGE_COLUMNS} FROM colleges c \
             JOIN college_types t ON t.id = c.college_type_id \
             WHERE c.ref_id = $1 AND c.is_active = TRUE",
        ))
        .bind(college_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CollegeRow::into_college))
    }

    async fn toggle_saved(
        &self,
        user_ref: UserRef,
        college_ref: CollegeRef,
    ) -> CollegesResult<bool> {
        let existing = sqlx::query(
            "SELECT sc.id FROM saved_colleges sc \
             JOIN users u ON u.id = sc.user_id \
             JOIN colleges c ON c.id = sc.college_id \
             WHERE u.ref_id = $1 AND c.ref_id = $2",
        )
        .bind(user_ref.as_uuid())
        .bind(college_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing {
            let id: i64 = row.get("id");
            let saved: bool = sqlx::query_scalar(
                "UPDATE saved_colleges \
                 SET deleted_at = CASE WHEN deleted_at IS NULL THEN NOW() ELSE NULL END \
                 WHERE id = $1 \
                 RETURNING deleted_at IS NULL",
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        }

        let inserted = sqlx::query(
            "INSERT INTO saved_colleges (user_id, college_id) \
             SELECT u.id, c.id FROM users u, colleges c \
             WHERE u.ref_id = $1 AND c.ref_id = $2 AND c.is_active = TRUE",
        )
        .bind(user_ref.as_uuid())
        .bind(college_ref.as_uuid())
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(CollegesError::CollegeNotFound);
        }
        Ok(true)
    }

    async fn saved_for_user(&self, user_ref: UserRef) -> CollegesResult<Vec<SavedCollege>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLLEGE_COLUMNS}, sc.created_at AS saved_at \
             FROM saved_colleges sc \
             JOIN users u ON u.id = sc.user_id \
             JOIN colleges c ON c.id = sc.college_id \
             JOIN college_types t ON t.id = c.college_type_id \
             WHERE u.ref_id = $1 AND sc.deleted_at IS NULL AND c.is_active = TRUE \
             ORDER BY sc.created_at DESC",
        ))
        .bind(user_ref.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let saved_at: DateTime<Utc> = row.get("saved_at");
                let college = CollegeRow {
                    ref_id: row.get("ref_id"),
                    name: row.get("name"),
                    city: row.get("city"),
                    state: row.get("state"),
                    category: row.get("category"),
                    description: row.get("description"),
                    application_fee: row.get("application_fee"),
                    ranking: row.get("ranking"),
                    image_url: row.get("image_url"),
                    established_year: row.get("established_year"),
                    affiliation: row.get("affiliation"),
                }
                .into_college();
                Ok(SavedCollege { college, saved_at })
            })
            .collect()
    }

    async fn create_application(
        &self,
        user_ref: UserRef,
        college_ref: CollegeRef,
    ) -> CollegesResult<Application> {
        let college = self
            .find_by_ref(college_ref)
            .await?
            .ok_or(CollegesError::CollegeNotFound)?;

        let application_ref = ApplicationRef::new();
        let result = sqlx::query(
            "INSERT INTO applications (ref_id, user_id, college_id, status, amount) \
             SELECT $1, u.id, c.id, $2, $3 FROM users u, colleges c \
             WHERE u.ref_id = $4 AND c.ref_id = $5 \
             RETURNING created_at",
        )
        .bind(application_ref.as_uuid())
        .bind(ApplicationStatus::ReadyToPay.as_str())
        .bind(college.application_fee)
        .bind(user_ref.as_uuid())
        .bind(college_ref.as_uuid())
        .fetch_one(&self.pool)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(err) if is_unique_violation(&err) => {
                return Err(CollegesError::DuplicateApplication);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Application {
            ref_id: application_ref,
            college_ref,
            college_name: college.name,
            college_city: college.city,
            status: ApplicationStatus::ReadyToPay,
            amount: college.application_fee,
            applied_at: row.get("created_at"),
        })
    }

    async fn applications_for_user(&self, user_ref: UserRef) -> CollegesResult<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            "SELECT a.ref_id, c.ref_id AS college_ref, c.name AS college_name, \
                    c.city AS college_city, a.status, a.amount, a.created_at AS applied_at \
             FROM applications a \
             JOIN users u ON u.id = a.user_id \
             JOIN colleges c ON c.id = a.college_id \
             WHERE u.ref_id = $1 \
             ORDER BY a.created_at DESC",
        )
        .bind(user_ref.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ApplicationRow::into_application)
            .collect()
    }
}
