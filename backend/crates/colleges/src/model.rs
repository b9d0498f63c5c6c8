//! Catalogue and application models

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationRef, CollegeRef};
use rust_decimal::Decimal;

use crate::error::{CollegesError, CollegesResult};

/// A college as listed in the catalogue.
#[derive(Debug, Clone)]
pub struct College {
    pub ref_id: CollegeRef,
    pub name: String,
    pub city: String,
    pub state: String,
    pub category: String,
    pub description: Option<String>,
    /// Application fee in rupees
    pub application_fee: Decimal,
    pub ranking: Option<i32>,
    pub image_url: Option<String>,
    pub established_year: Option<i32>,
    pub affiliation: Option<String>,
}

/// College category (reference data, e.g. "Engineering").
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Catalogue query filters, already validated.
#[derive(Debug, Clone, Default)]
pub struct CollegeFilter {
    pub category: Option<String>,
    /// Substring match on name and city
    pub search: Option<String>,
    pub city: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl CollegeFilter {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(
        category: Option<String>,
        search: Option<String>,
        city: Option<String>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> CollegesResult<Self> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(CollegesError::Validation("page starts at 1".to_string()));
        }
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(CollegesError::Validation(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }

        Ok(Self {
            category: non_empty(category),
            search: non_empty(search),
            city: non_empty(city),
            page,
            limit,
        })
    }

    pub fn offset(&self) -> i64 {
        // i64 arithmetic; page is client supplied and u32 would overflow
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// One page of catalogue results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + self.limit as i64 - 1) / self.limit as i64
        }
    }
}

/// Lifecycle of an admission application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    /// Created, waiting for the application fee
    ReadyToPay,
    /// Fee captured and reconciled
    Paid,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::ReadyToPay => "ready_to_pay",
            ApplicationStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> CollegesResult<Self> {
        match value {
            "ready_to_pay" => Ok(ApplicationStatus::ReadyToPay),
            "paid" => Ok(ApplicationStatus::Paid),
            other => Err(CollegesError::Validation(format!(
                "unknown application status: {other}"
            ))),
        }
    }
}

/// An admission application, joined with its college for display.
#[derive(Debug, Clone)]
pub struct Application {
    pub ref_id: ApplicationRef,
    pub college_ref: CollegeRef,
    pub college_name: String,
    pub college_city: String,
    pub status: ApplicationStatus,
    /// Fee owed, in rupees, frozen at application time
    pub amount: Decimal,
    pub applied_at: DateTime<Utc>,
}

/// A bookmarked college.
#[derive(Debug, Clone)]
pub struct SavedCollege {
    pub college: College,
    pub saved_at: DateTime<Utc>,
}
