//! Wire DTOs for the colleges endpoints

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationRef, CollegeRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Application, Category, College, Page, SavedCollege};

#[derive(Debug, Deserialize)]
pub struct CollegeListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub city: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeResponse {
    pub id: CollegeRef,
    pub name: String,
    pub city: String,
    pub state: String,
    pub category: String,
    pub description: Option<String>,
    pub application_fee: Decimal,
    pub ranking: Option<i32>,
    pub image_url: Option<String>,
    pub established_year: Option<i32>,
    pub affiliation: Option<String>,
}

impl From<College> for CollegeResponse {
    fn from(college: College) -> Self {
        Self {
            id: college.ref_id,
            name: college.name,
            city: college.city,
            state: college.state,
            category: college.category,
            description: college.description,
            application_fee: college.application_fee,
            ranking: college.ranking,
            image_url: college.image_url,
            established_year: college.established_year,
            affiliation: college.affiliation,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeListResponse {
    pub colleges: Vec<CollegeResponse>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

impl From<Page<College>> for CollegeListResponse {
    fn from(page: Page<College>) -> Self {
        let total_pages = page.total_pages();
        Self {
            colleges: page.items.into_iter().map(CollegeResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCollegeResponse {
    #[serde(flatten)]
    pub college: CollegeResponse,
    pub saved_at: DateTime<Utc>,
}

impl From<SavedCollege> for SavedCollegeResponse {
    fn from(saved: SavedCollege) -> Self {
        Self {
            college: CollegeResponse::from(saved.college),
            saved_at: saved.saved_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: ApplicationRef,
    pub college_id: CollegeRef,
    pub college_name: String,
    pub college_city: String,
    pub status: String,
    pub amount: Decimal,
    pub applied_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.ref_id,
            college_id: application.college_ref,
            college_name: application.college_name,
            college_city: application.college_city,
            status: application.status.as_str().to_string(),
            amount: application.amount,
            applied_at: application.applied_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplicationStatus;

    fn college() -> College {
        College {
            ref_id: CollegeRef::new(),
            name: "IIT Madras".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            category: "Engineering".to_string(),
            description: None,
            application_fee: Decimal::new(150000, 2),
            ranking: Some(1),
            image_url: None,
            established_year: Some(1959),
            affiliation: None,
        }
    }

    #[test]
    fn test_college_response_shape() {
        let json = serde_json::to_value(CollegeResponse::from(college())).unwrap();
        assert_eq!(json["name"], "IIT Madras");
        assert_eq!(json["applicationFee"], "1500.00");
        assert_eq!(json["establishedYear"], 1959);
    }

    #[test]
    fn test_application_response_shape() {
        let application = Application {
            ref_id: ApplicationRef::new(),
            college_ref: CollegeRef::new(),
            college_name: "IIT Madras".to_string(),
            college_city: "Chennai".to_string(),
            status: ApplicationStatus::ReadyToPay,
            amount: Decimal::new(150000, 2),
            applied_at: Utc::now(),
        };
        let json = serde_json::to_value(ApplicationResponse::from(application)).unwrap();
        assert_eq!(json["status"], "ready_to_pay");
        assert_eq!(json["collegeName"], "IIT Madras");
    }

    #[test]
    fn test_list_response_pagination() {
        let page = Page {
            items: vec![college()],
            total: 41,
            page: 2,
            limit: 20,
        };
        let json = serde_json::to_value(CollegeListResponse::from(page)).unwrap();
        assert_eq!(json["total"], 41);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["colleges"].as_array().unwrap().len(), 1);
    }
}
