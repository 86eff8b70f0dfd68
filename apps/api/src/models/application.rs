use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::enums::{ApplicationStatus, Preference, Priority, RemoteType};

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct Application {
    #[sqlx(try_from = "String")]
    pub id: ID,
    pub job_title: String,
    pub linkedin_url: Option<String>,
    pub company_job_url: Option<String>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub comments: Option<String>,
    pub priority: Priority,
    pub status: ApplicationStatus,
    pub remote_type: Option<RemoteType>,
    pub preference: Preference,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub posted_date: Option<DateTime<Utc>>,
    pub posting_end_date: Option<DateTime<Utc>>,
    pub applied_date: Option<DateTime<Utc>>,
    pub offer_deadline: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    pub company_id: ID,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
