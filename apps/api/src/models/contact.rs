use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::enums::{ContactStatus, Seniority};

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct Contact {
    #[sqlx(try_from = "String")]
    pub id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub linkedin_profile: Option<String>,
    pub notes: Option<String>,
    pub referred_by: Option<String>,
    pub seniority: Option<Seniority>,
    pub contact_status: ContactStatus,
    #[sqlx(try_from = "String")]
    pub company_id: ID,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
