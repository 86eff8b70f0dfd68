use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::enums::{CompanySize, CompanyType};

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct Company {
    #[sqlx(try_from = "String")]
    pub id: ID,
    pub name: String,
    pub size: Option<CompanySize>,
    #[sqlx(rename = "type")]
    #[graphql(name = "type")]
    pub company_type: Option<CompanyType>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
