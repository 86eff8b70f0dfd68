use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of `application_contacts`: a contact attached to an application,
/// with an optional role such as "Referral" or "Recruiter".
#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex)]
pub struct ApplicationContact {
    #[sqlx(try_from = "String")]
    pub id: ID,
    #[sqlx(try_from = "String")]
    pub application_id: ID,
    #[sqlx(try_from = "String")]
    pub contact_id: ID,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}
