use async_graphql::{InputObject, MaybeUndefined, ID};

use crate::models::enums::{ApplicationStatus, Preference, Priority, RemoteType};

#[derive(Debug, Default, InputObject)]
pub struct ApplicationFilterInput {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub company_id: Option<ID>,
    pub priority: Option<Priority>,
    pub status: Option<ApplicationStatus>,
    pub remote_type: Option<RemoteType>,
    pub preference: Option<Preference>,
    /// Matches postings whose `salaryMax` reaches at least this floor.
    pub min_salary: Option<i32>,
    /// Matches postings whose `salaryMin` does not exceed this ceiling.
    pub max_salary: Option<i32>,
}

/// Dates are ISO-8601 text: `YYYY-MM-DD` or a full RFC 3339 timestamp.
#[derive(Debug, InputObject)]
pub struct CreateApplicationInput {
    pub company_id: ID,
    pub job_title: String,
    pub linkedin_url: Option<String>,
    pub company_job_url: Option<String>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub comments: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<ApplicationStatus>,
    pub remote_type: Option<RemoteType>,
    pub preference: Option<Preference>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub posted_date: Option<String>,
    pub posting_end_date: Option<String>,
    pub applied_date: Option<String>,
    pub offer_deadline: Option<String>,
}

#[derive(Debug, Default, InputObject)]
pub struct UpdateApplicationInput {
    pub company_id: MaybeUndefined<ID>,
    pub job_title: MaybeUndefined<String>,
    pub linkedin_url: MaybeUndefined<String>,
    pub company_job_url: MaybeUndefined<String>,
    pub location: MaybeUndefined<String>,
    pub requirements: MaybeUndefined<String>,
    pub comments: MaybeUndefined<String>,
    pub priority: MaybeUndefined<Priority>,
    pub status: MaybeUndefined<ApplicationStatus>,
    pub remote_type: MaybeUndefined<RemoteType>,
    pub preference: MaybeUndefined<Preference>,
    pub salary_min: MaybeUndefined<i32>,
    pub salary_max: MaybeUndefined<i32>,
    pub posted_date: MaybeUndefined<String>,
    pub posting_end_date: MaybeUndefined<String>,
    pub applied_date: MaybeUndefined<String>,
    pub offer_deadline: MaybeUndefined<String>,
}
