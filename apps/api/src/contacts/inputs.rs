use async_graphql::{InputObject, MaybeUndefined, ID};

use crate::models::enums::{ContactStatus, Seniority};

#[derive(Debug, Default, InputObject)]
pub struct ContactFilterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub seniority: Option<Seniority>,
    pub contact_status: Option<ContactStatus>,
    pub company_id: Option<ID>,
}

#[derive(Debug, InputObject)]
pub struct CreateContactInput {
    pub company_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub linkedin_profile: Option<String>,
    pub notes: Option<String>,
    pub referred_by: Option<String>,
    pub seniority: Option<Seniority>,
    /// Defaults to `TO_REACH_OUT`.
    pub contact_status: Option<ContactStatus>,
}

#[derive(Debug, Default, InputObject)]
pub struct UpdateContactInput {
    pub company_id: MaybeUndefined<ID>,
    pub name: MaybeUndefined<String>,
    pub email: MaybeUndefined<String>,
    pub phone: MaybeUndefined<String>,
    pub title: MaybeUndefined<String>,
    pub linkedin_profile: MaybeUndefined<String>,
    pub notes: MaybeUndefined<String>,
    pub referred_by: MaybeUndefined<String>,
    pub seniority: MaybeUndefined<Seniority>,
    pub contact_status: MaybeUndefined<ContactStatus>,
}
