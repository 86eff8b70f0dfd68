use async_graphql::{InputObject, MaybeUndefined};

use crate::models::enums::{CompanySize, CompanyType};

#[derive(Debug, Default, InputObject)]
pub struct CompanyFilterInput {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    pub size: Option<CompanySize>,
    #[graphql(name = "type")]
    pub company_type: Option<CompanyType>,
}

#[derive(Debug, InputObject)]
pub struct CreateCompanyInput {
    pub name: String,
    pub size: Option<CompanySize>,
    #[graphql(name = "type")]
    pub company_type: Option<CompanyType>,
    pub comments: Option<String>,
}

#[derive(Debug, Default, InputObject)]
pub struct UpdateCompanyInput {
    pub name: MaybeUndefined<String>,
    pub size: MaybeUndefined<CompanySize>,
    #[graphql(name = "type")]
    pub company_type: MaybeUndefined<CompanyType>,
    pub comments: MaybeUndefined<String>,
}
