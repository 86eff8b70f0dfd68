use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};
use sqlx::SqlitePool;

use crate::applications::inputs::ApplicationFilterInput;
use crate::applications::store::list_applications;
use crate::companies::inputs::{CompanyFilterInput, CreateCompanyInput, UpdateCompanyInput};
use crate::companies::store;
use crate::contacts::inputs::ContactFilterInput;
use crate::contacts::store::list_contacts;
use crate::models::{Application, Company, Contact};

#[derive(Default)]
pub struct CompanyQuery;

#[Object]
impl CompanyQuery {
    /// Companies matching the filter, newest first.
    async fn companies(
        &self,
        ctx: &Context<'_>,
        filter: Option<CompanyFilterInput>,
    ) -> Result<Vec<Company>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::list_companies(pool, filter.unwrap_or_default())
            .await
            .map_err(|e| e.extend())
    }

    async fn company(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Company>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::find_company(pool, &id).await.map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct CompanyMutation;

#[Object]
impl CompanyMutation {
    async fn create_company(&self, ctx: &Context<'_>, input: CreateCompanyInput) -> Result<Company> {
        let pool = ctx.data::<SqlitePool>()?;
        store::create_company(pool, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_company(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateCompanyInput,
    ) -> Result<Company> {
        let pool = ctx.data::<SqlitePool>()?;
        store::update_company(pool, &id, input)
            .await
            .map_err(|e| e.extend())
    }

    /// Fails while the company still has contacts or applications.
    async fn delete_company(&self, ctx: &Context<'_>, id: ID) -> Result<Company> {
        let pool = ctx.data::<SqlitePool>()?;
        store::delete_company(pool, &id).await.map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl Company {
    async fn contacts(&self, ctx: &Context<'_>) -> Result<Vec<Contact>> {
        let pool = ctx.data::<SqlitePool>()?;
        let filter = ContactFilterInput {
            company_id: Some(self.id.clone()),
            ..Default::default()
        };
        list_contacts(pool, filter).await.map_err(|e| e.extend())
    }

    async fn applications(&self, ctx: &Context<'_>) -> Result<Vec<Application>> {
        let pool = ctx.data::<SqlitePool>()?;
        let filter = ApplicationFilterInput {
            company_id: Some(self.id.clone()),
            ..Default::default()
        };
        list_applications(pool, filter).await.map_err(|e| e.extend())
    }
}
