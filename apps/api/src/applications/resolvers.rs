use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};
use sqlx::SqlitePool;

use crate::applications::inputs::{
    ApplicationFilterInput, CreateApplicationInput, UpdateApplicationInput,
};
use crate::applications::store;
use crate::companies::store::get_company;
use crate::contacts::store::contacts_for_application;
use crate::links::store::links_for_application;
use crate::models::{Application, ApplicationContact, Company, Contact};

#[derive(Default)]
pub struct ApplicationQuery;

#[Object]
impl ApplicationQuery {
    /// Applications matching the filter, newest first.
    async fn applications(
        &self,
        ctx: &Context<'_>,
        filter: Option<ApplicationFilterInput>,
    ) -> Result<Vec<Application>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::list_applications(pool, filter.unwrap_or_default())
            .await
            .map_err(|e| e.extend())
    }

    async fn application(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Application>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::find_application(pool, &id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct ApplicationMutation;

#[Object]
impl ApplicationMutation {
    async fn create_application(
        &self,
        ctx: &Context<'_>,
        input: CreateApplicationInput,
    ) -> Result<Application> {
        let pool = ctx.data::<SqlitePool>()?;
        store::create_application(pool, input)
            .await
            .map_err(|e| e.extend())
    }

    /// Only fields present in `input` are written; an explicit null clears a field.
    async fn update_application(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateApplicationInput,
    ) -> Result<Application> {
        let pool = ctx.data::<SqlitePool>()?;
        store::update_application(pool, &id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_application(&self, ctx: &Context<'_>, id: ID) -> Result<Application> {
        let pool = ctx.data::<SqlitePool>()?;
        store::delete_application(pool, &id)
            .await
            .map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl Application {
    async fn company(&self, ctx: &Context<'_>) -> Result<Company> {
        let pool = ctx.data::<SqlitePool>()?;
        get_company(pool, &self.company_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn contacts(&self, ctx: &Context<'_>) -> Result<Vec<Contact>> {
        let pool = ctx.data::<SqlitePool>()?;
        contacts_for_application(pool, &self.id)
            .await
            .map_err(|e| e.extend())
    }

    async fn contact_links(&self, ctx: &Context<'_>) -> Result<Vec<ApplicationContact>> {
        let pool = ctx.data::<SqlitePool>()?;
        links_for_application(pool, &self.id)
            .await
            .map_err(|e| e.extend())
    }
}
