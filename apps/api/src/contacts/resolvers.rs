use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};
use sqlx::SqlitePool;

use crate::applications::store::applications_for_contact;
use crate::companies::store::get_company;
use crate::contacts::inputs::{ContactFilterInput, CreateContactInput, UpdateContactInput};
use crate::contacts::store;
use crate::links::store::links_for_contact;
use crate::models::{Application, ApplicationContact, Company, Contact};

#[derive(Default)]
pub struct ContactQuery;

#[Object]
impl ContactQuery {
    /// Contacts matching the filter, newest first.
    async fn contacts(
        &self,
        ctx: &Context<'_>,
        filter: Option<ContactFilterInput>,
    ) -> Result<Vec<Contact>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::list_contacts(pool, filter.unwrap_or_default())
            .await
            .map_err(|e| e.extend())
    }

    async fn contact(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Contact>> {
        let pool = ctx.data::<SqlitePool>()?;
        store::find_contact(pool, &id).await.map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct ContactMutation;

#[Object]
impl ContactMutation {
    async fn create_contact(&self, ctx: &Context<'_>, input: CreateContactInput) -> Result<Contact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::create_contact(pool, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_contact(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateContactInput,
    ) -> Result<Contact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::update_contact(pool, &id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_contact(&self, ctx: &Context<'_>, id: ID) -> Result<Contact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::delete_contact(pool, &id).await.map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl Contact {
    async fn company(&self, ctx: &Context<'_>) -> Result<Company> {
        let pool = ctx.data::<SqlitePool>()?;
        get_company(pool, &self.company_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn applications(&self, ctx: &Context<'_>) -> Result<Vec<Application>> {
        let pool = ctx.data::<SqlitePool>()?;
        applications_for_contact(pool, &self.id)
            .await
            .map_err(|e| e.extend())
    }

    /// Links to applications, most recent first.
    async fn application_links(&self, ctx: &Context<'_>) -> Result<Vec<ApplicationContact>> {
        let pool = ctx.data::<SqlitePool>()?;
        links_for_contact(pool, &self.id)
            .await
            .map_err(|e| e.extend())
    }
}
