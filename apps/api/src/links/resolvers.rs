use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result, ID};
use sqlx::SqlitePool;

use crate::applications::store::get_application;
use crate::contacts::store::get_contact;
use crate::links::store;
use crate::models::{Application, ApplicationContact, Contact};

#[derive(Default)]
pub struct LinkMutation;

#[Object]
impl LinkMutation {
    /// Creates a new link even if the pair is already linked.
    async fn link_contact_to_application(
        &self,
        ctx: &Context<'_>,
        application_id: ID,
        contact_id: ID,
        role: Option<String>,
    ) -> Result<ApplicationContact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::link_contact(pool, &application_id, &contact_id, role)
            .await
            .map_err(|e| e.extend())
    }

    async fn unlink_contact_from_application(
        &self,
        ctx: &Context<'_>,
        application_contact_id: ID,
    ) -> Result<ApplicationContact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::unlink(pool, &application_contact_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_application_contact(
        &self,
        ctx: &Context<'_>,
        id: ID,
        role: Option<String>,
    ) -> Result<ApplicationContact> {
        let pool = ctx.data::<SqlitePool>()?;
        store::update_role(pool, &id, role)
            .await
            .map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl ApplicationContact {
    async fn application(&self, ctx: &Context<'_>) -> Result<Application> {
        let pool = ctx.data::<SqlitePool>()?;
        get_application(pool, &self.application_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn contact(&self, ctx: &Context<'_>) -> Result<Contact> {
        let pool = ctx.data::<SqlitePool>()?;
        get_contact(pool, &self.contact_id)
            .await
            .map_err(|e| e.extend())
    }
}
