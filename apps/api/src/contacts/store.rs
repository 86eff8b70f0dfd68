use async_graphql::MaybeUndefined;
use sqlx::SqlitePool;
use tracing::info;

use crate::companies::store::get_company;
use crate::contacts::inputs::{ContactFilterInput, CreateContactInput, UpdateContactInput};
use crate::db;
use crate::errors::AppError;
use crate::models::Contact;
use crate::sql::{fold, Select, UpdateStatement};

pub async fn list_contacts(
    pool: &SqlitePool,
    filter: ContactFilterInput,
) -> Result<Vec<Contact>, AppError> {
    let mut select = Select::from("contacts");
    select
        .contains("name", filter.name.as_deref())
        .contains("email", filter.email.as_deref())
        .contains("title", filter.title.as_deref())
        .eq("seniority", filter.seniority)
        .eq("contact_status", filter.contact_status)
        .eq("company_id", filter.company_id.map(|id| id.0));
    select.fetch_all(pool).await
}

pub async fn find_contact(pool: &SqlitePool, id: &str) -> Result<Option<Contact>, AppError> {
    Ok(
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_contact(pool: &SqlitePool, id: &str) -> Result<Contact, AppError> {
    find_contact(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))
}

/// Contacts attached to an application, one per link, most recently linked first.
pub async fn contacts_for_application(
    pool: &SqlitePool,
    application_id: &str,
) -> Result<Vec<Contact>, AppError> {
    Ok(sqlx::query_as::<_, Contact>(
        r#"
        SELECT c.*
        FROM application_contacts ac
        JOIN contacts c ON c.id = ac.contact_id
        WHERE ac.application_id = ?
        ORDER BY ac.created_at DESC, ac.rowid DESC
        "#,
    )
    .bind(application_id)
    .fetch_all(pool)
    .await?)
}

pub async fn create_contact(
    pool: &SqlitePool,
    input: CreateContactInput,
) -> Result<Contact, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }
    let company = get_company(pool, input.company_id.as_str()).await?;
    let now = db::now();
    let email_folded = input.email.as_deref().map(fold);
    let title_folded = input.title.as_deref().map(fold);

    let contact = sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts
            (id, name, name_folded, email, email_folded, phone, title, title_folded,
             linkedin_profile, notes, referred_by, seniority, contact_status, company_id,
             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(db::new_id())
    .bind(name)
    .bind(fold(name))
    .bind(input.email)
    .bind(email_folded)
    .bind(input.phone)
    .bind(input.title)
    .bind(title_folded)
    .bind(input.linkedin_profile)
    .bind(input.notes)
    .bind(input.referred_by)
    .bind(input.seniority)
    .bind(input.contact_status.unwrap_or_default())
    .bind(company.id.as_str())
    .bind(&now)
    .bind(&now)
    .fetch_one(pool)
    .await?;

    info!(
        "Created contact {} at {} ({})",
        contact.name,
        company.name,
        contact.id.as_str()
    );
    Ok(contact)
}

pub async fn update_contact(
    pool: &SqlitePool,
    id: &str,
    input: UpdateContactInput,
) -> Result<Contact, AppError> {
    let company_id = input.company_id.map_value(|id| id.0);
    if let Some(company_id) = company_id.value() {
        get_company(pool, company_id).await?;
    }

    let mut update = UpdateStatement::new("contacts", db::now());
    update
        .set_required("company_id", "companyId", company_id)?
        .set_required_text("name", "name", non_blank(input.name)?)?
        .set_nullable_text("email", input.email)
        .set_nullable("phone", input.phone)
        .set_nullable_text("title", input.title)
        .set_nullable("linkedin_profile", input.linkedin_profile)
        .set_nullable("notes", input.notes)
        .set_nullable("referred_by", input.referred_by)
        .set_nullable("seniority", input.seniority);
    update.set_required("contact_status", "contactStatus", input.contact_status)?;
    update.execute(pool, "Contact", id).await?;

    info!("Updated contact {id}");
    get_contact(pool, id).await
}

/// Deletes a contact and, by cascade, its application links. Returns the prior state.
pub async fn delete_contact(pool: &SqlitePool, id: &str) -> Result<Contact, AppError> {
    let contact = get_contact(pool, id).await?;

    sqlx::query("DELETE FROM contacts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted contact {} ({id})", contact.name);
    Ok(contact)
}

/// Names are stored trimmed; a blank name is rejected.
fn non_blank(name: MaybeUndefined<String>) -> Result<MaybeUndefined<String>, AppError> {
    match name {
        MaybeUndefined::Value(n) if n.trim().is_empty() => {
            Err(AppError::Validation("name must not be blank".to_string()))
        }
        MaybeUndefined::Value(n) => Ok(MaybeUndefined::Value(n.trim().to_string())),
        other => Ok(other),
    }
}

#[cfg(test)]
pub(crate) fn contact_input(company_id: &str, name: &str) -> CreateContactInput {
    CreateContactInput {
        company_id: company_id.into(),
        name: name.to_string(),
        email: None,
        phone: None,
        title: None,
        linkedin_profile: None,
        notes: None,
        referred_by: None,
        seniority: None,
        contact_status: None,
    }
}

#[cfg(test)]
pub(crate) async fn insert_contact(pool: &SqlitePool, company_id: &str, name: &str) -> Contact {
    create_contact(pool, contact_input(company_id, name))
        .await
        .expect("insert contact")
}
