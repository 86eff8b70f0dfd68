use sqlx::SqlitePool;
use tracing::info;

use crate::applications::store::get_application;
use crate::contacts::store::get_contact;
use crate::db;
use crate::errors::AppError;
use crate::models::ApplicationContact;

/// Attaches a contact to an application. The same pair may be linked more than
/// once; each call creates a distinct link.
pub async fn link_contact(
    pool: &SqlitePool,
    application_id: &str,
    contact_id: &str,
    role: Option<String>,
) -> Result<ApplicationContact, AppError> {
    get_application(pool, application_id).await?;
    get_contact(pool, contact_id).await?;

    let link = sqlx::query_as::<_, ApplicationContact>(
        r#"
        INSERT INTO application_contacts (id, application_id, contact_id, role, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(db::new_id())
    .bind(application_id)
    .bind(contact_id)
    .bind(role)
    .bind(db::now())
    .fetch_one(pool)
    .await?;

    info!(
        "Linked contact {contact_id} to application {application_id} ({})",
        link.id.as_str()
    );
    Ok(link)
}

pub async fn get_link(pool: &SqlitePool, id: &str) -> Result<ApplicationContact, AppError> {
    sqlx::query_as::<_, ApplicationContact>("SELECT * FROM application_contacts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("ApplicationContact", id))
}

/// Removes a link by its own id, returning the deleted link.
pub async fn unlink(pool: &SqlitePool, id: &str) -> Result<ApplicationContact, AppError> {
    let link = get_link(pool, id).await?;

    sqlx::query("DELETE FROM application_contacts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Removed application contact link {id}");
    Ok(link)
}

/// Sets the role of a link; `None` clears it.
pub async fn update_role(
    pool: &SqlitePool,
    id: &str,
    role: Option<String>,
) -> Result<ApplicationContact, AppError> {
    let result = sqlx::query("UPDATE application_contacts SET role = ? WHERE id = ?")
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("ApplicationContact", id));
    }
    get_link(pool, id).await
}

pub async fn links_for_application(
    pool: &SqlitePool,
    application_id: &str,
) -> Result<Vec<ApplicationContact>, AppError> {
    Ok(sqlx::query_as::<_, ApplicationContact>(
        "SELECT * FROM application_contacts WHERE application_id = ? \
         ORDER BY created_at DESC, rowid DESC",
    )
    .bind(application_id)
    .fetch_all(pool)
    .await?)
}

pub async fn links_for_contact(
    pool: &SqlitePool,
    contact_id: &str,
) -> Result<Vec<ApplicationContact>, AppError> {
    Ok(sqlx::query_as::<_, ApplicationContact>(
        "SELECT * FROM application_contacts WHERE contact_id = ? \
         ORDER BY created_at DESC, rowid DESC",
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?)
}
