use async_graphql::MaybeUndefined;
use sqlx::SqlitePool;
use tracing::info;

use crate::companies::inputs::{CompanyFilterInput, CreateCompanyInput, UpdateCompanyInput};
use crate::db;
use crate::errors::AppError;
use crate::models::Company;
use crate::sql::{fold, Select, UpdateStatement};

pub async fn list_companies(
    pool: &SqlitePool,
    filter: CompanyFilterInput,
) -> Result<Vec<Company>, AppError> {
    let mut select = Select::from("companies");
    select
        .contains("name", filter.name.as_deref())
        .eq("size", filter.size)
        .eq("type", filter.company_type);
    select.fetch_all(pool).await
}

pub async fn find_company(pool: &SqlitePool, id: &str) -> Result<Option<Company>, AppError> {
    Ok(
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_company(pool: &SqlitePool, id: &str) -> Result<Company, AppError> {
    find_company(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))
}

pub async fn create_company(
    pool: &SqlitePool,
    input: CreateCompanyInput,
) -> Result<Company, AppError> {
    let name = required_name(&input.name)?;
    let now = db::now();

    let company = sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies
            (id, name, name_folded, size, type, comments, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(db::new_id())
    .bind(name)
    .bind(fold(name))
    .bind(input.size)
    .bind(input.company_type)
    .bind(input.comments)
    .bind(&now)
    .bind(&now)
    .fetch_one(pool)
    .await
    .map_err(|e| duplicate_name(e, name))?;

    info!("Created company {} ({})", company.name, company.id.as_str());
    Ok(company)
}

pub async fn update_company(
    pool: &SqlitePool,
    id: &str,
    input: UpdateCompanyInput,
) -> Result<Company, AppError> {
    let UpdateCompanyInput {
        name,
        size,
        company_type,
        comments,
    } = input;

    let name = match name {
        MaybeUndefined::Value(n) => MaybeUndefined::Value(required_name(&n)?.to_owned()),
        other => other,
    };
    let new_name = name.value().cloned();

    let mut update = UpdateStatement::new("companies", db::now());
    update
        .set_required_text("name", "name", name)?
        .set_nullable("size", size)
        .set_nullable("type", company_type)
        .set_nullable("comments", comments);
    update
        .execute(pool, "Company", id)
        .await
        .map_err(|e| match (e, new_name.as_deref()) {
            (AppError::Conflict(_), Some(name)) => name_taken(name),
            (e, _) => e,
        })?;

    info!("Updated company {id}");
    get_company(pool, id).await
}

/// Deletes a company that has no contacts or applications, returning its prior state.
pub async fn delete_company(pool: &SqlitePool, id: &str) -> Result<Company, AppError> {
    let company = get_company(pool, id).await?;

    let (contacts, applications): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM contacts WHERE company_id = ?),
            (SELECT COUNT(*) FROM applications WHERE company_id = ?)
        "#,
    )
    .bind(id)
    .bind(id)
    .fetch_one(pool)
    .await?;

    if contacts > 0 || applications > 0 {
        return Err(AppError::Constraint(format!(
            "Company {} still has {contacts} contact(s) and {applications} application(s); \
             delete or move them first",
            company.name
        )));
    }

    sqlx::query("DELETE FROM companies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted company {} ({id})", company.name);
    Ok(company)
}

/// Names are stored trimmed; a blank name is rejected.
fn required_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }
    Ok(trimmed)
}

fn duplicate_name(err: sqlx::Error, name: &str) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => name_taken(name),
        other => other,
    }
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("A company named '{name}' already exists"))
}

#[cfg(test)]
pub(crate) async fn insert_company(pool: &SqlitePool, name: &str) -> Company {
    create_company(
        pool,
        CreateCompanyInput {
            name: name.to_string(),
            size: None,
            company_type: None,
            comments: None,
        },
    )
    .await
    .expect("insert company")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::enums::{CompanySize, CompanyType};

    #[tokio::test]
    async fn test_list_without_filter_is_newest_first() {
        let pool = test_pool().await;
        for name in ["Alpha", "Beta", "Gamma"] {
            insert_company(&pool, name).await;
        }

        let names: Vec<String> = list_companies(&pool, CompanyFilterInput::default())
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Gamma", "Beta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let pool = test_pool().await;
        insert_company(&pool, "TechCorp").await;

        let err = create_company(
            &pool,
            CreateCompanyInput {
                name: "TechCorp".into(),
                size: Some(CompanySize::Large),
                company_type: None,
                comments: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("TechCorp")));
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive_substring() {
        let pool = test_pool().await;
        insert_company(&pool, "MegaCorp").await;
        insert_company(&pool, "TechCorp").await;
        insert_company(&pool, "Initech").await;

        let found = list_companies(
            &pool,
            CompanyFilterInput {
                name: Some("TECH".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Initech", "TechCorp"]);
    }

    #[tokio::test]
    async fn test_name_filter_folds_non_ascii_case() {
        let pool = test_pool().await;
        insert_company(&pool, "Société Générale").await;
        insert_company(&pool, "ÜBER GmbH").await;
        insert_company(&pool, "Acme").await;

        for (needle, expected) in [("SOCIÉTÉ", "Société Générale"), ("über", "ÜBER GmbH")] {
            let found = list_companies(
                &pool,
                CompanyFilterInput {
                    name: Some(needle.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
            let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, [expected], "filter {needle}");
        }
    }

    #[tokio::test]
    async fn test_renamed_company_is_found_by_new_name() {
        let pool = test_pool().await;
        let created = insert_company(&pool, "Acme").await;
        update_company(
            &pool,
            created.id.as_str(),
            UpdateCompanyInput {
                name: MaybeUndefined::Value("Ærø Shipping".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let by = |needle: &str| CompanyFilterInput {
            name: Some(needle.into()),
            ..Default::default()
        };
        assert!(list_companies(&pool, by("acme")).await.unwrap().is_empty());
        let found = list_companies(&pool, by("ÆRØ")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ærø Shipping");
    }

    #[tokio::test]
    async fn test_name_is_trimmed_and_blank_rejected() {
        let pool = test_pool().await;
        let created = insert_company(&pool, "  TechCorp  ").await;
        assert_eq!(created.name, "TechCorp");

        let err = create_company(
            &pool,
            CreateCompanyInput {
                name: "   ".into(),
                size: None,
                company_type: None,
                comments: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = update_company(
            &pool,
            created.id.as_str(),
            UpdateCompanyInput {
                name: MaybeUndefined::Value(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_clears_and_keeps_fields() {
        let pool = test_pool().await;
        let created = create_company(
            &pool,
            CreateCompanyInput {
                name: "TechCorp".into(),
                size: Some(CompanySize::Medium),
                company_type: Some(CompanyType::Startup),
                comments: Some("Great culture".into()),
            },
        )
        .await
        .unwrap();

        let updated = update_company(
            &pool,
            created.id.as_str(),
            UpdateCompanyInput {
                comments: MaybeUndefined::Null,
                size: MaybeUndefined::Value(CompanySize::Large),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "TechCorp");
        assert_eq!(updated.company_type, Some(CompanyType::Startup));
        assert_eq!(updated.size, Some(CompanySize::Large));
        assert_eq!(updated.comments, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let err = update_company(&pool, "missing", UpdateCompanyInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_prior_state() {
        let pool = test_pool().await;
        let created = insert_company(&pool, "Shortlived").await;

        let deleted = delete_company(&pool, created.id.as_str()).await.unwrap();
        assert_eq!(deleted.name, "Shortlived");
        assert!(find_company(&pool, created.id.as_str()).await.unwrap().is_none());
    }
}
