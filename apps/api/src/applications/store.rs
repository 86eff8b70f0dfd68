use async_graphql::MaybeUndefined;
use sqlx::SqlitePool;
use tracing::info;

use crate::applications::inputs::{
    ApplicationFilterInput, CreateApplicationInput, UpdateApplicationInput,
};
use crate::companies::store::get_company;
use crate::db;
use crate::errors::AppError;
use crate::models::Application;
use crate::sql::{date_patch, fold, optional_date, Select, UpdateStatement};

/// Lists applications matching every supplied filter field.
///
/// Salary bounds test overlap with the posting's band: `minSalary` compares
/// against `salary_max` and `maxSalary` against `salary_min`. Postings with no
/// value for the compared bound never match a salary filter.
pub async fn list_applications(
    pool: &SqlitePool,
    filter: ApplicationFilterInput,
) -> Result<Vec<Application>, AppError> {
    let mut select = Select::from("applications");
    select
        .contains("job_title", filter.job_title.as_deref())
        .contains("location", filter.location.as_deref())
        .eq("company_id", filter.company_id.map(|id| id.0))
        .eq("priority", filter.priority)
        .eq("status", filter.status)
        .eq("remote_type", filter.remote_type)
        .eq("preference", filter.preference)
        .gte("salary_max", filter.min_salary)
        .lte("salary_min", filter.max_salary);
    select.fetch_all(pool).await
}

pub async fn find_application(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Application>, AppError> {
    Ok(
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_application(pool: &SqlitePool, id: &str) -> Result<Application, AppError> {
    find_application(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Application", id))
}

/// Applications a contact is linked to, one per link, most recently linked first.
pub async fn applications_for_contact(
    pool: &SqlitePool,
    contact_id: &str,
) -> Result<Vec<Application>, AppError> {
    Ok(sqlx::query_as::<_, Application>(
        r#"
        SELECT a.*
        FROM application_contacts ac
        JOIN applications a ON a.id = ac.application_id
        WHERE ac.contact_id = ?
        ORDER BY ac.created_at DESC, ac.rowid DESC
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?)
}

pub async fn create_application(
    pool: &SqlitePool,
    input: CreateApplicationInput,
) -> Result<Application, AppError> {
    let job_title = input.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("jobTitle must not be blank".to_string()));
    }
    let posted_date = optional_date("postedDate", input.posted_date)?;
    let posting_end_date = optional_date("postingEndDate", input.posting_end_date)?;
    let applied_date = optional_date("appliedDate", input.applied_date)?;
    let offer_deadline = optional_date("offerDeadline", input.offer_deadline)?;

    let company = get_company(pool, input.company_id.as_str()).await?;
    let now = db::now();
    let location_folded = input.location.as_deref().map(fold);

    let application = sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications
            (id, job_title, job_title_folded, linkedin_url, company_job_url,
             location, location_folded, requirements, comments,
             priority, status, remote_type, preference, salary_min, salary_max,
             posted_date, posting_end_date, applied_date, offer_deadline,
             company_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(db::new_id())
    .bind(job_title)
    .bind(fold(job_title))
    .bind(input.linkedin_url)
    .bind(input.company_job_url)
    .bind(input.location)
    .bind(location_folded)
    .bind(input.requirements)
    .bind(input.comments)
    .bind(input.priority.unwrap_or_default())
    .bind(input.status.unwrap_or_default())
    .bind(input.remote_type)
    .bind(input.preference.unwrap_or_default())
    .bind(input.salary_min)
    .bind(input.salary_max)
    .bind(posted_date)
    .bind(posting_end_date)
    .bind(applied_date)
    .bind(offer_deadline)
    .bind(company.id.as_str())
    .bind(&now)
    .bind(&now)
    .fetch_one(pool)
    .await?;

    info!(
        "Created application '{}' at {} ({})",
        application.job_title,
        company.name,
        application.id.as_str()
    );
    Ok(application)
}

pub async fn update_application(
    pool: &SqlitePool,
    id: &str,
    input: UpdateApplicationInput,
) -> Result<Application, AppError> {
    let company_id = input.company_id.map_value(|id| id.0);
    if let Some(company_id) = company_id.value() {
        get_company(pool, company_id).await?;
    }
    // Titles are stored trimmed; a blank title is rejected.
    let job_title = match input.job_title {
        MaybeUndefined::Value(t) if t.trim().is_empty() => {
            return Err(AppError::Validation("jobTitle must not be blank".to_string()));
        }
        MaybeUndefined::Value(t) => MaybeUndefined::Value(t.trim().to_string()),
        other => other,
    };

    let mut update = UpdateStatement::new("applications", db::now());
    update
        .set_required("company_id", "companyId", company_id)?
        .set_required_text("job_title", "jobTitle", job_title)?
        .set_required("priority", "priority", input.priority)?
        .set_required("status", "status", input.status)?
        .set_required("preference", "preference", input.preference)?
        .set_nullable("linkedin_url", input.linkedin_url)
        .set_nullable("company_job_url", input.company_job_url)
        .set_nullable_text("location", input.location)
        .set_nullable("requirements", input.requirements)
        .set_nullable("comments", input.comments)
        .set_nullable("remote_type", input.remote_type)
        .set_nullable("salary_min", input.salary_min)
        .set_nullable("salary_max", input.salary_max)
        .set_nullable("posted_date", date_patch("postedDate", input.posted_date)?)
        .set_nullable(
            "posting_end_date",
            date_patch("postingEndDate", input.posting_end_date)?,
        )
        .set_nullable("applied_date", date_patch("appliedDate", input.applied_date)?)
        .set_nullable(
            "offer_deadline",
            date_patch("offerDeadline", input.offer_deadline)?,
        );
    update.execute(pool, "Application", id).await?;

    info!("Updated application {id}");
    get_application(pool, id).await
}

/// Deletes an application and, by cascade, its contact links. Returns the prior state.
pub async fn delete_application(pool: &SqlitePool, id: &str) -> Result<Application, AppError> {
    let application = get_application(pool, id).await?;

    sqlx::query("DELETE FROM applications WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted application '{}' ({id})", application.job_title);
    Ok(application)
}

#[cfg(test)]
pub(crate) fn new_application(company_id: &str, job_title: &str) -> CreateApplicationInput {
    CreateApplicationInput {
        company_id: company_id.into(),
        job_title: job_title.to_string(),
        linkedin_url: None,
        company_job_url: None,
        location: None,
        requirements: None,
        comments: None,
        priority: None,
        status: None,
        remote_type: None,
        preference: None,
        salary_min: None,
        salary_max: None,
        posted_date: None,
        posting_end_date: None,
        applied_date: None,
        offer_deadline: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::store::insert_company;
    use crate::db::test_pool;
    use crate::models::enums::{ApplicationStatus, Preference, Priority, RemoteType};

    async fn with_salary(
        pool: &SqlitePool,
        company_id: &str,
        title: &str,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Application {
        create_application(
            pool,
            CreateApplicationInput {
                salary_min: min,
                salary_max: max,
                ..new_application(company_id, title)
            },
        )
        .await
        .unwrap()
    }

    fn titles(apps: &[Application]) -> Vec<&str> {
        apps.iter().map(|a| a.job_title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_applies_neutral_defaults() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;

        let app = create_application(&pool, new_application(company.id.as_str(), "SWE"))
            .await
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::NotStarted);
        assert_eq!(app.priority, Priority::Medium);
        assert_eq!(app.preference, Preference::Neutral);
        assert_eq!(app.remote_type, None);
    }

    #[tokio::test]
    async fn test_min_salary_matches_upper_band() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let cid = company.id.as_str();
        with_salary(&pool, cid, "low", Some(60_000), Some(90_000)).await;
        with_salary(&pool, cid, "high", Some(150_000), Some(200_000)).await;
        with_salary(&pool, cid, "edge", None, Some(120_000)).await;
        with_salary(&pool, cid, "unknown", Some(130_000), None).await;

        let found = list_applications(
            &pool,
            ApplicationFilterInput {
                min_salary: Some(120_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        // NULL salary_max never satisfies a salary floor.
        assert_eq!(titles(&found), ["edge", "high"]);
    }

    #[tokio::test]
    async fn test_salary_range_is_overlap() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let cid = company.id.as_str();
        with_salary(&pool, cid, "below", Some(50_000), Some(80_000)).await;
        with_salary(&pool, cid, "overlap", Some(90_000), Some(140_000)).await;
        with_salary(&pool, cid, "above", Some(200_000), Some(250_000)).await;

        let found = list_applications(
            &pool,
            ApplicationFilterInput {
                min_salary: Some(100_000),
                max_salary: Some(150_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(titles(&found), ["overlap"]);
    }

    #[tokio::test]
    async fn test_max_salary_excludes_unknown_lower_band() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let cid = company.id.as_str();
        with_salary(&pool, cid, "cheap", Some(70_000), Some(95_000)).await;
        with_salary(&pool, cid, "pricey", Some(180_000), Some(220_000)).await;
        with_salary(&pool, cid, "floorless", None, Some(90_000)).await;

        let found = list_applications(
            &pool,
            ApplicationFilterInput {
                max_salary: Some(100_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        // NULL salary_min never satisfies a salary ceiling.
        assert_eq!(titles(&found), ["cheap"]);
    }

    #[tokio::test]
    async fn test_title_and_location_filters_fold_non_ascii_case() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let cid = company.id.as_str();
        create_application(
            &pool,
            CreateApplicationInput {
                location: Some("München".into()),
                ..new_application(cid, "Développeur Rust")
            },
        )
        .await
        .unwrap();
        let moved = create_application(
            &pool,
            CreateApplicationInput {
                location: Some("Zürich".into()),
                ..new_application(cid, "Backend Engineer")
            },
        )
        .await
        .unwrap();
        update_application(
            &pool,
            moved.id.as_str(),
            UpdateApplicationInput {
                location: MaybeUndefined::Value("Malmö".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let by_title = list_applications(
            &pool,
            ApplicationFilterInput {
                job_title: Some("DÉVELOPPEUR".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(titles(&by_title), ["Développeur Rust"]);

        let by_location = |needle: &str| ApplicationFilterInput {
            location: Some(needle.into()),
            ..Default::default()
        };
        let found = list_applications(&pool, by_location("MÜNCHEN")).await.unwrap();
        assert_eq!(titles(&found), ["Développeur Rust"]);
        let found = list_applications(&pool, by_location("MALMÖ")).await.unwrap();
        assert_eq!(titles(&found), ["Backend Engineer"]);
        assert!(list_applications(&pool, by_location("zürich"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_job_title_is_trimmed_and_blank_rejected() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let app = create_application(&pool, new_application(company.id.as_str(), "  SWE "))
            .await
            .unwrap();
        assert_eq!(app.job_title, "SWE");

        let err = create_application(&pool, new_application(company.id.as_str(), " "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = update_application(
            &pool,
            app.id.as_str(),
            UpdateApplicationInput {
                job_title: MaybeUndefined::Value("\n".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_status_only_update_leaves_other_fields() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let before = create_application(
            &pool,
            CreateApplicationInput {
                location: Some("Remote".into()),
                remote_type: Some(RemoteType::Remote),
                salary_min: Some(150_000),
                salary_max: Some(200_000),
                posted_date: Some("2024-10-15".into()),
                comments: Some("Great opportunity".into()),
                ..new_application(company.id.as_str(), "Senior Software Engineer")
            },
        )
        .await
        .unwrap();

        let after = update_application(
            &pool,
            before.id.as_str(),
            UpdateApplicationInput {
                status: MaybeUndefined::Value(ApplicationStatus::PhoneScreen),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(after.status, ApplicationStatus::PhoneScreen);
        let mut expected = before.clone();
        expected.status = ApplicationStatus::PhoneScreen;
        expected.updated_at = after.updated_at;
        assert_eq!(format!("{after:?}"), format!("{expected:?}"));
    }

    #[tokio::test]
    async fn test_null_date_clears_absent_date_keeps() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let app = create_application(
            &pool,
            CreateApplicationInput {
                posted_date: Some("2024-10-15".into()),
                applied_date: Some("2024-10-20".into()),
                ..new_application(company.id.as_str(), "Staff Engineer")
            },
        )
        .await
        .unwrap();

        let updated = update_application(
            &pool,
            app.id.as_str(),
            UpdateApplicationInput {
                applied_date: MaybeUndefined::Null,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.applied_date, None);
        assert_eq!(updated.posted_date, app.posted_date);
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let err = create_application(
            &pool,
            CreateApplicationInput {
                offer_deadline: Some("soon".into()),
                ..new_application(company.id.as_str(), "SWE")
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_enum_filters_are_exact() {
        let pool = test_pool().await;
        let company = insert_company(&pool, "TechCorp").await;
        let cid = company.id.as_str();
        create_application(
            &pool,
            CreateApplicationInput {
                preference: Some(Preference::StronglyPrefer),
                ..new_application(cid, "dream job")
            },
        )
        .await
        .unwrap();
        create_application(&pool, new_application(cid, "fine job"))
            .await
            .unwrap();

        let found = list_applications(
            &pool,
            ApplicationFilterInput {
                preference: Some(Preference::StronglyPrefer),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(titles(&found), ["dream job"]);
    }
}
