//! Demo data for a fresh database, enabled with `SEED_DEMO_DATA=true`.

use sqlx::SqlitePool;
use tracing::info;

use crate::applications::inputs::CreateApplicationInput;
use crate::applications::store::create_application;
use crate::companies::inputs::{CompanyFilterInput, CreateCompanyInput};
use crate::companies::store::{create_company, list_companies};
use crate::contacts::inputs::CreateContactInput;
use crate::contacts::store::create_contact;
use crate::errors::AppError;
use crate::links::store::link_contact;
use crate::models::Company;
use crate::models::enums::{
    ApplicationStatus, CompanySize, CompanyType, ContactStatus, Preference, Priority, RemoteType,
    Seniority,
};

/// Returns the company with exactly this name, creating it if needed.
async fn company_named(pool: &SqlitePool, input: CreateCompanyInput) -> Result<Company, AppError> {
    let existing = list_companies(
        pool,
        CompanyFilterInput {
            name: Some(input.name.clone()),
            ..Default::default()
        },
    )
    .await?;
    match existing.into_iter().find(|c| c.name == input.name) {
        Some(company) => Ok(company),
        None => create_company(pool, input).await,
    }
}

/// Inserts two companies with a contact, an application and a link each.
/// Does nothing if TechCorp already exists; MegaCorp is reused if present.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, AppError> {
    let existing = list_companies(
        pool,
        CompanyFilterInput {
            name: Some("TechCorp".to_string()),
            ..Default::default()
        },
    )
    .await?;
    if existing.iter().any(|c| c.name == "TechCorp") {
        info!("Demo data already present; skipping seed");
        return Ok(false);
    }

    let tech_corp = company_named(
        pool,
        CreateCompanyInput {
            name: "TechCorp".to_string(),
            size: Some(CompanySize::Medium),
            company_type: Some(CompanyType::Startup),
            comments: Some("Fast-growing startup with great culture".to_string()),
        },
    )
    .await?;

    let mega_corp = company_named(
        pool,
        CreateCompanyInput {
            name: "MegaCorp".to_string(),
            size: Some(CompanySize::Enterprise),
            company_type: Some(CompanyType::Public),
            comments: Some("Large tech company with excellent benefits".to_string()),
        },
    )
    .await?;

    let john = create_contact(
        pool,
        CreateContactInput {
            company_id: tech_corp.id.clone(),
            name: "John Doe".to_string(),
            email: Some("john.doe@techcorp.com".to_string()),
            phone: None,
            title: Some("Senior Engineering Manager".to_string()),
            linkedin_profile: Some("linkedin.com/in/johndoe".to_string()),
            notes: Some("Met at conference, very helpful".to_string()),
            referred_by: None,
            seniority: Some(Seniority::Senior),
            contact_status: Some(ContactStatus::Connected),
        },
    )
    .await?;

    let jane = create_contact(
        pool,
        CreateContactInput {
            company_id: mega_corp.id.clone(),
            name: "Jane Smith".to_string(),
            email: Some("jane.smith@megacorp.com".to_string()),
            phone: None,
            title: Some("Technical Recruiter".to_string()),
            linkedin_profile: Some("linkedin.com/in/janesmith".to_string()),
            notes: None,
            referred_by: None,
            seniority: Some(Seniority::Mid),
            contact_status: Some(ContactStatus::ToReachOut),
        },
    )
    .await?;

    let senior_swe = create_application(
        pool,
        CreateApplicationInput {
            company_id: tech_corp.id.clone(),
            job_title: "Senior Software Engineer".to_string(),
            linkedin_url: Some("linkedin.com/jobs/123".to_string()),
            company_job_url: Some("techcorp.com/careers/senior-swe".to_string()),
            location: Some("San Francisco, CA".to_string()),
            requirements: None,
            comments: Some("Great opportunity, matches my skills".to_string()),
            priority: Some(Priority::High),
            status: Some(ApplicationStatus::NotStarted),
            remote_type: Some(RemoteType::Hybrid),
            preference: Some(Preference::Prefer),
            salary_min: Some(150_000),
            salary_max: Some(200_000),
            posted_date: Some("2024-10-15".to_string()),
            posting_end_date: None,
            applied_date: None,
            offer_deadline: None,
        },
    )
    .await?;

    let staff = create_application(
        pool,
        CreateApplicationInput {
            company_id: mega_corp.id.clone(),
            job_title: "Staff Engineer".to_string(),
            linkedin_url: Some("linkedin.com/jobs/456".to_string()),
            company_job_url: None,
            location: Some("Remote".to_string()),
            requirements: None,
            comments: Some("Applied through John".to_string()),
            priority: Some(Priority::Medium),
            status: Some(ApplicationStatus::AppliedWithReferral),
            remote_type: Some(RemoteType::Remote),
            preference: Some(Preference::StronglyPrefer),
            salary_min: Some(180_000),
            salary_max: Some(250_000),
            posted_date: None,
            posting_end_date: None,
            applied_date: Some("2024-10-20".to_string()),
            offer_deadline: None,
        },
    )
    .await?;

    link_contact(pool, &senior_swe.id, &john.id, Some("Referral".to_string())).await?;
    link_contact(pool, &staff.id, &jane.id, Some("Recruiter".to_string())).await?;

    info!("Seeded demo data: 2 companies, 2 contacts, 2 applications");
    Ok(true)
}
