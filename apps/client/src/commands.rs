use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use reqwest::Url;
use tracing::info;

use crate::api::TrackerClient;
use crate::cli::{
    ApplicationCommands, ApplicationDetails, ApplicationField, CompanyCommands, CompanyField,
    ContactCommands, ContactDetails, ContactField, ListOptions, SettingsCommands,
};
use crate::filters::{self, FilterParams};
use crate::models::{
    CreateApplicationInput, CreateCompanyInput, CreateContactInput, Patch, UpdateApplicationInput,
    UpdateCompanyInput, UpdateContactInput,
};
use crate::priority::{suggest_priority, PriorityInputs};
use crate::referral::{self, ReferralParams, DEFAULT_TEMPLATE};
use crate::storage::LocalStorage;
use crate::views;

/// Everything a command needs; built once in `main`.
pub struct Session {
    pub client: TrackerClient,
    pub storage: LocalStorage,
}

/// Turns an optional flag plus a `--clear` request into a tri-state patch.
fn patch<T>(field: &str, value: Option<T>, clear: bool) -> Result<Patch<T>> {
    match (value, clear) {
        (Some(_), true) => bail!("--{field} cannot be set and cleared at once"),
        (None, true) => Ok(Some(None)),
        (value, false) => Ok(value.map(Some)),
    }
}

fn resolve_filter<F: FilterParams>(flags: F, options: &ListOptions, storage: &LocalStorage) -> Result<F> {
    let flags = match &options.from_url {
        Some(raw) => {
            let url = Url::parse(raw).with_context(|| format!("Invalid view URL '{raw}'"))?;
            F::from_url(&url)
        }
        None => flags,
    };
    let filter = filters::resolve(flags, storage, options.reset_filter)?;
    if !filter.is_empty() {
        println!("Filter: {}", filter.to_url()?);
    }
    Ok(filter)
}

pub async fn companies(ctx: &Session, command: CompanyCommands) -> Result<()> {
    match command {
        CompanyCommands::List { filter, options } => {
            let filter = resolve_filter(filter, &options, &ctx.storage)?;
            let companies = ctx.client.companies(&filter).await?;
            print!("{}", views::companies_table(&companies));
        }

        CompanyCommands::Show { id } => {
            let company = ctx
                .client
                .company(&id)
                .await?
                .ok_or_else(|| anyhow!("Company {id} not found"))?;
            print!("{}", views::company_detail(&company));
        }

        CompanyCommands::Create {
            name,
            size,
            company_type,
            comments,
        } => {
            let company = ctx
                .client
                .create_company(&CreateCompanyInput {
                    name,
                    size,
                    company_type,
                    comments,
                })
                .await?;
            println!("Created company {} ({})", company.name, company.id);
        }

        CompanyCommands::Update {
            id,
            name,
            size,
            company_type,
            comments,
            clear,
        } => {
            let input = UpdateCompanyInput {
                name: name.map(Some),
                size: patch("size", size, clear.contains(&CompanyField::Size))?,
                company_type: patch("type", company_type, clear.contains(&CompanyField::Type))?,
                comments: patch("comments", comments, clear.contains(&CompanyField::Comments))?,
            };
            let company = ctx.client.update_company(&id, &input).await?;
            println!("Updated company {} ({})", company.name, company.id);
        }

        CompanyCommands::Delete { id } => {
            let deleted = ctx.client.delete_company(&id).await?;
            println!("Deleted company {}", deleted.id);
        }
    }
    Ok(())
}

pub async fn contacts(ctx: &Session, command: ContactCommands) -> Result<()> {
    match command {
        ContactCommands::List { filter, options } => {
            let filter = resolve_filter(filter, &options, &ctx.storage)?;
            let contacts = ctx.client.contacts(&filter).await?;
            print!("{}", views::contacts_table(&contacts));
        }

        ContactCommands::Show { id } => {
            let contact = ctx
                .client
                .contact(&id)
                .await?
                .ok_or_else(|| anyhow!("Contact {id} not found"))?;
            print!("{}", views::contact_detail(&contact));
        }

        ContactCommands::Create {
            company_id,
            name,
            details,
        } => {
            let ContactDetails {
                email,
                phone,
                title,
                linkedin_profile,
                notes,
                referred_by,
                seniority,
                contact_status,
            } = details;
            let contact = ctx
                .client
                .create_contact(&CreateContactInput {
                    company_id,
                    name,
                    email,
                    phone,
                    title,
                    linkedin_profile,
                    notes,
                    referred_by,
                    seniority,
                    contact_status,
                })
                .await?;
            println!("Created contact {} ({})", contact.name, contact.id);
        }

        ContactCommands::Update {
            id,
            company_id,
            name,
            details,
            clear,
        } => {
            let cleared = |f: ContactField| clear.contains(&f);
            let input = UpdateContactInput {
                company_id: company_id.map(Some),
                name: name.map(Some),
                email: patch("email", details.email, cleared(ContactField::Email))?,
                phone: patch("phone", details.phone, cleared(ContactField::Phone))?,
                title: patch("title", details.title, cleared(ContactField::Title))?,
                linkedin_profile: patch(
                    "linkedin-profile",
                    details.linkedin_profile,
                    cleared(ContactField::LinkedinProfile),
                )?,
                notes: patch("notes", details.notes, cleared(ContactField::Notes))?,
                referred_by: patch(
                    "referred-by",
                    details.referred_by,
                    cleared(ContactField::ReferredBy),
                )?,
                seniority: patch("seniority", details.seniority, cleared(ContactField::Seniority))?,
                contact_status: details.contact_status.map(Some),
            };
            let contact = ctx.client.update_contact(&id, &input).await?;
            println!("Updated contact {} ({})", contact.name, contact.id);
        }

        ContactCommands::Delete { id } => {
            let deleted = ctx.client.delete_contact(&id).await?;
            println!("Deleted contact {}", deleted.id);
        }
    }
    Ok(())
}

fn update_application_input(
    company_id: Option<String>,
    job_title: Option<String>,
    details: ApplicationDetails,
    clear: &[ApplicationField],
) -> Result<UpdateApplicationInput> {
    let cleared = |f: ApplicationField| clear.contains(&f);
    Ok(UpdateApplicationInput {
        company_id: company_id.map(Some),
        job_title: job_title.map(Some),
        priority: details.priority.map(Some),
        status: details.status.map(Some),
        preference: details.preference.map(Some),
        linkedin_url: patch(
            "linkedin-url",
            details.linkedin_url,
            cleared(ApplicationField::LinkedinUrl),
        )?,
        company_job_url: patch(
            "company-job-url",
            details.company_job_url,
            cleared(ApplicationField::CompanyJobUrl),
        )?,
        location: patch("location", details.location, cleared(ApplicationField::Location))?,
        requirements: patch(
            "requirements",
            details.requirements,
            cleared(ApplicationField::Requirements),
        )?,
        comments: patch("comments", details.comments, cleared(ApplicationField::Comments))?,
        remote_type: patch(
            "remote-type",
            details.remote_type,
            cleared(ApplicationField::RemoteType),
        )?,
        salary_min: patch("salary-min", details.salary_min, cleared(ApplicationField::SalaryMin))?,
        salary_max: patch("salary-max", details.salary_max, cleared(ApplicationField::SalaryMax))?,
        posted_date: patch(
            "posted-date",
            details.posted_date,
            cleared(ApplicationField::PostedDate),
        )?,
        posting_end_date: patch(
            "posting-end-date",
            details.posting_end_date,
            cleared(ApplicationField::PostingEndDate),
        )?,
        applied_date: patch(
            "applied-date",
            details.applied_date,
            cleared(ApplicationField::AppliedDate),
        )?,
        offer_deadline: patch(
            "offer-deadline",
            details.offer_deadline,
            cleared(ApplicationField::OfferDeadline),
        )?,
    })
}

pub async fn applications(ctx: &Session, command: ApplicationCommands) -> Result<()> {
    match command {
        ApplicationCommands::List { filter, options } => {
            let filter = resolve_filter(filter, &options, &ctx.storage)?;
            let applications = ctx.client.applications(&filter).await?;
            print!("{}", views::applications_table(&applications));
        }

        ApplicationCommands::Show { id } => {
            let app = ctx
                .client
                .application(&id)
                .await?
                .ok_or_else(|| anyhow!("Application {id} not found"))?;
            let suggested = suggest_priority(&PriorityInputs::from(&app), Utc::now());
            print!("{}", views::application_detail(&app, suggested));
        }

        ApplicationCommands::Create {
            company_id,
            job_title,
            details,
        } => {
            let ApplicationDetails {
                linkedin_url,
                company_job_url,
                location,
                requirements,
                comments,
                priority,
                status,
                remote_type,
                preference,
                salary_min,
                salary_max,
                posted_date,
                posting_end_date,
                applied_date,
                offer_deadline,
            } = details;
            let app = ctx
                .client
                .create_application(&CreateApplicationInput {
                    company_id,
                    job_title,
                    linkedin_url,
                    company_job_url,
                    location,
                    requirements,
                    comments,
                    priority,
                    status,
                    remote_type,
                    preference,
                    salary_min,
                    salary_max,
                    posted_date,
                    posting_end_date,
                    applied_date,
                    offer_deadline,
                })
                .await?;
            println!("Created application {} ({})", app.job_title, app.id);
        }

        ApplicationCommands::Update {
            id,
            company_id,
            job_title,
            details,
            clear,
        } => {
            let input = update_application_input(company_id, job_title, details, &clear)?;
            let app = ctx.client.update_application(&id, &input).await?;
            println!("Updated application {} ({})", app.job_title, app.id);
        }

        ApplicationCommands::Delete { id } => {
            let deleted = ctx.client.delete_application(&id).await?;
            println!("Deleted application {}", deleted.id);
        }

        ApplicationCommands::SuggestPriority { id, apply } => {
            let app = ctx
                .client
                .application(&id)
                .await?
                .ok_or_else(|| anyhow!("Application {id} not found"))?;
            let suggested = suggest_priority(&PriorityInputs::from(&app), Utc::now());
            println!(
                "{}: current priority {}, suggested {}",
                app.job_title,
                app.priority.label(),
                suggested.label()
            );

            if apply && suggested != app.priority {
                let input = UpdateApplicationInput {
                    priority: Some(Some(suggested)),
                    ..Default::default()
                };
                ctx.client.update_application(&id, &input).await?;
                info!("Applied suggested priority {} to {id}", suggested.as_str());
                println!("Priority set to {}", suggested.label());
            }
        }
    }
    Ok(())
}

pub async fn link(ctx: &Session, application_id: &str, contact_id: &str, role: Option<&str>) -> Result<()> {
    let link = ctx.client.link_contact(application_id, contact_id, role).await?;
    let contact = link.contact.as_ref().map(|c| c.name.as_str()).unwrap_or(contact_id);
    let job = link
        .application
        .as_ref()
        .map(|a| a.job_title.as_str())
        .unwrap_or(application_id);
    println!("Linked {contact} to {job} (link {})", link.id);
    Ok(())
}

pub async fn unlink(ctx: &Session, link_id: &str) -> Result<()> {
    let deleted = ctx.client.unlink_contact(link_id).await?;
    println!("Removed link {}", deleted.id);
    Ok(())
}

pub async fn set_role(ctx: &Session, link_id: &str, role: Option<&str>) -> Result<()> {
    let link = ctx.client.update_link_role(link_id, role).await?;
    println!(
        "Link {} role: {}",
        link.id,
        link.role.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

/// `contact` may be either the contact's id or the link's id.
pub async fn referral(ctx: &Session, application_id: &str, contact: &str) -> Result<()> {
    let app = ctx
        .client
        .application(application_id)
        .await?
        .ok_or_else(|| anyhow!("Application {application_id} not found"))?;

    let linked = app
        .contact_links
        .iter()
        .find(|link| link.id == contact || link.contact.as_ref().is_some_and(|c| c.id == contact))
        .and_then(|link| link.contact.as_ref());

    let contact_name = match linked {
        Some(c) => c.name.clone(),
        None => ctx
            .client
            .contact(contact)
            .await?
            .map(|c| c.name)
            .ok_or_else(|| anyhow!("Contact {contact} not found"))?,
    };

    let settings = referral::load_settings(&ctx.storage);
    let message = referral::generate_message(
        &settings,
        &ReferralParams {
            contact_name: &contact_name,
            job_title: Some(&app.job_title),
            company_name: app.company.as_ref().map(|c| c.name.as_str()),
            job_link: app.job_link(),
        },
    );
    println!("{message}");
    Ok(())
}

pub fn settings(ctx: &Session, command: SettingsCommands) -> Result<()> {
    let mut settings = referral::load_settings(&ctx.storage);
    match command {
        SettingsCommands::Show => {
            println!("Name: {}", settings.your_name);
            println!("Company: {}", settings.your_company);
            println!("Template: {}", settings.template);
            println!("Stored in {}", ctx.storage.path().display());
            return Ok(());
        }
        SettingsCommands::Set {
            name,
            company,
            template,
        } => {
            if let Some(name) = name {
                settings.your_name = name;
            }
            if let Some(company) = company {
                settings.your_company = company;
            }
            if let Some(template) = template {
                settings.template = template;
            }
        }
        SettingsCommands::ResetTemplate => settings.template = DEFAULT_TEMPLATE.to_string(),
    }

    referral::save_settings(&ctx.storage, &settings)?;
    println!("Settings saved");
    Ok(())
}
