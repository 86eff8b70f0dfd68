//! List filters shared by the CLI flags, the GraphQL variables, view URLs
//! (`tracker://applications?status=PHONE_SCREEN`) and the last-used filter
//! kept in local storage.

use std::str::FromStr;

use clap::Args;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::{
    ApplicationStatus, CompanySize, CompanyType, ContactStatus, Preference, Priority, RemoteType,
    Seniority,
};
use crate::storage::LocalStorage;

pub trait FilterParams: Default + Sized {
    /// View name, used as the URL host and in the storage key.
    const VIEW: &'static str;

    /// Query pairs for every non-empty value, in a stable order.
    fn to_pairs(&self) -> Vec<(&'static str, String)>;

    /// Applies one query pair. Returns `false` for unknown keys or values
    /// that do not parse.
    fn set_param(&mut self, key: &str, value: &str) -> bool;

    fn is_empty(&self) -> bool {
        self.to_pairs().is_empty()
    }

    fn to_url(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("tracker://{}", Self::VIEW))
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        let pairs = self.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn from_url(url: &Url) -> Self {
        let mut filter = Self::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            if !filter.set_param(&key, &value) {
                warn!("Ignoring filter parameter {key}={value}");
            }
        }
        filter
    }

    fn storage_key() -> String {
        format!("filters:{}", Self::VIEW)
    }

    /// The filter saved by the last listing of this view, or the default.
    fn load_last(storage: &LocalStorage) -> Self {
        let saved = match storage.get_item(&Self::storage_key()) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Could not read saved {} filter: {e}", Self::VIEW);
                None
            }
        };

        match saved.map(|raw| Url::parse(&raw)) {
            Some(Ok(url)) => {
                debug!("Restored {} filter from {url}", Self::VIEW);
                Self::from_url(&url)
            }
            Some(Err(e)) => {
                warn!("Discarding saved {} filter: {e}", Self::VIEW);
                Self::default()
            }
            None => Self::default(),
        }
    }

    fn save_last(&self, storage: &LocalStorage) -> Result<(), ClientError> {
        storage.set_item(&Self::storage_key(), self.to_url()?.as_str())
    }

    fn clear_last(storage: &LocalStorage) -> Result<(), ClientError> {
        storage.remove_item(&Self::storage_key())
    }
}

/// Uses the flags if any were given, otherwise the saved filter for the view.
/// `reset` forgets the saved filter first.
pub fn resolve<F: FilterParams>(
    flags: F,
    storage: &LocalStorage,
    reset: bool,
) -> Result<F, ClientError> {
    if reset {
        F::clear_last(storage)?;
    }
    if flags.is_empty() {
        return Ok(if reset { F::default() } else { F::load_last(storage) });
    }
    flags.save_last(storage)?;
    Ok(flags)
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn push_value<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}

fn parse_into<T: FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    match value.parse() {
        Ok(v) => {
            *slot = Some(v);
            true
        }
        Err(_) => false,
    }
}

fn set_text(slot: &mut Option<String>, value: &str) -> bool {
    *slot = Some(value.to_string());
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Args)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Substring of the company name (case-insensitive)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CompanySize>,

    #[arg(long = "type", value_enum)]
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<CompanyType>,
}

impl FilterParams for CompanyFilter {
    const VIEW: &'static str = "companies";

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "name", &self.name);
        push_value(&mut pairs, "size", self.size.map(CompanySize::as_str));
        push_value(&mut pairs, "type", self.company_type.map(CompanyType::as_str));
        pairs
    }

    fn set_param(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => set_text(&mut self.name, value),
            "size" => parse_into(&mut self.size, value),
            "type" => parse_into(&mut self.company_type, value),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Args)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Seniority>,

    #[arg(long = "status", value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<ContactStatus>,

    #[arg(long = "company")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl FilterParams for ContactFilter {
    const VIEW: &'static str = "contacts";

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "name", &self.name);
        push_text(&mut pairs, "email", &self.email);
        push_text(&mut pairs, "title", &self.title);
        push_value(&mut pairs, "seniority", self.seniority.map(Seniority::as_str));
        push_value(&mut pairs, "contactStatus", self.contact_status.map(ContactStatus::as_str));
        push_text(&mut pairs, "companyId", &self.company_id);
        pairs
    }

    fn set_param(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => set_text(&mut self.name, value),
            "email" => set_text(&mut self.email, value),
            "title" => set_text(&mut self.title, value),
            "seniority" => parse_into(&mut self.seniority, value),
            "contactStatus" => parse_into(&mut self.contact_status, value),
            "companyId" => set_text(&mut self.company_id, value),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Args)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    /// Substring of the job title (case-insensitive)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[arg(long = "company")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_type: Option<RemoteType>,

    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,

    /// Postings whose maximum salary reaches this amount
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i32>,

    /// Postings whose minimum salary does not exceed this amount
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<i32>,
}

impl FilterParams for ApplicationFilter {
    const VIEW: &'static str = "applications";

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "jobTitle", &self.job_title);
        push_text(&mut pairs, "location", &self.location);
        push_text(&mut pairs, "companyId", &self.company_id);
        push_value(&mut pairs, "priority", self.priority.map(Priority::as_str));
        push_value(&mut pairs, "status", self.status.map(ApplicationStatus::as_str));
        push_value(&mut pairs, "remoteType", self.remote_type.map(RemoteType::as_str));
        push_value(&mut pairs, "preference", self.preference.map(Preference::as_str));
        push_value(&mut pairs, "minSalary", self.min_salary);
        push_value(&mut pairs, "maxSalary", self.max_salary);
        pairs
    }

    fn set_param(&mut self, key: &str, value: &str) -> bool {
        match key {
            "jobTitle" => set_text(&mut self.job_title, value),
            "location" => set_text(&mut self.location, value),
            "companyId" => set_text(&mut self.company_id, value),
            "priority" => parse_into(&mut self.priority, value),
            "status" => parse_into(&mut self.status, value),
            "remoteType" => parse_into(&mut self.remote_type, value),
            "preference" => parse_into(&mut self.preference, value),
            "minSalary" => parse_into(&mut self.min_salary, value),
            "maxSalary" => parse_into(&mut self.max_salary, value),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn remote_staff_filter() -> ApplicationFilter {
        ApplicationFilter {
            job_title: Some("Staff Engineer".to_string()),
            location: Some(String::new()),
            status: Some(ApplicationStatus::PhoneScreen),
            min_salary: Some(150_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_keeps_only_non_empty_values() {
        let url = remote_staff_filter().to_url().unwrap();
        assert_eq!(
            url.as_str(),
            "tracker://applications?jobTitle=Staff+Engineer&status=PHONE_SCREEN&minSalary=150000"
        );
        assert_eq!(ApplicationFilter::default().to_url().unwrap().as_str(), "tracker://applications");
    }

    #[test]
    fn test_url_parses_back_and_skips_bad_values() {
        let url = Url::parse(
            "tracker://applications?jobTitle=Staff+Engineer&status=PHONE_SCREEN\
             &minSalary=150000&maxSalary=lots&colour=blue&location=",
        )
        .unwrap();
        let filter = ApplicationFilter::from_url(&url);
        assert_eq!(filter.job_title.as_deref(), Some("Staff Engineer"));
        assert_eq!(filter.status, Some(ApplicationStatus::PhoneScreen));
        assert_eq!(filter.min_salary, Some(150_000));
        assert_eq!(filter.max_salary, None);
        assert_eq!(filter.location, None);
    }

    #[test]
    fn test_graphql_variables_use_api_field_names() {
        let filter = CompanyFilter {
            name: Some("Tech".to_string()),
            company_type: Some(CompanyType::Startup),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "name": "Tech", "type": "STARTUP" })
        );
    }

    #[test]
    fn test_last_filter_is_restored_when_no_flags() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));

        let flags = ContactFilter {
            contact_status: Some(ContactStatus::ToReachOut),
            ..Default::default()
        };
        let used = resolve(flags.clone(), &storage, false).unwrap();
        assert_eq!(used, flags);

        let restored = resolve(ContactFilter::default(), &storage, false).unwrap();
        assert_eq!(restored, flags);

        let reset = resolve(ContactFilter::default(), &storage, true).unwrap();
        assert!(reset.is_empty());
        assert_eq!(ContactFilter::load_last(&storage), ContactFilter::default());
    }
}
