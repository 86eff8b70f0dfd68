//! Referral request messages built from a user template.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::ClientError;
use crate::storage::LocalStorage;

pub const STORAGE_KEY: &str = "referralSettings";

pub const DEFAULT_TEMPLATE: &str = "Hi {contactName}, this is {yourName} from {yourCompany}. \
I saw a {jobTitle} posting open at {companyName} and I think I would be a good fit. \
Would you be able to give me a referral? {jobLink}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralSettings {
    pub your_name: String,
    pub your_company: String,
    pub template: String,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            your_name: String::new(),
            your_company: String::new(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Reads saved settings. Any failure is logged and the defaults are returned.
pub fn load_settings(storage: &LocalStorage) -> ReferralSettings {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ReferralSettings::default(),
        Err(e) => {
            error!("Failed to load referral settings: {e}");
            return ReferralSettings::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        error!("Failed to load referral settings: {e}");
        ReferralSettings::default()
    })
}

/// Persists settings. Failures are logged and returned to the caller.
pub fn save_settings(storage: &LocalStorage, settings: &ReferralSettings) -> Result<(), ClientError> {
    let result = serde_json::to_string(settings)
        .map_err(ClientError::from)
        .and_then(|raw| storage.set_item(STORAGE_KEY, &raw));

    if let Err(e) = &result {
        error!("Failed to save referral settings: {e}");
    }
    result
}

/// Per-message values; the sender's name and company come from the settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferralParams<'a> {
    pub contact_name: &'a str,
    pub job_title: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub job_link: Option<&'a str>,
}

/// Replaces every placeholder in the template. Blank values are shown as a
/// bracketed hint such as `[Job Title]`.
pub fn generate_message(settings: &ReferralSettings, params: &ReferralParams<'_>) -> String {
    fn or_hint<'v>(value: Option<&'v str>, hint: &'v str) -> &'v str {
        value.filter(|v| !v.is_empty()).unwrap_or(hint)
    }

    let replacements = [
        ("{contactName}", or_hint(Some(params.contact_name), "[Contact Name]")),
        ("{yourName}", or_hint(Some(settings.your_name.as_str()), "[Your Name]")),
        ("{yourCompany}", or_hint(Some(settings.your_company.as_str()), "[Your Company]")),
        ("{jobTitle}", or_hint(params.job_title, "[Job Title]")),
        ("{companyName}", or_hint(params.company_name, "[Company Name]")),
        ("{jobLink}", or_hint(params.job_link, "[No link available]")),
    ];

    replacements
        .iter()
        .fold(settings.template.clone(), |message, (token, value)| {
            message.replace(*token, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_template_with_hints() {
        let message = generate_message(
            &ReferralSettings::default(),
            &ReferralParams {
                contact_name: "John Doe",
                job_title: Some("Senior Software Engineer"),
                company_name: Some("TechCorp"),
                job_link: None,
            },
        );
        assert_eq!(
            message,
            "Hi John Doe, this is [Your Name] from [Your Company]. I saw a Senior Software \
             Engineer posting open at TechCorp and I think I would be a good fit. Would you be \
             able to give me a referral? [No link available]"
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let settings = ReferralSettings {
            your_name: "Ada".to_string(),
            your_company: "".to_string(),
            template: "{yourName} / {yourName} @ {yourCompany} -> {contactName}".to_string(),
        };
        let message = generate_message(
            &settings,
            &ReferralParams {
                contact_name: "",
                ..Default::default()
            },
        );
        assert_eq!(message, "Ada / Ada @ [Your Company] -> [Contact Name]");
    }

    #[test]
    fn test_settings_round_trip_through_storage() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        assert_eq!(load_settings(&storage), ReferralSettings::default());

        let settings = ReferralSettings {
            your_name: "Ada".to_string(),
            your_company: "Analytical Engines".to_string(),
            template: "Hi {contactName}".to_string(),
        };
        save_settings(&storage, &settings).unwrap();
        assert_eq!(load_settings(&storage), settings);

        let raw = storage.get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"yourCompany\""));
    }

    #[test]
    fn test_unreadable_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        storage.set_item(STORAGE_KEY, "{broken").unwrap();
        assert_eq!(load_settings(&storage), ReferralSettings::default());

        storage.set_item(STORAGE_KEY, r#"{"yourName":"Ada"}"#).unwrap();
        let partial = load_settings(&storage);
        assert_eq!(partial.your_name, "Ada");
        assert_eq!(partial.template, DEFAULT_TEMPLATE);
    }
}
