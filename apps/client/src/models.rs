//! Wire types for the tracker API: enums, fetched objects, and mutation inputs.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Declares an API enum with its upper-snake wire name and a display label.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!("unknown {} '{}'", stringify!($name), other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

wire_enum!(CompanySize {
    Small => "SMALL", "Small";
    Medium => "MEDIUM", "Medium";
    Large => "LARGE", "Large";
    Enterprise => "ENTERPRISE", "Enterprise";
});

wire_enum!(CompanyType {
    Startup => "STARTUP", "Startup";
    Private => "PRIVATE", "Private";
    Public => "PUBLIC", "Public";
    Nonprofit => "NONPROFIT", "Nonprofit";
});

wire_enum!(Seniority {
    Entry => "ENTRY", "Entry";
    Mid => "MID", "Mid";
    Senior => "SENIOR", "Senior";
    Principal => "PRINCIPAL", "Principal";
    Vp => "VP", "VP";
});

wire_enum!(ContactStatus {
    ToReachOut => "TO_REACH_OUT", "To Reach Out";
    ReachedOut => "REACHED_OUT", "Reached Out";
    Responded => "RESPONDED", "Responded";
    Connected => "CONNECTED", "Connected";
    MeetingScheduled => "MEETING_SCHEDULED", "Meeting Scheduled";
    Referred => "REFERRED", "Referred";
    NoResponse => "NO_RESPONSE", "No Response";
    NotInterested => "NOT_INTERESTED", "Not Interested";
});

wire_enum!(ApplicationStatus {
    NotStarted => "NOT_STARTED", "Not Started";
    AppliedNoReferral => "APPLIED_NO_REFERRAL", "Applied (No Referral)";
    AppliedWithReferral => "APPLIED_WITH_REFERRAL", "Applied (With Referral)";
    PhoneScreen => "PHONE_SCREEN", "Phone Screen";
    EarlyStages => "EARLY_STAGES", "Early Stages";
    FinalRound => "FINAL_ROUND", "Final Round";
    OfferReceived => "OFFER_RECEIVED", "Offer Received";
    OfferAccepted => "OFFER_ACCEPTED", "Offer Accepted";
    OfferDeclined => "OFFER_DECLINED", "Offer Declined";
    Rejected => "REJECTED", "Rejected";
    Withdrawn => "WITHDRAWN", "Withdrawn";
});

wire_enum!(Priority {
    Low => "LOW", "Low";
    Medium => "MEDIUM", "Medium";
    High => "HIGH", "High";
});

wire_enum!(RemoteType {
    Onsite => "ONSITE", "Onsite";
    Hybrid => "HYBRID", "Hybrid";
    Remote => "REMOTE", "Remote";
    Flexible => "FLEXIBLE", "Flexible";
});

wire_enum!(Preference {
    StronglyPrefer => "STRONGLY_PREFER", "Strongly Prefer";
    Prefer => "PREFER", "Prefer";
    Neutral => "NEUTRAL", "Neutral";
    Avoid => "AVOID", "Avoid";
    Dealbreaker => "DEALBREAKER", "Dealbreaker";
});

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub size: Option<CompanySize>,
    #[serde(rename = "type")]
    pub company_type: Option<CompanyType>,
    pub comments: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub applications: Vec<ApplicationRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_profile: Option<String>,
    pub seniority: Option<Seniority>,
    pub contact_status: Option<ContactStatus>,
    pub referred_by: Option<String>,
    pub notes: Option<String>,
    pub company: Option<CompanyRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef {
    pub id: String,
    pub job_title: String,
    pub status: Option<ApplicationStatus>,
    pub company: Option<CompanyRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub id: String,
    pub role: Option<String>,
    pub contact: Option<Contact>,
    pub application: Option<ApplicationRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_title: String,
    pub linkedin_url: Option<String>,
    pub company_job_url: Option<String>,
    pub priority: Priority,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub status: ApplicationStatus,
    pub location: Option<String>,
    pub remote_type: Option<RemoteType>,
    pub preference: Preference,
    pub requirements: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub posting_end_date: Option<DateTime<Utc>>,
    pub applied_date: Option<DateTime<Utc>>,
    pub offer_deadline: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub company: Option<CompanyRef>,
    #[serde(default)]
    pub contact_links: Vec<ContactLink>,
}

impl Application {
    /// The company careers page if known, otherwise the LinkedIn posting.
    pub fn job_link(&self) -> Option<&str> {
        self.company_job_url
            .as_deref()
            .or(self.linkedin_url.as_deref())
            .filter(|l| !l.is_empty())
    }
}

/// Only the returned id of a delete mutation is requested.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted {
    pub id: String,
}

/// Tri-state patch field: `None` is omitted from the payload, `Some(None)` is
/// sent as an explicit null (clear), `Some(Some(v))` sets the value.
pub type Patch<T> = Option<Option<T>>;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CompanySize>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<CompanyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Patch<CompanySize>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub company_type: Patch<CompanyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Patch<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactInput {
    pub company_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Seniority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<ContactStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Patch<Seniority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_status: Patch<ContactStatus>,
}

/// Dates are sent as ISO-8601 text exactly as entered (`YYYY-MM-DD` works).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationInput {
    pub company_id: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_type: Option<RemoteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_job_url: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Patch<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Patch<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_type: Patch<RemoteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Patch<Preference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Patch<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Patch<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_end_date: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_deadline: Patch<String>,
}
