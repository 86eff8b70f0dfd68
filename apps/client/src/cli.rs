use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filters::{ApplicationFilter, CompanyFilter, ContactFilter};
use crate::models::{
    ApplicationStatus, CompanySize, CompanyType, ContactStatus, Preference, Priority, RemoteType,
    Seniority,
};

#[derive(Parser)]
#[command(name = "tracker", version)]
#[command(about = "Track job applications, companies and contacts")]
pub struct Cli {
    /// GraphQL endpoint (overrides TRACKER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage companies
    Companies {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Manage contacts
    Contacts {
        #[command(subcommand)]
        command: ContactCommands,
    },

    /// Manage applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },

    /// Link a contact to an application
    Link {
        application_id: String,
        contact_id: String,

        /// e.g. Referral, Recruiter, Hiring Manager
        #[arg(long)]
        role: Option<String>,
    },

    /// Remove a contact link by its link id
    Unlink { link_id: String },

    /// Change the role on a contact link; omit --role to clear it
    SetRole {
        link_id: String,

        #[arg(long)]
        role: Option<String>,
    },

    /// Print a referral request for a contact linked to an application
    Referral {
        application_id: String,

        /// Contact id or link id
        contact: String,
    },

    /// Referral message settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

/// Options shared by every `list` command.
#[derive(Args, Debug, Default)]
pub struct ListOptions {
    /// Forget the saved filter for this view
    #[arg(long)]
    pub reset_filter: bool,

    /// Load the filter from a view URL such as tracker://applications?status=REJECTED
    #[arg(long)]
    pub from_url: Option<String>,
}

#[derive(Subcommand)]
pub enum CompanyCommands {
    /// List companies, newest first
    List {
        #[command(flatten)]
        filter: CompanyFilter,

        #[command(flatten)]
        options: ListOptions,
    },

    /// Show a company with its contacts and applications
    Show { id: String },

    Create {
        #[arg(long)]
        name: String,

        #[arg(long, value_enum)]
        size: Option<CompanySize>,

        #[arg(long = "type", value_enum)]
        company_type: Option<CompanyType>,

        #[arg(long)]
        comments: Option<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_enum)]
        size: Option<CompanySize>,

        #[arg(long = "type", value_enum)]
        company_type: Option<CompanyType>,

        #[arg(long)]
        comments: Option<String>,

        /// Fields to set to null
        #[arg(long, value_enum)]
        clear: Vec<CompanyField>,
    },

    /// Delete a company; fails while it still has contacts or applications
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompanyField {
    Size,
    Type,
    Comments,
}

#[derive(Subcommand)]
pub enum ContactCommands {
    List {
        #[command(flatten)]
        filter: ContactFilter,

        #[command(flatten)]
        options: ListOptions,
    },

    Show { id: String },

    Create {
        #[arg(long = "company")]
        company_id: String,

        #[arg(long)]
        name: String,

        #[command(flatten)]
        details: ContactDetails,
    },

    Update {
        id: String,

        #[arg(long = "company")]
        company_id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        details: ContactDetails,

        /// Fields to set to null
        #[arg(long, value_enum)]
        clear: Vec<ContactField>,
    },

    /// Delete a contact and its application links
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct ContactDetails {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub linkedin_profile: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub referred_by: Option<String>,

    #[arg(long, value_enum)]
    pub seniority: Option<Seniority>,

    #[arg(long = "status", value_enum)]
    pub contact_status: Option<ContactStatus>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContactField {
    Email,
    Phone,
    Title,
    LinkedinProfile,
    Notes,
    ReferredBy,
    Seniority,
}

#[derive(Subcommand)]
pub enum ApplicationCommands {
    List {
        #[command(flatten)]
        filter: ApplicationFilter,

        #[command(flatten)]
        options: ListOptions,
    },

    /// Show an application with its contacts and a suggested priority
    Show { id: String },

    Create {
        #[arg(long = "company")]
        company_id: String,

        #[arg(long)]
        job_title: String,

        #[command(flatten)]
        details: ApplicationDetails,
    },

    Update {
        id: String,

        #[arg(long = "company")]
        company_id: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        #[command(flatten)]
        details: ApplicationDetails,

        /// Fields to set to null
        #[arg(long, value_enum)]
        clear: Vec<ApplicationField>,
    },

    /// Delete an application and its contact links
    Delete { id: String },

    /// Compute the advisory priority; --apply stores it on the application
    SuggestPriority {
        id: String,

        #[arg(long)]
        apply: bool,
    },
}

/// Dates accept `YYYY-MM-DD` or a full RFC 3339 timestamp.
#[derive(Args, Debug, Default)]
pub struct ApplicationDetails {
    #[arg(long)]
    pub linkedin_url: Option<String>,

    #[arg(long)]
    pub company_job_url: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub requirements: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,

    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    #[arg(long, value_enum)]
    pub status: Option<ApplicationStatus>,

    #[arg(long, value_enum)]
    pub remote_type: Option<RemoteType>,

    #[arg(long, value_enum)]
    pub preference: Option<Preference>,

    #[arg(long)]
    pub salary_min: Option<i32>,

    #[arg(long)]
    pub salary_max: Option<i32>,

    #[arg(long)]
    pub posted_date: Option<String>,

    #[arg(long)]
    pub posting_end_date: Option<String>,

    #[arg(long)]
    pub applied_date: Option<String>,

    #[arg(long)]
    pub offer_deadline: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ApplicationField {
    LinkedinUrl,
    CompanyJobUrl,
    Location,
    Requirements,
    Comments,
    RemoteType,
    SalaryMin,
    SalaryMax,
    PostedDate,
    PostingEndDate,
    AppliedDate,
    OfferDeadline,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    Show,

    Set {
        /// Your name, used for {yourName}
        #[arg(long)]
        name: Option<String>,

        /// Your company, used for {yourCompany}
        #[arg(long)]
        company: Option<String>,

        /// Message template with {contactName} {yourName} {yourCompany}
        /// {jobTitle} {companyName} {jobLink}
        #[arg(long)]
        template: Option<String>,
    },

    /// Restore the default message template
    ResetTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_filtered_list() {
        let cli = Cli::try_parse_from([
            "tracker",
            "applications",
            "list",
            "--status",
            "phone-screen",
            "--min-salary",
            "150000",
        ])
        .unwrap();

        match cli.command {
            Commands::Applications {
                command: ApplicationCommands::List { filter, options },
            } => {
                assert_eq!(filter.status, Some(ApplicationStatus::PhoneScreen));
                assert_eq!(filter.min_salary, Some(150_000));
                assert!(!options.reset_filter);
            }
            _ => panic!("expected applications list"),
        }
    }

    #[test]
    fn test_parses_repeated_clear() {
        let cli = Cli::try_parse_from([
            "tracker",
            "applications",
            "update",
            "a1",
            "--clear",
            "posted-date",
            "--clear",
            "salary-max",
        ])
        .unwrap();

        match cli.command {
            Commands::Applications {
                command: ApplicationCommands::Update { clear, .. },
            } => assert_eq!(
                clear,
                vec![ApplicationField::PostedDate, ApplicationField::SalaryMax]
            ),
            _ => panic!("expected applications update"),
        }
    }
}
