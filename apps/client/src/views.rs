//! Plain-text tables and detail views for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Application, Company, Contact, Priority};

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn salary_range(min: Option<i32>, max: Option<i32>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("${}k-${}k", min / 1000, max / 1000),
        (Some(min), None) => format!("${}k+", min / 1000),
        (None, Some(max)) => format!("<${}k", max / 1000),
        (None, None) => "-".to_string(),
    }
}

pub fn companies_table(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<24} {:<10} {:<10} {:>8}",
        "ID", "NAME", "SIZE", "TYPE", "CONTACTS"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));
    for company in companies {
        let _ = writeln!(
            out,
            "{:<36}  {:<24} {:<10} {:<10} {:>8}",
            company.id,
            truncate(&company.name, 24),
            label(company.size),
            label(company.company_type),
            company.contacts.len()
        );
    }
    out
}

pub fn company_detail(company: &Company) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", company.name, company.id);
    let _ = writeln!(out, "Size: {}", label(company.size));
    let _ = writeln!(out, "Type: {}", label(company.company_type));
    if let Some(comments) = company.comments.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "Comments: {comments}");
    }

    let _ = writeln!(out, "\nContacts ({}):", company.contacts.len());
    for contact in &company.contacts {
        let _ = writeln!(
            out,
            "  {}  {} | {} | {}",
            contact.id,
            contact.name,
            or_dash(contact.title.as_deref()),
            label(contact.contact_status)
        );
    }

    let _ = writeln!(out, "\nApplications ({}):", company.applications.len());
    for app in &company.applications {
        let _ = writeln!(out, "  {}  {} | {}", app.id, app.job_title, label(app.status));
    }
    out
}

pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<20} {:<18} {:<24} {:<18}",
        "ID", "NAME", "COMPANY", "TITLE", "STATUS"
    );
    let _ = writeln!(out, "{}", "-".repeat(120));
    for contact in contacts {
        let company = contact.company.as_ref().map(|c| c.name.as_str());
        let _ = writeln!(
            out,
            "{:<36}  {:<20} {:<18} {:<24} {:<18}",
            contact.id,
            truncate(&contact.name, 20),
            truncate(or_dash(company), 18),
            truncate(or_dash(contact.title.as_deref()), 24),
            label(contact.contact_status)
        );
    }
    out
}

pub fn contact_detail(contact: &Contact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", contact.name, contact.id);
    if let Some(company) = &contact.company {
        let _ = writeln!(out, "Company: {} ({})", company.name, company.id);
    }
    let _ = writeln!(out, "Title: {}", or_dash(contact.title.as_deref()));
    let _ = writeln!(out, "Email: {}", or_dash(contact.email.as_deref()));
    let _ = writeln!(out, "Phone: {}", or_dash(contact.phone.as_deref()));
    let _ = writeln!(out, "LinkedIn: {}", or_dash(contact.linkedin_profile.as_deref()));
    let _ = writeln!(out, "Seniority: {}", label(contact.seniority));
    let _ = writeln!(out, "Status: {}", label(contact.contact_status));
    let _ = writeln!(out, "Referred by: {}", or_dash(contact.referred_by.as_deref()));
    if let Some(notes) = contact.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "Notes: {notes}");
    }
    out
}

pub fn applications_table(applications: &[Application]) -> String {
    if applications.is_empty() {
        return "No applications found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<28} {:<16} {:<22} {:<8} {:>14}",
        "ID", "TITLE", "COMPANY", "STATUS", "PRIORITY", "SALARY"
    );
    let _ = writeln!(out, "{}", "-".repeat(130));
    for app in applications {
        let company = app.company.as_ref().map(|c| c.name.as_str());
        let _ = writeln!(
            out,
            "{:<36}  {:<28} {:<16} {:<22} {:<8} {:>14}",
            app.id,
            truncate(&app.job_title, 28),
            truncate(or_dash(company), 16),
            truncate(app.status.label(), 22),
            app.priority.label(),
            salary_range(app.salary_min, app.salary_max)
        );
    }
    out
}

/// `suggested` is the advisory priority shown next to the stored one.
pub fn application_detail(app: &Application, suggested: Priority) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", app.job_title, app.id);
    if let Some(company) = &app.company {
        let _ = writeln!(out, "Company: {} ({})", company.name, company.id);
    }
    let _ = writeln!(out, "Status: {}", app.status.label());
    let _ = writeln!(
        out,
        "Priority: {} (suggested: {})",
        app.priority.label(),
        suggested.label()
    );
    let _ = writeln!(out, "Preference: {}", app.preference.label());
    let _ = writeln!(out, "Location: {} ({})", or_dash(app.location.as_deref()), label(app.remote_type));
    let _ = writeln!(out, "Salary: {}", salary_range(app.salary_min, app.salary_max));
    let _ = writeln!(out, "Posted: {}", date(app.posted_date));
    let _ = writeln!(out, "Posting ends: {}", date(app.posting_end_date));
    let _ = writeln!(out, "Applied: {}", date(app.applied_date));
    let _ = writeln!(out, "Offer deadline: {}", date(app.offer_deadline));
    let _ = writeln!(out, "Link: {}", or_dash(app.job_link()));
    if let Some(requirements) = app.requirements.as_deref().filter(|r| !r.is_empty()) {
        let _ = writeln!(out, "Requirements: {requirements}");
    }
    if let Some(comments) = app.comments.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "Comments: {comments}");
    }

    let _ = writeln!(out, "\nContacts ({}):", app.contact_links.len());
    for link in &app.contact_links {
        let name = link.contact.as_ref().map(|c| c.name.as_str());
        let _ = writeln!(
            out,
            "  link {}  {} [{}]",
            link.id,
            or_dash(name),
            or_dash(link.role.as_deref())
        );
    }
    out
}
