use chrono::{DateTime, Utc};

use crate::models::{Application, Preference, Priority};

const MS_PER_DAY: i64 = 86_400_000;

/// Inputs to the suggested priority of an application.
#[derive(Debug, Clone, Copy)]
pub struct PriorityInputs {
    pub preference: Preference,
    pub has_contacts: bool,
    pub posted_date: Option<DateTime<Utc>>,
    pub posting_end_date: Option<DateTime<Utc>>,
}

impl From<&Application> for PriorityInputs {
    fn from(app: &Application) -> Self {
        Self {
            preference: app.preference,
            has_contacts: !app.contact_links.is_empty(),
            posted_date: app.posted_date,
            posting_end_date: app.posting_end_date,
        }
    }
}

fn preference_weight(preference: Preference) -> i32 {
    match preference {
        Preference::StronglyPrefer => 3,
        Preference::Prefer => 2,
        Preference::Neutral => 1,
        Preference::Avoid => -1,
        Preference::Dealbreaker => -3,
    }
}

/// Whole days from `from` to `to`, rounded toward negative infinity.
fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds().div_euclid(MS_PER_DAY)
}

pub fn score(inputs: &PriorityInputs, now: DateTime<Utc>) -> i32 {
    let mut score = preference_weight(inputs.preference);

    if inputs.has_contacts {
        score += 2;
    }

    // Deadlines already passed count as closing soon.
    if let Some(end) = inputs.posting_end_date {
        let days_until_end = days_between(now, end);
        if days_until_end <= 3 {
            score += 2;
        } else if days_until_end <= 7 {
            score += 1;
        }
    }

    if let Some(posted) = inputs.posted_date {
        if days_between(posted, now) <= 2 {
            score += 1;
        }
    }

    score
}

/// Advisory priority: 5 and above is high, 2 and above is medium.
pub fn suggest_priority(inputs: &PriorityInputs, now: DateTime<Utc>) -> Priority {
    match score(inputs, now) {
        s if s >= 5 => Priority::High,
        s if s >= 2 => Priority::Medium,
        _ => Priority::Low,
    }
}
