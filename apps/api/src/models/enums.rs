//! Enumerated columns. Each enum is stored as upper-snake text and exposed
//! as a GraphQL enum with the same item names.

use async_graphql::Enum;

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
    Enterprise,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyType {
    Startup,
    Private,
    Public,
    Nonprofit,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
    Principal,
    Vp,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    #[default]
    ToReachOut,
    ReachedOut,
    Responded,
    Connected,
    MeetingScheduled,
    Referred,
    NoResponse,
    NotInterested,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    NotStarted,
    AppliedNoReferral,
    AppliedWithReferral,
    PhoneScreen,
    EarlyStages,
    FinalRound,
    OfferReceived,
    OfferAccepted,
    OfferDeclined,
    Rejected,
    Withdrawn,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteType {
    Onsite,
    Hybrid,
    Remote,
    Flexible,
}

#[derive(Enum, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Preference {
    Dealbreaker,
    Avoid,
    #[default]
    Neutral,
    Prefer,
    StronglyPrefer,
}
