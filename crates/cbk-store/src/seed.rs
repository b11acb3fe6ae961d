//! Built-in sample dataset used by `cbk init`.

use chrono::{DateTime, Duration, Utc};

use cbk_core::entities::Case;
use cbk_core::enums::{CaseKind, CaseStatus, Severity};

struct SeedCase {
    id: &'static str,
    kind: CaseKind,
    status: CaseStatus,
    severity: Severity,
    title: &'static str,
    reported_by: &'static str,
    assigned_to: Option<&'static str>,
    age_minutes: i64,
}

const SEED: &[SeedCase] = &[
    SeedCase {
        id: "m1",
        kind: CaseKind::ModerationItem,
        status: CaseStatus::Pending,
        severity: Severity::Critical,
        title: "Graphic violence posted in #general",
        reported_by: "auto_filter",
        assigned_to: None,
        age_minutes: 12,
    },
    SeedCase {
        id: "m2",
        kind: CaseKind::ModerationItem,
        status: CaseStatus::Approved,
        severity: Severity::Low,
        title: "Profile picture flagged as explicit",
        reported_by: "auto_filter",
        assigned_to: Some("tm-2"),
        age_minutes: 240,
    },
    SeedCase {
        id: "m3",
        kind: CaseKind::ModerationItem,
        status: CaseStatus::Reviewing,
        severity: Severity::High,
        title: "Suspected phishing link in marketplace listing",
        reported_by: "user_4412",
        assigned_to: Some("tm-1"),
        age_minutes: 45,
    },
    SeedCase {
        id: "m4",
        kind: CaseKind::ModerationItem,
        status: CaseStatus::Pending,
        severity: Severity::Medium,
        title: "Repeated spam comments on announcement",
        reported_by: "user_0921",
        assigned_to: None,
        age_minutes: 90,
    },
    SeedCase {
        id: "r1",
        kind: CaseKind::UserReport,
        status: CaseStatus::New,
        severity: Severity::High,
        title: "Harassment in direct messages",
        reported_by: "user_1187",
        assigned_to: None,
        age_minutes: 30,
    },
    SeedCase {
        id: "r2",
        kind: CaseKind::UserReport,
        status: CaseStatus::InReview,
        severity: Severity::Medium,
        title: "Impersonation of a staff account",
        reported_by: "user_2290",
        assigned_to: Some("tm-3"),
        age_minutes: 180,
    },
    SeedCase {
        id: "r3",
        kind: CaseKind::UserReport,
        status: CaseStatus::New,
        severity: Severity::Medium,
        title: "Harassment in direct messages (second report)",
        reported_by: "user_3051",
        assigned_to: None,
        age_minutes: 20,
    },
    SeedCase {
        id: "t1",
        kind: CaseKind::SupportTicket,
        status: CaseStatus::Open,
        severity: Severity::Medium,
        title: "Cannot reset password",
        reported_by: "user_7730",
        assigned_to: None,
        age_minutes: 60,
    },
    SeedCase {
        id: "t2",
        kind: CaseKind::SupportTicket,
        status: CaseStatus::Pending,
        severity: Severity::Low,
        title: "Appeal of content removal",
        reported_by: "user_5512",
        assigned_to: Some("tm-4"),
        age_minutes: 600,
    },
    SeedCase {
        id: "t3",
        kind: CaseKind::SupportTicket,
        status: CaseStatus::Closed,
        severity: Severity::Low,
        title: "Billing receipt missing",
        reported_by: "user_6604",
        assigned_to: Some("tm-4"),
        age_minutes: 2_880,
    },
];

/// The sample cases, timestamped relative to `now`, in insertion order.
#[must_use]
pub fn seed_cases(now: DateTime<Utc>) -> Vec<Case> {
    SEED.iter()
        .map(|s| {
            let created = now - Duration::minutes(s.age_minutes);
            let mut case = Case::new(s.id, s.kind, s.severity, s.title, created)
                .with_status(s.status)
                .with_reporter(s.reported_by);
            case.assigned_to = s.assigned_to.map(String::from);
            case
        })
        .collect()
}
