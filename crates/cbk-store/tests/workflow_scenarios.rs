//! End-to-end workflow scenarios through `CaseService`.

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use cbk_core::clock::ManualClock;
use cbk_core::entities::{Actor, Case};
use cbk_core::errors::CoreError;
use cbk_core::enums::{AuditAction, CaseKind, CaseStatus, Role, Severity};
use cbk_core::responses::AuditExport;
use cbk_core::transition::TransitionPolicy;
use cbk_store::{AuditFilter, AuditRecorder, CaseFilter, CaseService, CaseStore};

type Step = fn(&mut CaseService) -> Result<Case, CoreError>;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn build(policy: TransitionPolicy) -> (CaseService, ManualClock) {
    let store = CaseStore::from_cases([
        Case::new("m1", CaseKind::ModerationItem, Severity::Critical, "Gore in #general", t0()),
        Case::new("m2", CaseKind::ModerationItem, Severity::Low, "Avatar", t0())
            .with_status(CaseStatus::Approved),
        Case::new("m3", CaseKind::ModerationItem, Severity::High, "Phishing", t0()),
        Case::new("r1", CaseKind::UserReport, Severity::High, "DM harassment", t0()),
        Case::new("t1", CaseKind::SupportTicket, Severity::Medium, "Password reset", t0()),
    ])
    .unwrap();
    let clock = ManualClock::new(t0());
    let svc = CaseService::new(
        store,
        AuditRecorder::new(),
        policy,
        Actor::new("dana", Role::Moderator),
    )
    .with_clock(clock.clone());
    (svc, clock)
}

#[test]
fn approve_flow() {
    let (mut svc, clock) = build(TransitionPolicy::default());
    let before = svc.get("m1").unwrap().updated_at;
    clock.advance(Duration::seconds(30));

    let case = svc.approve("m1", None).unwrap();

    assert_eq!(case.status, CaseStatus::Approved);
    assert!(case.updated_at > before);
    assert_eq!(svc.audit().len(), 1);
    let entry = svc.audit().last().unwrap();
    assert_eq!(entry.action, AuditAction::ContentApproved);
    assert_eq!(entry.target_id, "m1");
}

#[test]
fn illegal_transition_leaves_state_untouched() {
    let (mut svc, _) = build(TransitionPolicy::default());
    let before = svc.get("m2").unwrap().clone();

    let err = svc.remove("m2", None).unwrap_err();

    assert!(err.is_illegal_transition(), "{err}");
    assert_eq!(svc.get("m2").unwrap(), &before);
    assert!(svc.audit().is_empty());
}

#[test]
fn resolve_requires_note() {
    let (mut svc, _) = build(TransitionPolicy::default());
    let before = svc.get("r1").unwrap().clone();

    let err = svc.resolve("r1", "warned_user", "").unwrap_err();

    assert!(err.is_validation(), "{err}");
    assert_eq!(svc.get("r1").unwrap(), &before);
    assert!(svc.audit().is_empty());
}

#[test]
fn export_round_trip() {
    let (mut svc, clock) = build(TransitionPolicy::default());
    svc.assign("m3", "tm-1").unwrap();
    clock.advance(Duration::minutes(1));
    svc.add_note("t1", "Asked for account email").unwrap();
    clock.advance(Duration::minutes(1));
    svc.resolve("r1", "warned_user", "First offence").unwrap();

    let export = svc.export();
    let json = export.to_json_pretty().unwrap();
    let parsed: AuditExport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.entries.len(), 3);
    assert_eq!(parsed, export);
    let targets: Vec<&str> = parsed.entries.iter().map(|e| e.target_id.as_str()).collect();
    assert_eq!(targets, ["r1", "t1", "m3"]);
}

#[test]
fn audit_grows_by_one_per_accepted_action() {
    let (mut svc, _) = build(TransitionPolicy::default());
    let steps: [Step; 6] = [
        |s: &mut CaseService| s.assign("m1", "tm-1"),
        |s: &mut CaseService| s.approve("m2", None),
        |s: &mut CaseService| s.escalate("m1", Some("needs legal"), None),
        |s: &mut CaseService| s.add_note("m1", "   "),
        |s: &mut CaseService| s.dismiss("r1", "No evidence"),
        |s: &mut CaseService| s.set_ticket_status("t1", CaseStatus::Resolved),
    ];

    for step in steps {
        let before = svc.audit().len();
        match step(&mut svc) {
            Ok(case) => {
                assert_eq!(svc.audit().len(), before + 1);
                assert_eq!(svc.audit().last().unwrap().target_id, case.id);
            }
            Err(_) => assert_eq!(svc.audit().len(), before),
        }
    }
    assert_eq!(svc.audit().len(), 4);
}

#[rstest]
#[case::approve(|s: &mut CaseService| s.approve("m1", None))]
#[case::remove(|s: &mut CaseService| s.remove("m1", Some("again")))]
#[case::escalate(|s: &mut CaseService| s.escalate("m1", None, None))]
#[case::assign(|s: &mut CaseService| s.assign("m1", "tm-9"))]
#[case::note(|s: &mut CaseService| s.add_note("m1", "late note"))]
fn moderation_terminal_lock(#[case] action: Step) {
    let (mut svc, _) = build(TransitionPolicy::default());
    svc.remove("m1", None).unwrap();
    let locked = svc.get("m1").unwrap().clone();

    let err = action(&mut svc).unwrap_err();

    assert!(err.is_illegal_transition(), "{err}");
    assert_eq!(svc.get("m1").unwrap(), &locked);
    assert_eq!(svc.audit().len(), 1);
}

#[test]
fn closed_ticket_reopen_follows_policy() {
    let (mut strict, _) = build(TransitionPolicy::default());
    strict.set_ticket_status("t1", CaseStatus::Closed).unwrap();
    assert!(
        strict
            .set_ticket_status("t1", CaseStatus::Open)
            .unwrap_err()
            .is_illegal_transition()
    );

    let (mut lenient, _) = build(TransitionPolicy {
        allow_ticket_reopen: true,
    });
    lenient.set_ticket_status("t1", CaseStatus::Closed).unwrap();
    let reopened = lenient.set_ticket_status("t1", CaseStatus::Open).unwrap();
    assert_eq!(reopened.status, CaseStatus::Open);
}

#[test]
fn queue_order_is_stable_across_transitions() {
    let (mut svc, _) = build(TransitionPolicy::default());
    let order = |svc: &CaseService| -> Vec<String> {
        svc.list(&CaseFilter::default(), None)
            .iter()
            .map(|c| c.id.clone())
            .collect()
    };
    let initial = order(&svc);
    assert_eq!(initial, ["m1", "m3", "r1", "t1", "m2"]);

    svc.add_note("m3", "checked domain").unwrap();
    assert_eq!(order(&svc), initial);
}

#[test]
fn audit_filter_by_target_and_action() {
    let (mut svc, _) = build(TransitionPolicy::default());
    svc.assign("m1", "tm-1").unwrap();
    svc.approve("m1", None).unwrap();
    svc.assign("m3", "tm-2").unwrap();

    let m1 = svc.audit_log(&AuditFilter {
        target_id: Some("m1".into()),
        ..AuditFilter::default()
    });
    assert_eq!(
        m1.iter().map(|e| e.action).collect::<Vec<_>>(),
        [AuditAction::ContentApproved, AuditAction::CaseAssigned]
    );

    let assigns = svc.audit_log(&AuditFilter {
        action: Some(AuditAction::CaseAssigned),
        ..AuditFilter::default()
    });
    assert_eq!(assigns.len(), 2);
}
