//! Case store: current-state snapshot of every case, in insertion order.
//!
//! Records are replaced whole, never edited in place. Listing is a pure
//! filter plus a stable sort, so equal keys keep insertion order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use cbk_core::entities::Case;
use cbk_core::enums::{CaseKind, CaseStatus};
use cbk_core::errors::CoreError;
use cbk_core::responses::CaseStats;

/// Filter criteria for case queries. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub kind: Option<CaseKind>,
    pub assignee: Option<String>,
    pub search: Option<String>,
}

impl CaseFilter {
    #[must_use]
    pub fn matches(&self, case: &Case) -> bool {
        self.status.is_none_or(|s| case.status == s)
            && self.kind.is_none_or(|k| case.kind == k)
            && self
                .assignee
                .as_deref()
                .is_none_or(|a| case.assigned_to.as_deref() == Some(a))
            && self.search.as_deref().is_none_or(|q| case.matches_text(q))
    }
}

/// Queue display order: severity rank descending, then newest first.
#[must_use]
pub fn queue_order(a: &Case, b: &Case) -> Ordering {
    b.severity
        .rank()
        .cmp(&a.severity.rank())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    cases: Vec<Case>,
    index: HashMap<String, usize>,
}

impl CaseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in the given order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on duplicate ids or kind/status mismatches.
    pub fn from_cases(cases: impl IntoIterator<Item = Case>) -> Result<Self, CoreError> {
        let mut store = Self::new();
        for case in cases {
            store.insert(case)?;
        }
        Ok(store)
    }

    /// Append a new record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the id already exists or the record
    /// is inconsistent.
    pub fn insert(&mut self, case: Case) -> Result<(), CoreError> {
        case.validate()?;
        if self.index.contains_key(&case.id) {
            return Err(CoreError::Validation(format!(
                "case {} already exists",
                case.id
            )));
        }
        self.index.insert(case.id.clone(), self.cases.len());
        self.cases.push(case);
        Ok(())
    }

    /// Look up a case by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent.
    pub fn get(&self, id: &str) -> Result<&Case, CoreError> {
        self.index
            .get(id)
            .map(|&i| &self.cases[i])
            .ok_or_else(|| CoreError::case_not_found(id))
    }

    /// Swap in a new version of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if `id` is absent, or
    /// `CoreError::Validation` if the replacement changes id or kind or
    /// carries a status foreign to its kind.
    pub fn replace(&mut self, id: &str, case: Case) -> Result<(), CoreError> {
        let &slot = self
            .index
            .get(id)
            .ok_or_else(|| CoreError::case_not_found(id))?;
        if case.id != id {
            return Err(CoreError::Validation(format!(
                "replacement for {id} carries id {}",
                case.id
            )));
        }
        if case.kind != self.cases[slot].kind {
            return Err(CoreError::Validation(format!(
                "case {id} cannot change kind from {} to {}",
                self.cases[slot].kind, case.kind
            )));
        }
        case.validate()?;
        self.cases[slot] = case;
        Ok(())
    }

    /// Cases matching `filter`, sorted by `compare`. The sort is stable.
    pub fn list<F>(&self, filter: &CaseFilter, compare: F) -> Vec<&Case>
    where
        F: FnMut(&&Case, &&Case) -> Ordering,
    {
        let mut matched: Vec<&Case> = self.cases.iter().filter(|c| filter.matches(c)).collect();
        matched.sort_by(compare);
        matched
    }

    /// Cases matching `filter` in queue display order.
    #[must_use]
    pub fn queue(&self, filter: &CaseFilter) -> Vec<&Case> {
        self.list(filter, |a, b| queue_order(a, b))
    }

    /// All cases in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Per-kind, per-status counts.
    #[must_use]
    pub fn stats(&self) -> CaseStats {
        let mut by_kind: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut stats = CaseStats::default();
        for case in &self.cases {
            stats.total += 1;
            if !case.is_terminal() {
                stats.open += 1;
            }
            if case.assigned_to.is_none() {
                stats.unassigned += 1;
            }
            *by_kind
                .entry(case.kind.to_string())
                .or_default()
                .entry(case.status.to_string())
                .or_default() += 1;
        }
        stats.by_kind = by_kind;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbk_core::enums::Severity;
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn moderation(id: &str, severity: Severity, minutes: i64) -> Case {
        Case::new(
            id,
            CaseKind::ModerationItem,
            severity,
            format!("item {id}"),
            t0() + Duration::minutes(minutes),
        )
    }

    fn ids(cases: &[&Case]) -> Vec<String> {
        cases.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn insert_and_get() {
        let mut store = CaseStore::new();
        store.insert(moderation("m1", Severity::Low, 0)).unwrap();
        assert_eq!(store.get("m1").unwrap().id, "m1");
        assert!(store.get("m9").unwrap_err().is_not_found());
    }

    #[test]
    fn insert_rejects_duplicates_and_foreign_status() {
        let mut store = CaseStore::new();
        store.insert(moderation("m1", Severity::Low, 0)).unwrap();
        assert!(store.insert(moderation("m1", Severity::High, 1)).is_err());

        let bad = moderation("m2", Severity::Low, 0).with_status(CaseStatus::Closed);
        assert!(store.insert(bad).unwrap_err().is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_requires_existing_id() {
        let mut store = CaseStore::new();
        let err = store
            .replace("m1", moderation("m1", Severity::Low, 0))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn replace_keeps_position_and_kind() {
        let mut store =
            CaseStore::from_cases([moderation("m1", Severity::Low, 0), moderation("m2", Severity::Low, 0)])
                .unwrap();
        let updated = moderation("m1", Severity::Low, 0).with_status(CaseStatus::Approved);
        store.replace("m1", updated).unwrap();
        assert_eq!(store.get("m1").unwrap().status, CaseStatus::Approved);
        assert_eq!(
            store.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            ["m1", "m2"]
        );

        let as_ticket = Case::new("m2", CaseKind::SupportTicket, Severity::Low, "x", t0());
        assert!(store.replace("m2", as_ticket).is_err());
        assert!(store.replace("m2", moderation("m1", Severity::Low, 0)).is_err());
    }

    #[test]
    fn queue_orders_by_severity_then_recency() {
        let store = CaseStore::from_cases([
            moderation("low-old", Severity::Low, 0),
            moderation("crit-old", Severity::Critical, 0),
            moderation("med", Severity::Medium, 5),
            moderation("crit-new", Severity::Critical, 10),
        ])
        .unwrap();
        assert_eq!(
            ids(&store.queue(&CaseFilter::default())),
            ["crit-new", "crit-old", "med", "low-old"]
        );
    }

    #[test]
    fn queue_is_stable_for_equal_keys() {
        let store = CaseStore::from_cases([
            moderation("a", Severity::High, 0),
            moderation("b", Severity::High, 0),
            moderation("c", Severity::High, 0),
        ])
        .unwrap();
        for _ in 0..3 {
            assert_eq!(ids(&store.queue(&CaseFilter::default())), ["a", "b", "c"]);
        }
    }

    #[test]
    fn filter_composes_predicates() {
        let mut assigned = moderation("m2", Severity::High, 0).with_assignee("tm-1");
        assigned.notes.push("needs legal review".into());
        let store = CaseStore::from_cases([
            moderation("m1", Severity::High, 0),
            assigned,
            Case::new("t1", CaseKind::SupportTicket, Severity::High, "legal question", t0())
                .with_assignee("tm-1"),
        ])
        .unwrap();

        let filter = CaseFilter {
            assignee: Some("tm-1".into()),
            search: Some("legal".into()),
            ..CaseFilter::default()
        };
        assert_eq!(ids(&store.queue(&filter)), ["m2", "t1"]);

        let filter = CaseFilter {
            kind: Some(CaseKind::ModerationItem),
            status: Some(CaseStatus::Pending),
            ..CaseFilter::default()
        };
        assert_eq!(ids(&store.queue(&filter)), ["m1", "m2"]);
    }

    #[test]
    fn list_accepts_custom_comparator() {
        let store = CaseStore::from_cases([
            moderation("b", Severity::Low, 0),
            moderation("a", Severity::Critical, 0),
        ])
        .unwrap();
        let by_id = store.list(&CaseFilter::default(), |x, y| x.id.cmp(&y.id));
        assert_eq!(ids(&by_id), ["a", "b"]);
    }

    #[test]
    fn stats_count_kinds_and_statuses() {
        let store = CaseStore::from_cases([
            moderation("m1", Severity::Low, 0),
            moderation("m2", Severity::Low, 0).with_status(CaseStatus::Approved),
            Case::new("t1", CaseKind::SupportTicket, Severity::Low, "x", t0()).with_assignee("tm-1"),
        ])
        .unwrap();
        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.unassigned, 2);
        assert_eq!(stats.by_kind["moderation_item"]["pending"], 1);
        assert_eq!(stats.by_kind["moderation_item"]["approved"], 1);
        assert_eq!(stats.by_kind["support_ticket"]["open"], 1);
    }
}
