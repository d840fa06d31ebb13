//! Related Roles — ranks other roles by how many skills they share with a selected role.
//!
//! Default: `SkillOverlapRecommender` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn RoleRecommender>` so the ranking can be swapped
//! (e.g. for an inverted skill index on large catalogs) without touching handlers.

use std::collections::HashSet;

use crate::models::catalog::{Domain, RelatedRoleEntry, Role};

/// Maximum number of related roles returned for a selection.
pub const MAX_RELATED_ROLES: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Ranks alternative roles for a selected one.
pub trait RoleRecommender: Send + Sync {
    fn related(&self, selected: &Role, domains: &[Domain]) -> Vec<RelatedRoleEntry>;

    /// Label reported to clients, for transparency.
    fn backend(&self) -> &'static str;
}

/// Counts case-insensitive shared skills across the whole catalog.
pub struct SkillOverlapRecommender;

impl RoleRecommender for SkillOverlapRecommender {
    fn related(&self, selected: &Role, domains: &[Domain]) -> Vec<RelatedRoleEntry> {
        related_roles(selected, domains)
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core overlap ranking
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. Lowercase the selected role's skills into a set.
/// 2. Scan every role of every domain in dataset order.
/// 3. Skip roles whose title equals `selected.title` exactly. Identically titled
///    roles in other domains are skipped too.
/// 4. overlap = distinct (case-insensitive) candidate skills found in the set.
/// 5. Keep overlap > 0, stable-sort by overlap descending, take the top 3.
pub fn related_roles(selected: &Role, domains: &[Domain]) -> Vec<RelatedRoleEntry> {
    let selected_skills: HashSet<String> =
        selected.skills.iter().map(|s| s.to_lowercase()).collect();

    if selected_skills.is_empty() {
        return Vec::new();
    }

    let mut related: Vec<RelatedRoleEntry> = domains
        .iter()
        .flat_map(|domain| domain.roles.iter().map(move |role| (domain, role)))
        .filter(|(_, role)| role.title != selected.title)
        .filter_map(|(domain, role)| {
            let overlap_count = count_overlap(&role.skills, &selected_skills);
            (overlap_count > 0).then(|| RelatedRoleEntry {
                role: role.clone(),
                domain_title: domain.title.clone(),
                domain_id: domain.id,
                overlap_count,
            })
        })
        .collect();

    // sort_by is stable: ties keep scan order
    related.sort_by(|a, b| b.overlap_count.cmp(&a.overlap_count));
    related.truncate(MAX_RELATED_ROLES);
    related
}

/// Duplicate skills in the candidate list count once.
fn count_overlap(candidate_skills: &[String], selected: &HashSet<String>) -> usize {
    candidate_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<HashSet<_>>()
        .iter()
        .filter(|s| selected.contains(*s))
        .count()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
