use serde::{Deserialize, Serialize};

/// Number of skills shown on a domain card before collapsing into "+N more".
pub const SKILL_PREVIEW_LEN: usize = 4;

/// A specific job title within a domain.
/// Identified across the catalog by its `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

/// Top-level career category grouping related roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub roles: Vec<Role>,
}

impl Domain {
    pub fn role(&self, title: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.title == title)
    }
}

/// A role that shares skills with the currently selected one, plus the
/// domain it lives in. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRoleEntry {
    pub role: Role,
    pub domain_title: String,
    pub domain_id: u32,
    pub overlap_count: usize,
}

/// Card-sized view of a domain for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub role_count: usize,
    pub skill_preview: Vec<String>,
    /// Skills beyond the preview, rendered as "+N more".
    pub more_skills: usize,
}

impl From<&Domain> for DomainSummary {
    fn from(domain: &Domain) -> Self {
        let skill_preview: Vec<String> = domain
            .skills
            .iter()
            .take(SKILL_PREVIEW_LEN)
            .cloned()
            .collect();

        DomainSummary {
            id: domain.id,
            title: domain.title.clone(),
            description: domain.description.clone(),
            role_count: domain.roles.len(),
            more_skills: domain.skills.len().saturating_sub(SKILL_PREVIEW_LEN),
            skill_preview,
        }
    }
}
