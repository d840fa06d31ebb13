//! Catalog dataset — loaded once at startup, read-only afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::catalog::{Domain, Role};

/// Dataset compiled into the binary, used when `CATALOG_PATH` is not set.
const BUILTIN_DATASET: &str = include_str!("../../data/job_domains.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetWarning {
    DuplicateDomainId { id: u32 },
    /// Related-role ranking treats every role with this title as "self".
    SharedRoleTitle { title: String, domain_ids: Vec<u32> },
    EmptyDomain { id: u32 },
}

/// Immutable collection of domains. Shared across handlers as `Arc<Catalog>`.
#[derive(Debug, Clone)]
pub struct Catalog {
    domains: Vec<Domain>,
    warnings: Vec<DatasetWarning>,
}

impl Catalog {
    pub fn new(domains: Vec<Domain>) -> Self {
        let warnings = audit(&domains);
        for w in &warnings {
            warn!("Dataset audit: {w:?}");
        }
        Catalog { domains, warnings }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_DATASET)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let domains: Vec<Domain> = serde_json::from_str(raw)?;
        Ok(Self::new(domains))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Loads from `path` when given, otherwise the built-in dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::builtin()?,
        };
        info!(
            "Catalog loaded: {} domains, {} roles ({})",
            catalog.domains.len(),
            catalog.role_count(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        Ok(catalog)
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, id: u32) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    /// First role with this exact title, in dataset order, with its domain.
    pub fn find_role(&self, title: &str) -> Option<(&Domain, &Role)> {
        self.domains
            .iter()
            .find_map(|d| d.role(title).map(|r| (d, r)))
    }

    pub fn role_count(&self) -> usize {
        self.domains.iter().map(|d| d.roles.len()).sum()
    }

    pub fn audit(&self) -> &[DatasetWarning] {
        &self.warnings
    }
}

/// Non-blocking consistency checks. Nothing here rejects the dataset.
fn audit(domains: &[Domain]) -> Vec<DatasetWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for domain in domains {
        if !seen_ids.insert(domain.id) {
            warnings.push(DatasetWarning::DuplicateDomainId { id: domain.id });
        }
        if domain.roles.is_empty() {
            warnings.push(DatasetWarning::EmptyDomain { id: domain.id });
        }
    }

    // title -> owning domain ids, first-seen order
    let mut titles: Vec<(&str, Vec<u32>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for domain in domains {
        for role in &domain.roles {
            match index.get(role.title.as_str()) {
                Some(&i) => titles[i].1.push(domain.id),
                None => {
                    index.insert(role.title.as_str(), titles.len());
                    titles.push((role.title.as_str(), vec![domain.id]));
                }
            }
        }
    }
    for (title, domain_ids) in titles {
        if domain_ids.len() > 1 {
            warnings.push(DatasetWarning::SharedRoleTitle {
                title: title.to_string(),
                domain_ids,
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#"[
        {"id": 1, "title": "Cyber", "description": "d", "skills": ["Networking"],
         "roles": [{"title": "Analyst", "description": "r", "skills": ["SIEM", "Firewall"]}]},
        {"id": 2, "title": "IT Ops", "description": "d", "skills": ["Linux"],
         "roles": [{"title": "SOC Engineer", "description": "r", "skills": ["Firewall", "Linux"]}]}
    ]"#;

    #[test]
    fn test_builtin_dataset_parses_and_is_clean() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.domains().is_empty());
        assert!(catalog.role_count() >= catalog.domains().len());
        assert!(catalog.audit().is_empty(), "{:?}", catalog.audit());
    }

    #[test]
    fn test_builtin_domain_ids_are_unique() {
        let catalog = Catalog::builtin().unwrap();
        let ids: HashSet<u32> = catalog.domains().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), catalog.domains().len());
    }

    #[test]
    fn test_lookup_by_id_and_role_title() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        assert_eq!(catalog.domain(2).unwrap().title, "IT Ops");
        assert!(catalog.domain(99).is_none());

        let (domain, role) = catalog.find_role("Analyst").unwrap();
        assert_eq!(domain.id, 1);
        assert_eq!(role.skills, vec!["SIEM", "Firewall"]);
        assert!(catalog.find_role("analyst").is_none());
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.domains().len(), 2);
        assert_eq!(catalog.role_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Catalog::from_json(r#"[{"id": 1, "title": "x"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_audit_reports_but_keeps_inconsistent_data() {
        let raw = r#"[
            {"id": 1, "title": "A", "description": "", "skills": [],
             "roles": [{"title": "Developer", "description": "", "skills": ["Rust"]}]},
            {"id": 1, "title": "B", "description": "", "skills": [],
             "roles": [{"title": "Developer", "description": "", "skills": ["Go"]}]},
            {"id": 3, "title": "C", "description": "", "skills": [], "roles": []}
        ]"#;
        let catalog = Catalog::from_json(raw).unwrap();

        assert_eq!(catalog.domains().len(), 3);
        assert_eq!(
            catalog.audit(),
            &[
                DatasetWarning::DuplicateDomainId { id: 1 },
                DatasetWarning::EmptyDomain { id: 3 },
                DatasetWarning::SharedRoleTitle {
                    title: "Developer".to_string(),
                    domain_ids: vec![1, 1],
                },
            ]
        );
    }
}
