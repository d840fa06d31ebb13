//! Filter Engine — case-insensitive substring search over the domain → role → skill tree.
//!
//! Works at domain granularity: a term that only matches one role's skill still
//! returns the whole parent domain. Results keep dataset order.

use crate::models::catalog::{Domain, Role};

/// Returns the domains matching `term`, in their original order.
///
/// An empty term matches everything. Whitespace is not trimmed: `" "` is a
/// real search for a space.
pub fn filter_domains<'a>(term: &str, domains: &'a [Domain]) -> Vec<&'a Domain> {
    if term.is_empty() {
        return domains.iter().collect();
    }

    let term = term.to_lowercase();
    domains
        .iter()
        .filter(|domain| domain_matches(domain, &term))
        .collect()
}

/// `term` must already be lowercased.
fn domain_matches(domain: &Domain, term: &str) -> bool {
    contains_ci(&domain.title, term)
        || domain.skills.iter().any(|s| contains_ci(s, term))
        || domain.roles.iter().any(|r| role_matches(r, term))
}

fn role_matches(role: &Role, term: &str) -> bool {
    contains_ci(&role.title, term) || role.skills.iter().any(|s| contains_ci(s, term))
}

fn contains_ci(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(title: &str, skills: &[&str]) -> Role {
        Role {
            title: title.to_string(),
            description: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn domain(id: u32, title: &str, skills: &[&str], roles: Vec<Role>) -> Domain {
        Domain {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            roles,
        }
    }

    fn dataset() -> Vec<Domain> {
        vec![
            domain(
                1,
                "Web Dev",
                &["React", "CSS"],
                vec![role("Frontend Developer", &["React", "TypeScript"])],
            ),
            domain(
                2,
                "Cyber",
                &["Networking"],
                vec![role("Analyst", &["SIEM", "Firewall"])],
            ),
            domain(
                3,
                "IT Ops",
                &["Linux"],
                vec![role("SOC Engineer", &["Firewall", "Linux"])],
            ),
        ]
    }

    fn ids(result: &[&Domain]) -> Vec<u32> {
        result.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let data = dataset();
        let result = filter_domains("", &data);
        let expected: Vec<&Domain> = data.iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_lowercase_term_matches_domain_skill() {
        let data = dataset();
        assert_eq!(ids(&filter_domains("react", &data)), vec![1]);
    }

    #[test]
    fn test_uppercase_term_matches_case_insensitively() {
        let data = dataset();
        assert_eq!(ids(&filter_domains("CYB", &data)), vec![2]);
    }

    #[test]
    fn test_role_title_match_returns_parent_domain() {
        let data = dataset();
        assert_eq!(ids(&filter_domains("soc eng", &data)), vec![3]);
    }

    #[test]
    fn test_role_skill_only_match_returns_whole_domain() {
        let data = dataset();
        let result = filter_domains("siem", &data);
        assert_eq!(ids(&result), vec![2]);
        assert_eq!(result[0].roles.len(), 1);
    }

    #[test]
    fn test_multiple_matches_keep_dataset_order() {
        let data = dataset();
        assert_eq!(ids(&filter_domains("firewall", &data)), vec![2, 3]);
        assert_eq!(ids(&filter_domains("e", &data)), vec![1, 2, 3]);
    }

    #[test]
    fn test_unmatched_term_returns_empty() {
        let data = dataset();
        assert!(filter_domains("zzzznotfound", &data).is_empty());
    }

    #[test]
    fn test_whitespace_term_is_not_trimmed() {
        let data = dataset();
        // Only "Web Dev", "IT Ops", "Frontend Developer" and "SOC Engineer" contain a space.
        assert_eq!(ids(&filter_domains(" ", &data)), vec![1, 3]);
    }

    #[test]
    fn test_every_result_contains_term_somewhere() {
        let data = dataset();
        for term in ["li", "an", "fire", "dev", "x"] {
            for d in filter_domains(term, &data) {
                let needle = term.to_lowercase();
                let hit = d.title.to_lowercase().contains(&needle)
                    || d.skills.iter().any(|s| s.to_lowercase().contains(&needle))
                    || d.roles.iter().any(|r| {
                        r.title.to_lowercase().contains(&needle)
                            || r.skills.iter().any(|s| s.to_lowercase().contains(&needle))
                    });
                assert!(hit, "domain {} returned for '{term}' without a match", d.title);
            }
        }
    }
}
