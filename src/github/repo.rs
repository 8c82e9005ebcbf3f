use anyhow::{Result, anyhow};
use std::str::FromStr;

/// A configured repository, identified by owner and name.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!("Invalid repository format. Expected 'owner/repo'."))
        } else {
            Ok(RepoRef::new(parts[0], parts[1]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse() {
        let repo: RepoRef = "rust-lang/rust".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_repo_ref_parse_trims_whitespace() {
        let repo: RepoRef = "  owner / repo  ".parse().unwrap();
        assert_eq!(repo, RepoRef::new("owner", "repo"));
    }

    #[test]
    fn test_repo_ref_display() {
        let repo = RepoRef::new("owner", "repo");
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn test_repo_ref_invalid() {
        assert!("invalid".parse::<RepoRef>().is_err());
        assert!("".parse::<RepoRef>().is_err());
        assert!("/repo".parse::<RepoRef>().is_err());
        assert!("owner/".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
    }
}
