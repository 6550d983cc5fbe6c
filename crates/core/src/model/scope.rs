use std::fmt;
use std::str::FromStr;

/// Which slice of a bank a record covers: every category, or one of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    All,
    Category(String),
}

impl Scope {
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    /// Whether an item in `category` belongs to this scope.
    #[must_use]
    pub fn includes(&self, category: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Category(name) => name == category,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Scope::All => "all",
            Scope::Category(name) => name,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Scope::All)
        } else {
            Ok(Scope::Category(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_includes_everything() {
        assert!(Scope::All.includes("Docker"));
        assert!(Scope::category("Docker").includes("Docker"));
        assert!(!Scope::category("Docker").includes("docker"));
    }

    #[test]
    fn parses_all_keyword() {
        assert_eq!("ALL".parse::<Scope>().unwrap(), Scope::All);
        assert_eq!("Terraform".parse::<Scope>().unwrap(), Scope::category("Terraform"));
    }
}
