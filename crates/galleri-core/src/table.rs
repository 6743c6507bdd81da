use std::fmt;

/// Target table for a load.
///
/// Tables are namespaced per deployment environment (`dev-9-PhlebotomySite`).
/// The environment is passed in explicitly; nothing here reads process state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `{environment}-{base}`, or just `base` when no environment is set.
    pub fn namespaced(environment: Option<&str>, base: &str) -> Self {
        match environment.map(str::trim).filter(|env| !env.is_empty()) {
            Some(env) => Self(format!("{}-{}", env, base)),
            None => Self(base.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_prefixes_environment() {
        let table = TableName::namespaced(Some("dev-9"), "UniqueLsoa");
        assert_eq!(table.as_str(), "dev-9-UniqueLsoa");
    }

    #[test]
    fn blank_environment_leaves_base_name() {
        assert_eq!(TableName::namespaced(None, "Population").as_str(), "Population");
        assert_eq!(
            TableName::namespaced(Some("  "), "Population").as_str(),
            "Population"
        );
    }
}
