use std::collections::HashMap;

/// The variables visible while resolving one load. Starts as a copy of the
/// process environment (or empty) and then accumulates `<variable>`
/// declarations; the process environment itself is never written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    table: HashMap<String, String>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Scope {
        Scope {
            table: HashMap::new(),
        }
    }

    /// A snapshot of the current process environment. Entries that are not
    /// valid Unicode are left out.
    pub fn from_environment() -> Scope {
        Scope {
            table: std::env::vars_os()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Scope {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.table
            .get(name)
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table
            .contains_key(name)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.table
            .insert(name.to_string(), value.to_string());
    }

    /// Apply a declaration. An existing value is only replaced when
    /// `overwrite` is set; returns whether the scope changed.
    pub fn declare(&mut self, name: &str, value: &str, overwrite: bool) -> bool {
        if self.contains(name) && !overwrite {
            return false;
        }
        self.insert(name, value);
        true
    }

    pub fn len(&self) -> usize {
        self.table
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.table
            .is_empty()
    }
}

impl FromIterator<(String, String)> for Scope {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Scope {
            table: iter
                .into_iter()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_declarations() {
        let mut scope = Scope::new().with_variable("DATA", "/data");

        assert!(!scope.declare("DATA", "/other", false));
        assert_eq!(scope.get("DATA"), Some("/data"));

        assert!(scope.declare("DATA", "/other", true));
        assert_eq!(scope.get("DATA"), Some("/other"));

        assert!(scope.declare("RUN", "17", false));
        assert_eq!(scope.get("RUN"), Some("17"));
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn environment_is_copied() {
        let scope = Scope::from_environment();
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(scope.get("PATH"), Some(path.as_str()));
        }
    }

    #[test]
    fn collecting_pairs() {
        let scope: Scope = vec![("A".to_string(), "1".to_string())]
            .into_iter()
            .collect();
        assert_eq!(scope.get("A"), Some("1"));
        assert!(!scope.is_empty());
    }
}
