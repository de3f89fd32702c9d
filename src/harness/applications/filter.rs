//! Name based allow/deny filter for applications

use super::Application;
use std::collections::HashSet;

/// Keeps applications whose name is (or, inverted, is not) in a set of names
///
/// An empty filter keeps every application regardless of inversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    names: HashSet<String>,
    invert: bool,
}

impl NameFilter {
    /// Parse a comma separated list of application names
    ///
    /// Entries are trimmed and empty entries are ignored.
    pub fn parse(filter: &str, invert: bool) -> Self {
        let names = filter
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        Self { names, invert }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.is_empty() || self.names.contains(&application.name) != self.invert
    }

    pub fn apply(&self, applications: Vec<Application>) -> Vec<Application> {
        if self.is_empty() {
            return applications;
        }
        applications
            .into_iter()
            .filter(|application| {
                let keep = self.matches(application);
                if keep {
                    log::debug!(
                        "Application {} filtered based on {} match",
                        application.name,
                        if self.invert { "reverse" } else { "direct" }
                    );
                }
                keep
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apps() -> Vec<Application> {
        vec![
            Application::new("1", "A"),
            Application::new("2", "B"),
            Application::new("3", "C"),
        ]
    }

    fn names(apps: &[Application]) -> Vec<&str> {
        apps.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_allow_list() {
        let filter = NameFilter::parse("A,B", false);
        assert_eq!(names(&filter.apply(apps())), vec!["A", "B"]);
    }

    #[test]
    fn test_deny_list() {
        let filter = NameFilter::parse("A,B", true);
        assert_eq!(names(&filter.apply(apps())), vec!["C"]);
    }

    #[test]
    fn test_empty_filter_is_identity() {
        assert_eq!(NameFilter::parse("", false).apply(apps()), apps());
        assert_eq!(NameFilter::parse("", true).apply(apps()), apps());
    }

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let filter = NameFilter::parse(" A , ,B,", false);
        assert!(!filter.is_empty());
        assert_eq!(names(&filter.apply(apps())), vec!["A", "B"]);
    }

    #[test]
    fn test_names_match_exactly() {
        let filter = NameFilter::parse("a", false);
        assert!(filter.apply(apps()).is_empty());
    }
}
