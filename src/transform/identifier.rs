//! Project identifier transformer
//!
//! Next Gen projects need an identifier made of ASCII letters and digits; it is
//! derived from the First Gen application name.

use crate::etl::Transformer;
use crate::harness::{Application, IdentifiedApplication};
use eyre::Result;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9a-zA-Z]+").expect("valid identifier regex"));

/// Strip every character that is not an ASCII letter or digit
///
/// ```
/// use harness_app_migrator::transform::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("My App!"), "MyApp");
/// assert_eq!(sanitize_identifier("!!!"), "");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    NON_ALPHANUMERIC.replace_all(name, "").into_owned()
}

/// Transformer that pairs an application with its project identifier
///
/// Names without any ASCII letter or digit are rejected instead of producing
/// an empty identifier.
///
/// # Example
/// ```
/// use harness_app_migrator::etl::Transformer;
/// use harness_app_migrator::harness::Application;
/// use harness_app_migrator::transform::IdentifierAssigner;
///
/// let identified = IdentifierAssigner
///     .transform(Application::new("a1", "Billing API (v2)"))
///     .unwrap();
/// assert_eq!(identified.identifier, "BillingAPIv2");
///
/// assert!(IdentifierAssigner.transform(Application::new("a2", "---")).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierAssigner;

impl IdentifierAssigner {
    /// Identify every application, skipping the ones that cannot be identified
    ///
    /// Applications are skipped with a warning when their identifier is empty
    /// or already taken by an earlier application of the batch, so no two
    /// targets share a project or a values file.
    pub fn assign_all(&self, applications: Vec<Application>) -> Vec<IdentifiedApplication> {
        let mut seen = HashSet::new();
        let mut identified = Vec::with_capacity(applications.len());

        for application in applications {
            let name = application.name.clone();
            match self.transform(application) {
                Ok(target) if seen.insert(target.identifier.clone()) => identified.push(target),
                Ok(target) => log::warn!(
                    "Skipping application {}: identifier {} is already used by another application",
                    name,
                    target.identifier
                ),
                Err(e) => log::warn!("Skipping application {}: {}", name, e),
            }
        }

        identified
    }
}

impl Transformer for IdentifierAssigner {
    type Input = Application;
    type Output = IdentifiedApplication;

    fn transform(&self, application: Self::Input) -> Result<Self::Output> {
        let identifier = sanitize_identifier(&application.name);
        if identifier.is_empty() {
            eyre::bail!(
                "name '{}' has no letters or digits to build a project identifier from",
                application.name
            );
        }
        Ok(IdentifiedApplication {
            application,
            identifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_identifier("Payments - EU_West 2");
        assert_eq!(once, "PaymentsEUWest2");
        assert_eq!(sanitize_identifier(&once), once);
    }

    #[test]
    fn test_sanitize_drops_non_ascii() {
        assert_eq!(sanitize_identifier("Café Ünïcode"), "Cafncode");
    }

    #[test]
    fn test_transform_keeps_application() {
        let app = Application::new("a1", "My App!").with_description("desc");
        let target = IdentifierAssigner.transform(app.clone()).unwrap();
        assert_eq!(target.identifier, "MyApp");
        assert_eq!(target.application, app);
    }

    #[test]
    fn test_transform_rejects_symbol_only_name() {
        let result = IdentifierAssigner.transform(Application::new("a1", "!!!"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no letters or digits"));
    }

    #[test]
    fn test_assign_all_skips_empty_and_duplicates() {
        let targets = IdentifierAssigner.assign_all(vec![
            Application::new("1", "My App"),
            Application::new("2", "???"),
            Application::new("3", "My-App"),
            Application::new("4", "Other"),
        ]);

        let ids: Vec<(&str, &str)> = targets
            .iter()
            .map(|t| (t.id(), t.identifier.as_str()))
            .collect();
        assert_eq!(ids, vec![("1", "MyApp"), ("4", "Other")]);
    }
}
