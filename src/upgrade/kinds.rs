//! Migration types offered by `harness-upgrade`

use std::fmt;

/// One `harness-upgrade` migration type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationKind {
    Applications,
    Pipelines,
    Workflows,
    WorkflowsAsPipelines,
}

impl MigrationKind {
    /// All kinds, in the order they run
    pub const ALL: [MigrationKind; 4] = [
        Self::Applications,
        Self::Pipelines,
        Self::Workflows,
        Self::WorkflowsAsPipelines,
    ];

    /// Trailing `harness-upgrade` arguments selecting this kind
    pub fn subcommand(&self) -> &'static [&'static str] {
        match self {
            Self::Applications => &["app", "--all"],
            Self::Pipelines => &["pipelines", "--all", "import"],
            Self::Workflows => &["workflows", "--all"],
            Self::WorkflowsAsPipelines => &["workflows", "--all", "--as-pipelines"],
        }
    }

    /// Human readable name used in progress logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Pipelines => "pipelines",
            Self::Workflows => "workflows",
            Self::WorkflowsAsPipelines => "workflows as pipelines",
        }
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand().join(" "))
    }
}

/// The set of migration types enabled for a run
///
/// Each kind toggles independently; by default only applications are migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationKinds {
    pub applications: bool,
    pub pipelines: bool,
    pub workflows: bool,
    pub workflows_as_pipelines: bool,
}

impl Default for MigrationKinds {
    fn default() -> Self {
        Self {
            applications: true,
            pipelines: false,
            workflows: false,
            workflows_as_pipelines: false,
        }
    }
}

impl MigrationKinds {
    pub fn all() -> Self {
        Self {
            applications: true,
            pipelines: true,
            workflows: true,
            workflows_as_pipelines: true,
        }
    }

    pub fn none() -> Self {
        Self {
            applications: false,
            pipelines: false,
            workflows: false,
            workflows_as_pipelines: false,
        }
    }

    pub fn contains(&self, kind: MigrationKind) -> bool {
        match kind {
            MigrationKind::Applications => self.applications,
            MigrationKind::Pipelines => self.pipelines,
            MigrationKind::Workflows => self.workflows,
            MigrationKind::WorkflowsAsPipelines => self.workflows_as_pipelines,
        }
    }

    /// Enabled kinds in execution order
    pub fn enabled(&self) -> Vec<MigrationKind> {
        MigrationKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled().is_empty()
    }

    /// Comma separated labels of the enabled kinds
    pub fn labels(&self) -> String {
        self.enabled()
            .iter()
            .map(MigrationKind::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_applications_only() {
        assert_eq!(
            MigrationKinds::default().enabled(),
            vec![MigrationKind::Applications]
        );
    }

    #[test]
    fn test_pipelines_only() {
        let kinds = MigrationKinds {
            pipelines: true,
            ..MigrationKinds::none()
        };
        assert_eq!(kinds.enabled(), vec![MigrationKind::Pipelines]);
        assert_eq!(kinds.enabled()[0].to_string(), "pipelines --all import");
    }

    #[test]
    fn test_workflow_kinds_are_independent() {
        let kinds = MigrationKinds {
            workflows: true,
            workflows_as_pipelines: true,
            ..MigrationKinds::none()
        };
        assert_eq!(
            kinds.enabled(),
            vec![MigrationKind::Workflows, MigrationKind::WorkflowsAsPipelines]
        );
    }

    #[test]
    fn test_all_in_fixed_order() {
        let subcommands: Vec<String> = MigrationKinds::all()
            .enabled()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            subcommands,
            vec![
                "app --all",
                "pipelines --all import",
                "workflows --all",
                "workflows --all --as-pipelines"
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            MigrationKinds::all().labels(),
            "applications, pipelines, workflows, workflows as pipelines"
        );
        assert!(MigrationKinds::none().is_empty());
        assert_eq!(MigrationKinds::none().labels(), "");
    }
}
