use serde::{Deserialize, Serialize};

/// A First Gen application as returned by the GraphQL gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An application paired with the Next Gen project identifier derived from its name
///
/// The identifier is never empty; see [`crate::transform::IdentifierAssigner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedApplication {
    pub application: Application,
    pub identifier: String,
}

impl IdentifiedApplication {
    pub fn id(&self) -> &str {
        &self.application.id
    }

    pub fn name(&self) -> &str {
        &self.application.name
    }

    pub fn description(&self) -> Option<&str> {
        self.application.description.as_deref()
    }
}
