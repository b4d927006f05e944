//! Statement and policy value objects.
//!
//! A statement is one (effect, actions, resource) rule; a policy is a named,
//! ordered collection of statements. Both serialize to the registry's plain
//! JSON form with no derived fields. Statements are built through
//! [`StatementBuilder`] so a partially-built statement is never observable.

use crate::policy::errors::PolicyError;
use serde::{Deserialize, Serialize};

/// Outcome a statement asserts for matching requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (effect, actions, resource) authorization rule. Immutable once built.
///
/// The registry keys the actions array as `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    effect: Effect,
    #[serde(rename = "action")]
    actions: Vec<String>,
    resource: String,
}

impl Statement {
    pub fn builder(effect: Effect) -> StatementBuilder {
        StatementBuilder {
            effect,
            actions: None,
            resource: None,
        }
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// Write-once construction of a [`Statement`]. Supplying actions or a
/// resource twice is a programmer error and panics.
#[derive(Debug)]
pub struct StatementBuilder {
    effect: Effect,
    actions: Option<Vec<String>>,
    resource: Option<String>,
}

impl StatementBuilder {
    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(
            self.actions.is_none(),
            "statement actions are write-once; they were already set"
        );
        let mut deduped: Vec<String> = Vec::new();
        for action in actions {
            let action = action.into();
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }
        self.actions = Some(deduped);
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        assert!(
            self.resource.is_none(),
            "statement resource is write-once; it was already set"
        );
        self.resource = Some(resource.into());
        self
    }

    pub fn build(self) -> Result<Statement, PolicyError> {
        let actions = self
            .actions
            .filter(|a| !a.is_empty())
            .ok_or(PolicyError::IncompleteStatement { missing: "actions" })?;
        let resource = self.resource.ok_or(PolicyError::IncompleteStatement {
            missing: "a resource",
        })?;
        Ok(Statement {
            effect: self.effect,
            actions,
            resource,
        })
    }
}

/// Named, ordered collection of statements. The name is fixed at
/// construction; statements are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    name: String,
    statements: Vec<Statement>,
}

impl Policy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
        }
    }

    /// A generated name of the form `<prefix>-<effect>-<unix-timestamp>`.
    pub fn generated(prefix: &str, effect: Effect) -> Self {
        let stamp = chrono::Utc::now().timestamp();
        Self::new(format!("{prefix}-{effect}-{stamp}"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
