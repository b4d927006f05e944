//! Registry wire types and the collaborator capabilities the policy engine
//! consumes. The HTTP client implementing these traits lives outside this
//! crate; tests use an in-memory fake.

use crate::policy::model::Policy;
use crate::policy::SegmentKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error classes the registry and daemon return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServer,
    NotImplemented,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InternalServer => "internal_server",
            ErrorKind::NotImplemented => "not_implemented",
        }
    }
}

/// Standard formatted error from the registry or daemon.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}: {}", .kind.as_str(), .messages.join(" "))]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(rename = "error")]
    pub messages: Vec<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            messages: vec![message.into()],
        }
    }
}

/// Release version of the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
}

/// State of the user's daemon session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub token: bool,
    pub passphrase: bool,
}

/// Credentials for logging in to the registry through the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub passphrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    pub id: String,
    pub version: i64,
    pub body: OrgBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgBody {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub version: i64,
    pub body: TeamBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBody {
    pub name: String,
    pub org_id: String,
}

/// A policy as stored server-side: re-keyed with a registry-assigned id, the
/// submitted document carried verbatim in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPolicy {
    pub id: String,
    pub version: i64,
    pub body: PersistedPolicyBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPolicyBody {
    pub org_id: String,
    pub policy: Policy,
}

/// The binding of a persisted policy to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub org_id: String,
    pub owner_id: String,
    pub policy_id: String,
}

/// Inventory of existing resources, one level at a time. `parent` is the
/// chain of concrete segment names above `level`; the returned values are in
/// stable (creation) order and reflect current state at call time.
#[async_trait]
pub trait ResourceInventory: Send + Sync {
    async fn list_existing(
        &self,
        level: SegmentKind,
        parent: &[String],
    ) -> Result<Vec<String>, ApiError>;
}

/// The registry operations policy assembly depends on. Lookups return every
/// match; callers take the first. Creates return `None` when the registry
/// produced no usable record.
#[async_trait]
pub trait RegistryApi: ResourceInventory {
    async fn get_orgs(&self, name: &str) -> Result<Vec<Org>, ApiError>;

    async fn get_teams(&self, name: &str, org_id: &str) -> Result<Vec<Team>, ApiError>;

    async fn create_policy(
        &self,
        org_id: &str,
        policy: &Policy,
    ) -> Result<Option<PersistedPolicy>, ApiError>;

    async fn create_attachment(
        &self,
        org_id: &str,
        owner_id: &str,
        policy_id: &str,
    ) -> Result<Option<Attachment>, ApiError>;
}
