use async_trait::async_trait;
use cordon::api::{
    ApiError, Attachment, Org, OrgBody, PersistedPolicy, PersistedPolicyBody, RegistryApi,
    ResourceInventory, Team, TeamBody,
};
use cordon::policy::model::Policy;
use cordon::policy::SegmentKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory registry standing in for the HTTP client. Records every create
/// call so tests can assert on call counts and payloads.
#[derive(Default)]
pub struct FakeRegistry {
    /// parent path -> child segment names, in creation order
    children: HashMap<String, Vec<String>>,
    orgs: Vec<Org>,
    teams: Vec<Team>,
    fail_policy_create: bool,
    fail_attachment: bool,
    policy_calls: AtomicUsize,
    attachment_calls: AtomicUsize,
    pub created_policies: Mutex<Vec<(String, Policy)>>,
    pub attachments: Mutex<Vec<Attachment>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, name: &str, id: &str) -> Self {
        self.orgs.push(Org {
            id: id.to_string(),
            version: 1,
            body: OrgBody {
                name: name.to_string(),
            },
        });
        self.children
            .entry(String::new())
            .or_default()
            .push(name.to_string());
        self
    }

    pub fn with_team(mut self, org_id: &str, name: &str, id: &str) -> Self {
        self.teams.push(Team {
            id: id.to_string(),
            version: 1,
            body: TeamBody {
                name: name.to_string(),
                org_id: org_id.to_string(),
            },
        });
        self
    }

    /// Register the child segment names under a slash-joined parent path.
    pub fn with_children(mut self, parent: &str, values: &[&str]) -> Self {
        self.children.insert(
            parent.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn failing_policy_create(mut self) -> Self {
        self.fail_policy_create = true;
        self
    }

    pub fn failing_attachment(mut self) -> Self {
        self.fail_attachment = true;
        self
    }

    pub fn policy_calls(&self) -> usize {
        self.policy_calls.load(Ordering::SeqCst)
    }

    pub fn attachment_calls(&self) -> usize {
        self.attachment_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceInventory for FakeRegistry {
    async fn list_existing(
        &self,
        _level: SegmentKind,
        parent: &[String],
    ) -> Result<Vec<String>, ApiError> {
        Ok(self
            .children
            .get(&parent.join("/"))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl RegistryApi for FakeRegistry {
    async fn get_orgs(&self, name: &str) -> Result<Vec<Org>, ApiError> {
        Ok(self
            .orgs
            .iter()
            .filter(|o| o.body.name == name)
            .cloned()
            .collect())
    }

    async fn get_teams(&self, name: &str, org_id: &str) -> Result<Vec<Team>, ApiError> {
        Ok(self
            .teams
            .iter()
            .filter(|t| t.body.name == name && t.body.org_id == org_id)
            .cloned()
            .collect())
    }

    async fn create_policy(
        &self,
        org_id: &str,
        policy: &Policy,
    ) -> Result<Option<PersistedPolicy>, ApiError> {
        let n = self.policy_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_policy_create {
            return Ok(None);
        }
        self.created_policies
            .lock()
            .unwrap()
            .push((org_id.to_string(), policy.clone()));
        Ok(Some(PersistedPolicy {
            id: format!("policy-{n}"),
            version: 1,
            body: PersistedPolicyBody {
                org_id: org_id.to_string(),
                policy: policy.clone(),
            },
        }))
    }

    async fn create_attachment(
        &self,
        org_id: &str,
        owner_id: &str,
        policy_id: &str,
    ) -> Result<Option<Attachment>, ApiError> {
        let n = self.attachment_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_attachment {
            return Ok(None);
        }
        let attachment = Attachment {
            id: format!("attachment-{n}"),
            org_id: org_id.to_string(),
            owner_id: owner_id.to_string(),
            policy_id: policy_id.to_string(),
        };
        self.attachments.lock().unwrap().push(attachment.clone());
        Ok(Some(attachment))
    }
}
