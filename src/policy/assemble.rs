//! Policy assembly: from command parameters to a persisted, attached policy.
//!
//! The flow is an explicit saga. Each transition is one awaited registry
//! call; the first failure aborts the run with no compensation, so a failure
//! after `PolicyCreated` leaves the created policy behind, unattached.

use crate::api::{Org, PersistedPolicy, RegistryApi, Team};
use crate::policy::errors::PolicyError;
use crate::policy::expand::{self, ResourceIdentifier};
use crate::policy::model::{Effect, Policy, Statement};
use crate::policy::rpath;
use crate::settings::Settings;

/// Positional parameters handed over by the CLI layer: team name, one or
/// more comma-separated action lists, and the resource path last.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub params: Vec<String>,
    /// Explicit policy name; generated when absent.
    pub policy_name: Option<String>,
}

impl CommandContext {
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            policy_name: None,
        }
    }

    pub fn with_policy_name(mut self, name: impl Into<String>) -> Self {
        self.policy_name = Some(name.into());
        self
    }
}

/// Saga checkpoints, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaState {
    Validated,
    ResolvedOrg,
    ResolvedTeam,
    PolicyCreated,
    Attached,
}

struct Saga {
    state: SagaState,
}

impl Saga {
    fn new() -> Self {
        Self {
            state: SagaState::Validated,
        }
    }

    fn advance(&mut self, to: SagaState) {
        tracing::debug!(from = ?self.state, to = ?to, "Policy assembly transition");
        self.state = to;
    }
}

/// Everything accumulated by a successful run.
#[derive(Debug, Clone)]
pub struct AssemblyOutcome {
    pub org: Org,
    pub team: Team,
    pub policy: PersistedPolicy,
    /// The expanded identifiers, in statement order, with their level tags.
    pub resources: Vec<ResourceIdentifier>,
}

/// Build a policy for the requested effect and attach it to the named team.
pub async fn assemble_and_attach<A>(
    ctx: &CommandContext,
    effect: Effect,
    api: &A,
    settings: &Settings,
) -> Result<AssemblyOutcome, PolicyError>
where
    A: RegistryApi + ?Sized,
{
    // 1. Validate input shape and harvest the parameters.
    let harvested = harvest(ctx)?;
    let mut saga = Saga::new();

    // 2. The rightmost path token is the leaf (secret) name; the joined
    //    remainder is the hierarchy path.
    let (path, leaf) = split_leaf(&harvested.path);

    // 3. Parse and expand.
    let descriptor = rpath::parse(path, leaf)?;
    let resources = expand::expand(&descriptor, api).await?;

    // 4. One statement per identifier, in expansion order.
    let mut policy = match &ctx.policy_name {
        Some(name) => Policy::new(name.clone()),
        None => Policy::generated(&settings.policy.name_prefix, effect),
    };
    for resource in &resources {
        let statement = Statement::builder(effect)
            .actions(harvested.actions.iter().cloned())
            .resource(resource.path())
            .build()?;
        policy.push(statement);
    }

    tracing::debug!(
        name = policy.name(),
        statements = policy.statements().len(),
        "Assembled policy"
    );

    // 5. Resolve the org by name.
    let org_name = descriptor.org();
    let org = api
        .get_orgs(org_name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PolicyError::UnknownOrg {
            name: org_name.to_string(),
        })?;
    saga.advance(SagaState::ResolvedOrg);

    // 6. Resolve the team by name within the org.
    let team = api
        .get_teams(&harvested.team, &org.id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PolicyError::UnknownTeam {
            name: harvested.team.clone(),
        })?;
    saga.advance(SagaState::ResolvedTeam);

    // 7. Persist the policy, scoped to the org.
    let persisted = api
        .create_policy(&org.id, &policy)
        .await?
        .ok_or(PolicyError::PolicyCreateFailed)?;
    saga.advance(SagaState::PolicyCreated);

    // 8. Attach it to the team. Failing here orphans the policy created
    //    above; see the module docs.
    api.create_attachment(&org.id, &team.id, &persisted.id)
        .await?
        .ok_or(PolicyError::AttachmentFailed)?;
    saga.advance(SagaState::Attached);

    tracing::info!(
        policy = %persisted.id,
        team = %team.body.name,
        org = %org.body.name,
        "Attached policy"
    );

    Ok(AssemblyOutcome {
        org,
        team,
        policy: persisted,
        resources,
    })
}

#[derive(Debug)]
struct Harvested {
    team: String,
    actions: Vec<String>,
    path: String,
}

/// Pull team, actions, and path out of the positional parameters. The action
/// parameters between team and path are comma-split and deduplicated in
/// order.
fn harvest(ctx: &CommandContext) -> Result<Harvested, PolicyError> {
    if ctx.params.len() < 2 {
        return Err(PolicyError::MissingParameters);
    }

    let team = ctx.params[0].clone();
    let path = ctx.params[ctx.params.len() - 1].clone();

    let mut actions: Vec<String> = Vec::new();
    for param in &ctx.params[1..ctx.params.len() - 1] {
        for action in param.split(',') {
            let action = action.trim();
            if !action.is_empty() && !actions.iter().any(|a| a == action) {
                actions.push(action.to_string());
            }
        }
    }
    if actions.is_empty() {
        return Err(PolicyError::MissingActions);
    }

    Ok(Harvested {
        team,
        actions,
        path,
    })
}

/// Split the rightmost token off a user-supplied path.
fn split_leaf(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.rsplit_once('/') {
        Some((rest, leaf)) => (rest, leaf),
        None => ("", trimmed),
    }
}
