//! Resource-path expansion.
//!
//! Expansion turns a (possibly partial) descriptor into every concrete
//! resource identifier it denotes. Wildcard and alternation levels are
//! resolved against the live [`ResourceInventory`]; a fully concrete
//! descriptor never touches the inventory. A named segment that does not
//! exist, or a wildcard that matches nothing, is a hard error rather than an
//! empty result.

use crate::api::ResourceInventory;
use crate::policy::errors::PolicyError;
use crate::policy::rpath::{ResourceDescriptor, Segment};
use crate::policy::SegmentKind;

/// A fully concrete slash-joined resource path, tagged with the deepest
/// hierarchy level it reaches. Display code branches on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    path: String,
    kind: SegmentKind,
}

impl ResourceIdentifier {
    pub(crate) fn new(path: String, kind: SegmentKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// True when the identifier addresses an individual secret.
    pub fn is_secret(&self) -> bool {
        self.kind == SegmentKind::Secret
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Enumerate every concrete identifier the descriptor denotes, in hierarchy
/// order and inventory order within a level. Idempotent for unchanged
/// inventory.
pub async fn expand<I>(
    descriptor: &ResourceDescriptor,
    inventory: &I,
) -> Result<Vec<ResourceIdentifier>, PolicyError>
where
    I: ResourceInventory + ?Sized,
{
    let leaf = descriptor.leaf_kind();

    if descriptor.is_concrete() {
        return Ok(vec![ResourceIdentifier::new(descriptor.joined(), leaf)]);
    }

    // Walk the hierarchy, keeping every concrete prefix alive. Each level
    // either multiplies the prefix set (wildcard, alternation) or checks a
    // named segment against the inventory under each prefix.
    let mut prefixes: Vec<Vec<String>> = vec![Vec::new()];
    for (kind, segment) in descriptor.levels() {
        let mut next = Vec::new();
        for prefix in &prefixes {
            let existing = inventory.list_existing(*kind, prefix).await?;
            match segment {
                Segment::Literal(name) => {
                    if !existing.iter().any(|v| v == name) {
                        return Err(PolicyError::UnknownSegment {
                            kind: *kind,
                            name: name.clone(),
                        });
                    }
                    next.push(extended(prefix, name));
                }
                Segment::Wildcard => {
                    if existing.is_empty() {
                        return Err(PolicyError::EmptyExpansion {
                            kind: *kind,
                            parent: prefix.join("/"),
                        });
                    }
                    for value in &existing {
                        next.push(extended(prefix, value));
                    }
                }
                Segment::Alternation(names) => {
                    for name in names {
                        if !existing.iter().any(|v| v == name) {
                            return Err(PolicyError::UnknownSegment {
                                kind: *kind,
                                name: name.clone(),
                            });
                        }
                        next.push(extended(prefix, name));
                    }
                }
            }
        }
        prefixes = next;
    }

    tracing::debug!(
        org = descriptor.org(),
        resources = prefixes.len(),
        "Expanded resource path"
    );

    Ok(prefixes
        .into_iter()
        .map(|segments| ResourceIdentifier::new(segments.join("/"), leaf))
        .collect())
}

fn extended(prefix: &[String], name: &str) -> Vec<String> {
    let mut chain = prefix.to_vec();
    chain.push(name.to_string());
    chain
}
