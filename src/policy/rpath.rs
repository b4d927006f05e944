//! Resource-path parsing.
//!
//! A path names levels of the resource hierarchy from the org down, e.g.
//! `acme/api/production/billing/ci`. The leaf name (usually the secret) is
//! supplied as a separate token and occupies the level after the deepest path
//! segment. Segments are concrete names, `*` (or an empty segment) for every
//! value at that level, or an alternation like `[staging|production]`.

use crate::policy::errors::PolicyError;
use crate::policy::SegmentKind;

/// A single segment value within a resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
    Alternation(Vec<String>),
}

impl Segment {
    pub fn is_concrete(&self) -> bool {
        matches!(self, Segment::Literal(_))
    }
}

/// Structured decomposition of a resource path plus its explicit leaf token.
/// Immutable once parsed; consumed by the expander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    levels: Vec<(SegmentKind, Segment)>,
}

impl ResourceDescriptor {
    /// Levels in hierarchy order, the leaf token last.
    pub fn levels(&self) -> &[(SegmentKind, Segment)] {
        &self.levels
    }

    /// The org name. Always a concrete literal; the parser rejects anything
    /// else in the leading position.
    pub fn org(&self) -> &str {
        match &self.levels[0].1 {
            Segment::Literal(name) => name,
            _ => unreachable!("parser guarantees a literal org segment"),
        }
    }

    /// The deepest hierarchy level this descriptor reaches.
    pub fn leaf_kind(&self) -> SegmentKind {
        self.levels[self.levels.len() - 1].0
    }

    /// True when no level needs inventory expansion.
    pub fn is_concrete(&self) -> bool {
        self.levels.iter().all(|(_, segment)| segment.is_concrete())
    }

    /// The slash-joined path. Only meaningful for concrete descriptors.
    pub(crate) fn joined(&self) -> String {
        let names: Vec<&str> = self
            .levels
            .iter()
            .map(|(_, segment)| match segment {
                Segment::Literal(name) => name.as_str(),
                _ => unreachable!("joined() requires a concrete descriptor"),
            })
            .collect();
        names.join("/")
    }
}

/// Parse a hierarchy path and an explicit leaf token into a descriptor.
///
/// The caller strips the rightmost token of the user-supplied path and passes
/// the joined remainder as `path` and the stripped token as `leaf`; the leaf
/// lands on the level after the deepest path segment.
pub fn parse(path: &str, leaf: &str) -> Result<ResourceDescriptor, PolicyError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let tokens: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    };

    if tokens.len() > SegmentKind::MAX_PATH_SEGMENTS {
        return Err(PolicyError::PathTooDeep {
            path: path.to_string(),
        });
    }
    if tokens.is_empty() {
        return Err(PolicyError::MissingOrg {
            path: path.to_string(),
        });
    }

    let mut levels = Vec::with_capacity(tokens.len() + 1);

    // The org resolves by name later in the flow, so it must be concrete.
    let org = parse_segment(tokens[0], SegmentKind::Org)?;
    if !org.is_concrete() {
        return Err(PolicyError::MissingOrg {
            path: path.to_string(),
        });
    }
    levels.push((SegmentKind::Org, org));

    for (i, token) in tokens.iter().enumerate().skip(1) {
        let kind = SegmentKind::HIERARCHY[i];
        levels.push((kind, parse_segment(token, kind)?));
    }

    // Leaf token fills the level after the last path segment.
    let leaf_kind = SegmentKind::HIERARCHY[tokens.len()];
    if leaf.is_empty() {
        return Err(PolicyError::InvalidSegment {
            kind: leaf_kind,
            segment: leaf.to_string(),
        });
    }
    levels.push((leaf_kind, parse_segment(leaf, leaf_kind)?));

    Ok(ResourceDescriptor { levels })
}

fn parse_segment(token: &str, kind: SegmentKind) -> Result<Segment, PolicyError> {
    if token.is_empty() || token == "*" {
        return Ok(Segment::Wildcard);
    }

    if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        let names: Vec<&str> = inner.split('|').collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(PolicyError::EmptyAlternation {
                kind,
                segment: token.to_string(),
            });
        }
        let mut deduped: Vec<String> = Vec::new();
        for name in names {
            if !valid_name(name, kind) {
                return Err(PolicyError::InvalidSegment {
                    kind,
                    segment: token.to_string(),
                });
            }
            if !deduped.iter().any(|n| n == name) {
                deduped.push(name.to_string());
            }
        }
        return Ok(Segment::Alternation(deduped));
    }

    if !valid_name(token, kind) {
        return Err(PolicyError::InvalidSegment {
            kind,
            segment: token.to_string(),
        });
    }
    Ok(Segment::Literal(token.to_string()))
}

/// Segment names are lowercase alphanumerics plus `-` and `_`, starting with
/// an alphanumeric. Secret names may additionally contain `.`.
fn valid_name(name: &str, kind: SegmentKind) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }
    chars.all(|c| {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '-'
            || c == '_'
            || (c == '.' && kind == SegmentKind::Secret)
    })
}
