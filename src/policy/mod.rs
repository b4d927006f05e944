pub mod assemble;
pub mod errors;
pub mod expand;
pub mod model;
pub mod report;
pub mod rpath;

/// Resource hierarchy levels, outermost first. A secret lives at the bottom
/// of org/project/environment/service/identity/instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Org,
    Project,
    Environment,
    Service,
    Identity,
    Instance,
    Secret,
}

impl SegmentKind {
    /// Levels a path string may name, outermost first. The token after the
    /// deepest path level is the explicit leaf name supplied by the caller.
    pub const HIERARCHY: [SegmentKind; 7] = [
        SegmentKind::Org,
        SegmentKind::Project,
        SegmentKind::Environment,
        SegmentKind::Service,
        SegmentKind::Identity,
        SegmentKind::Instance,
        SegmentKind::Secret,
    ];

    /// Maximum number of segments a path string may carry; the leaf token
    /// occupies the level after the last path segment.
    pub const MAX_PATH_SEGMENTS: usize = 6;

    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Org => "org",
            SegmentKind::Project => "project",
            SegmentKind::Environment => "environment",
            SegmentKind::Service => "service",
            SegmentKind::Identity => "identity",
            SegmentKind::Instance => "instance",
            SegmentKind::Secret => "secret",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
