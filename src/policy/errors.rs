use crate::api::ApiError;
use crate::policy::SegmentKind;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PolicyError {
    #[error("You must provide at least two parameters")]
    #[diagnostic(
        code(cordon::policy::missing_parameters),
        help("Expected: <team> <action[,action...]> <path>")
    )]
    MissingParameters,

    #[error("You must provide at least one action")]
    #[diagnostic(
        code(cordon::policy::missing_actions),
        help("Actions are comma separated, e.g. `read,list`")
    )]
    MissingActions,

    #[error("Resource path `{path}` has too many segments")]
    #[diagnostic(
        code(cordon::policy::path_too_deep),
        help("Paths descend org/project/environment/service/identity/instance, followed by the secret name")
    )]
    PathTooDeep { path: String },

    #[error("Resource path `{path}` must begin with a concrete org name")]
    #[diagnostic(
        code(cordon::policy::missing_org),
        help("The org is resolved by name, so the leading segment cannot be a wildcard or set")
    )]
    MissingOrg { path: String },

    #[error("Invalid {kind} segment `{segment}`")]
    #[diagnostic(
        code(cordon::policy::invalid_segment),
        help("Segment names use lowercase letters, digits, `-` and `_`; `*` selects every value; `[a|b]` selects a set")
    )]
    InvalidSegment { kind: SegmentKind, segment: String },

    #[error("Empty alternation in {kind} segment `{segment}`")]
    #[diagnostic(
        code(cordon::policy::empty_alternation),
        help("Alternations list one or more names, e.g. `[staging|production]`")
    )]
    EmptyAlternation { kind: SegmentKind, segment: String },

    #[error("Unknown {kind}: {name}")]
    #[diagnostic(
        code(cordon::policy::unknown_segment),
        help("A named segment must refer to an existing resource when the path expands wildcards")
    )]
    UnknownSegment { kind: SegmentKind, name: String },

    #[error("No existing {kind} values under `{parent}`")]
    #[diagnostic(
        code(cordon::policy::empty_expansion),
        help("A wildcard that matches nothing would produce a policy with no statements; create the resources first or name them explicitly")
    )]
    EmptyExpansion { kind: SegmentKind, parent: String },

    #[error("Unknown org: {name}")]
    #[diagnostic(code(cordon::policy::unknown_org))]
    UnknownOrg { name: String },

    #[error("Unknown team: {name}")]
    #[diagnostic(code(cordon::policy::unknown_team))]
    UnknownTeam { name: String },

    #[error("Error creating policy")]
    #[diagnostic(code(cordon::policy::create_failed))]
    PolicyCreateFailed,

    #[error("Error attaching policy")]
    #[diagnostic(code(cordon::policy::attachment_failed))]
    AttachmentFailed,

    #[error("Statement is missing {missing}")]
    #[diagnostic(code(cordon::policy::incomplete_statement))]
    IncompleteStatement { missing: &'static str },

    #[error("Registry error: {0}")]
    #[diagnostic(code(cordon::policy::api))]
    Api(#[from] ApiError),
}
