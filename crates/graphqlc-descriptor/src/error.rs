use thiserror::Error;

/// Everything that can go wrong while turning SDL into a [`crate::FileDescriptor`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source could not be parsed as a GraphQL type system document.
    #[error("{0}")]
    Parse(String),
    #[error("multiple `schema` definitions")]
    DuplicateSchema,
    #[error("`{name}` is defined more than once")]
    DuplicateDefinition { name: String },
    /// A top level node that is not one of the supported definition kinds.
    #[error("unsupported definition: {kind}{}", .name.as_deref().map(|name| format!(" `{name}`")).unwrap_or_default())]
    UnknownDefinition { kind: String, name: Option<String> },
    #[error("unknown type `{name}` referenced from {referenced_from}")]
    UnresolvedTypeReference { name: String, referenced_from: String },
    #[error("unknown type shape: {0}")]
    UnknownType(String),
    #[error("unknown value {value} in {context}")]
    UnknownValue { value: String, context: String },
    #[error("unknown directive location `{location}` on @{directive}")]
    UnknownDirectiveLocation { location: String, directive: String },
}
