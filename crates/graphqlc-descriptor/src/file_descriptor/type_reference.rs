use super::*;
use std::fmt;

/// What a type name resolved to. Two references to the same name in one file always carry the
/// same `Definition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Definition {
    Object(ObjectId),
    Interface(InterfaceId),
    Union(UnionId),
    Enum(EnumId),
    Scalar(ScalarId),
    InputObject(InputObjectId),
    /// One of the scalars every schema has without declaring them.
    BuiltinScalar(BuiltinScalar),
}

impl Definition {
    pub fn as_object(self) -> Option<ObjectId> {
        match self {
            Definition::Object(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_interface(self) -> Option<InterfaceId> {
        match self {
            Definition::Interface(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display)]
pub enum BuiltinScalar {
    Int,
    Float,
    String,
    Boolean,
    #[strum(serialize = "ID")]
    Id,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
    pub definition: Definition,
}

/// A resolved type reference. A non-null wrapper can only hold a named type or a list, so
/// `String!!` has no representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    Named(NamedType),
    List(Box<TypeReference>),
    NonNull(NonNullType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonNullType {
    Named(NamedType),
    List(Box<TypeReference>),
}

impl TypeReference {
    /// The named type at the core of the wrappers.
    pub fn named_type(&self) -> &NamedType {
        match self {
            TypeReference::Named(named) | TypeReference::NonNull(NonNullType::Named(named)) => named,
            TypeReference::List(inner) | TypeReference::NonNull(NonNullType::List(inner)) => inner.named_type(),
        }
    }

    pub fn definition(&self) -> Definition {
        self.named_type().definition
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeReference::NonNull(_))
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Named(named) => f.write_str(&named.name),
            TypeReference::List(inner) => write!(f, "[{inner}]"),
            TypeReference::NonNull(NonNullType::Named(named)) => write!(f, "{}!", named.name),
            TypeReference::NonNull(NonNullType::List(inner)) => write!(f, "[{inner}]!"),
        }
    }
}
