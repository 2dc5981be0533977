mod directive_location;
mod ids;
mod type_reference;
mod value;

pub use self::{
    directive_location::{DirectiveLocation, ExecutableDirectiveLocation, TypeSystemDirectiveLocation},
    ids::*,
    type_reference::{BuiltinScalar, Definition, NamedType, NonNullType, TypeReference},
    value::Value,
};

/// One compiled source file. Every descriptor declared in the file lives in one of the arenas
/// below and is referenced everywhere else by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDescriptor {
    pub name: String,
    pub objects: Vec<Object>,
    pub interfaces: Vec<Interface>,
    pub unions: Vec<Union>,
    pub enums: Vec<Enum>,
    pub scalars: Vec<Scalar>,
    pub input_objects: Vec<InputObject>,
    pub directive_definitions: Vec<DirectiveDefinition>,
    /// Either the `schema` block of the file or the one synthesized from the root type names.
    pub schema: Schema,
}

impl FileDescriptor {
    pub fn iter_objects(&self) -> impl ExactSizeIterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(idx, object)| (ObjectId::from(idx), object))
    }

    pub fn iter_interfaces(&self) -> impl ExactSizeIterator<Item = (InterfaceId, &Interface)> {
        self.interfaces
            .iter()
            .enumerate()
            .map(|(idx, interface)| (InterfaceId::from(idx), interface))
    }

    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|object| object.name == name)
            .map(ObjectId::from)
    }

    pub fn interface_by_name(&self, name: &str) -> Option<InterfaceId> {
        self.interfaces
            .iter()
            .position(|interface| interface.name == name)
            .map(InterfaceId::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub directives: Vec<Directive>,
    pub query: Option<ObjectId>,
    pub mutation: Option<ObjectId>,
    pub subscription: Option<ObjectId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub implements: Vec<InterfaceId>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interface {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub implements: Vec<InterfaceId>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Union {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub members: Vec<NamedType>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enum {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scalar {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputObject {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub locations: Vec<DirectiveLocation>,
    pub repeatable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub r#type: TypeReference,
    pub arguments: Vec<InputValue>,
}

/// An argument definition or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub r#type: TypeReference,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// A directive applied somewhere in the file, e.g. `@deprecated(reason: "gone")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}
