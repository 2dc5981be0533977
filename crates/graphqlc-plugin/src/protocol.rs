//! Messages exchanged with generator plugins.
//!
//! The compiler writes one [`CodeGeneratorRequest`] to the plugin's stdin and reads one
//! [`CodeGeneratorResponse`] from its stdout. Both are plain protobuf, see
//! `proto/graphqlc/plugin.proto` for the schema plugins in other languages compile against.
//! Shared references (implemented interfaces, schema roots) travel as embedded copies.

#[derive(Clone, PartialEq, prost::Message)]
pub struct Version {
    #[prost(int32, tag = "1")]
    pub major: i32,
    #[prost(int32, tag = "2")]
    pub minor: i32,
    #[prost(int32, tag = "3")]
    pub patch: i32,
    /// Pre-release suffix, e.g. `alpha`. Empty for a release.
    #[prost(string, tag = "4")]
    pub suffix: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CodeGeneratorRequest {
    /// Files named on the command line, in order. Every one of them has a matching entry in
    /// `graphql_file`.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    /// Everything between `_out=` and `:` in the plugin flag.
    #[prost(string, tag = "2")]
    pub parameter: String,
    #[prost(message, optional, tag = "3")]
    pub compiler_version: Option<Version>,
    #[prost(message, repeated, tag = "15")]
    pub graphql_file: Vec<FileDescriptorGraphql>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CodeGeneratorResponse {
    /// Set by a plugin that failed on valid input. The compiler reports it and writes nothing.
    #[prost(string, tag = "1")]
    pub error: String,
    #[prost(message, repeated, tag = "15")]
    pub file: Vec<code_generator_response::File>,
}

pub mod code_generator_response {
    /// One write operation. See [`crate::ResponseMerger`] for how `name` and `insertion_point`
    /// combine.
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct File {
        #[prost(string, tag = "1")]
        pub name: String,
        #[prost(string, tag = "2")]
        pub insertion_point: String,
        #[prost(string, tag = "15")]
        pub content: String,
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FileDescriptorGraphql {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub schema: Option<SchemaDescriptorProto>,
    #[prost(message, repeated, tag = "3")]
    pub objects: Vec<ObjectTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub interfaces: Vec<InterfaceTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub unions: Vec<UnionTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "6")]
    pub enums: Vec<EnumTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "7")]
    pub scalars: Vec<ScalarTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "8")]
    pub input_objects: Vec<InputObjectTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "9")]
    pub directives: Vec<DirectiveDefinitionDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SchemaDescriptorProto {
    #[prost(message, repeated, tag = "1")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, optional, tag = "2")]
    pub query: Option<ObjectTypeDefinitionDescriptorProto>,
    #[prost(message, optional, tag = "3")]
    pub mutation: Option<ObjectTypeDefinitionDescriptorProto>,
    #[prost(message, optional, tag = "4")]
    pub subscription: Option<ObjectTypeDefinitionDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub implements: Vec<InterfaceTypeDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub fields: Vec<FieldDefinitionDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct InterfaceTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub fields: Vec<FieldDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub implements: Vec<InterfaceTypeDefinitionDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnionTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub member_types: Vec<NamedTypeDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EnumTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub values: Vec<EnumValueDefinitionDescription>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EnumValueDefinitionDescription {
    #[prost(string, tag = "1")]
    pub value: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ScalarTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct InputObjectTypeDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub directives: Vec<DirectiveDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub fields: Vec<InputValueDefinitionDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DirectiveDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub arguments: Vec<InputValueDefinitionDescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub locations: Vec<DirectiveLocationDescriptorProto>,
    #[prost(bool, tag = "5")]
    pub repeatable: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DirectiveLocationDescriptorProto {
    #[prost(oneof = "directive_location_descriptor_proto::Location", tags = "1, 2")]
    pub location: Option<directive_location_descriptor_proto::Location>,
}

pub mod directive_location_descriptor_proto {
    #[derive(Clone, Copy, PartialEq, prost::Oneof)]
    pub enum Location {
        #[prost(enumeration = "super::ExecutableDirectiveLocation", tag = "1")]
        ExecutableLocation(i32),
        #[prost(enumeration = "super::TypeSystemDirectiveLocation", tag = "2")]
        TypeSystemLocation(i32),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ExecutableDirectiveLocation {
    Query = 0,
    Mutation = 1,
    Subscription = 2,
    Field = 3,
    FragmentDefinition = 4,
    FragmentSpread = 5,
    InlineFragment = 6,
    VariableDefinition = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TypeSystemDirectiveLocation {
    Schema = 0,
    Scalar = 1,
    Object = 2,
    FieldDefinition = 3,
    ArgumentDefinition = 4,
    Interface = 5,
    Union = 6,
    Enum = 7,
    EnumValue = 8,
    InputObject = 9,
    InputFieldDefinition = 10,
}

impl ExecutableDirectiveLocation {
    /// The name of the location in SDL.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }
}

impl TypeSystemDirectiveLocation {
    /// The name of the location in SDL.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FieldDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub arguments: Vec<InputValueDefinitionDescriptorProto>,
    #[prost(message, optional, tag = "4")]
    pub r#type: Option<TypeDescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub directives: Vec<DirectiveDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct InputValueDefinitionDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, optional, tag = "3")]
    pub r#type: Option<TypeDescriptorProto>,
    #[prost(message, optional, tag = "4")]
    pub default_value: Option<ValueDescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub directives: Vec<DirectiveDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DirectiveDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub arguments: Vec<ArgumentDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArgumentDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<ValueDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TypeDescriptorProto {
    #[prost(oneof = "type_descriptor_proto::Type", tags = "1, 2, 3")]
    pub r#type: Option<type_descriptor_proto::Type>,
}

pub mod type_descriptor_proto {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        NamedType(super::NamedTypeDescriptorProto),
        #[prost(message, tag = "2")]
        ListType(super::ListTypeDescriptorProto),
        #[prost(message, tag = "3")]
        NonNullType(super::NonNullTypeDescriptorProto),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NamedTypeDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListTypeDescriptorProto {
    #[prost(message, optional, boxed, tag = "1")]
    pub r#type: Option<Box<TypeDescriptorProto>>,
}

/// Only a named type or a list can be non-null.
#[derive(Clone, PartialEq, prost::Message)]
pub struct NonNullTypeDescriptorProto {
    #[prost(oneof = "non_null_type_descriptor_proto::Type", tags = "1, 2")]
    pub r#type: Option<non_null_type_descriptor_proto::Type>,
}

pub mod non_null_type_descriptor_proto {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        NamedType(super::NamedTypeDescriptorProto),
        #[prost(message, tag = "2")]
        ListType(super::ListTypeDescriptorProto),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValueDescriptorProto {
    #[prost(oneof = "value_descriptor_proto::Value", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9")]
    pub value: Option<value_descriptor_proto::Value>,
}

pub mod value_descriptor_proto {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        VariableValue(super::VariableDescriptorProto),
        #[prost(int64, tag = "2")]
        IntValue(i64),
        #[prost(double, tag = "3")]
        FloatValue(f64),
        #[prost(string, tag = "4")]
        StringValue(String),
        #[prost(bool, tag = "5")]
        BooleanValue(bool),
        #[prost(message, tag = "6")]
        NullValue(super::NullValueDescriptorProto),
        #[prost(message, tag = "7")]
        EnumValue(super::EnumValueDescriptorProto),
        #[prost(message, tag = "8")]
        ListValue(super::ListValueDescriptorProto),
        #[prost(message, tag = "9")]
        ObjectValue(super::ObjectValueDescriptorProto),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VariableDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct NullValueDescriptorProto {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EnumValueDescriptorProto {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListValueDescriptorProto {
    #[prost(message, repeated, tag = "1")]
    pub values: Vec<ValueDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectValueDescriptorProto {
    #[prost(message, repeated, tag = "1")]
    pub fields: Vec<ObjectFieldDescriptorProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectFieldDescriptorProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<ValueDescriptorProto>,
}
