//! Descriptor to wire message conversion.

use crate::protocol::*;
use graphqlc_descriptor::{
    self as ir, DirectiveLocation, ExecutableDirectiveLocation as IrExecutable, FileDescriptor, InterfaceId, ObjectId,
    TypeReference, TypeSystemDirectiveLocation as IrTypeSystem,
};

pub(super) fn file_descriptor(file: &FileDescriptor) -> FileDescriptorGraphql {
    FileDescriptorGraphql {
        name: file.name.clone(),
        schema: Some(schema(file)),
        objects: file.iter_objects().map(|(id, _)| object(file, id)).collect(),
        interfaces: file
            .iter_interfaces()
            .map(|(id, _)| interface(file, id, &mut Vec::new()))
            .collect(),
        unions: file.unions.iter().map(union).collect(),
        enums: file.enums.iter().map(enum_type).collect(),
        scalars: file
            .scalars
            .iter()
            .map(|scalar| ScalarTypeDefinitionDescriptorProto {
                name: scalar.name.clone(),
                description: description(&scalar.description),
                directives: directives(&scalar.directives),
            })
            .collect(),
        input_objects: file
            .input_objects
            .iter()
            .map(|input_object| InputObjectTypeDefinitionDescriptorProto {
                name: input_object.name.clone(),
                description: description(&input_object.description),
                directives: directives(&input_object.directives),
                fields: input_values(&input_object.fields),
            })
            .collect(),
        directives: file.directive_definitions.iter().map(directive_definition).collect(),
    }
}

fn schema(file: &FileDescriptor) -> SchemaDescriptorProto {
    SchemaDescriptorProto {
        directives: directives(&file.schema.directives),
        query: file.schema.query.map(|id| object(file, id)),
        mutation: file.schema.mutation.map(|id| object(file, id)),
        subscription: file.schema.subscription.map(|id| object(file, id)),
    }
}

fn object(file: &FileDescriptor, id: ObjectId) -> ObjectTypeDefinitionDescriptorProto {
    let object = &file[id];

    ObjectTypeDefinitionDescriptorProto {
        name: object.name.clone(),
        description: description(&object.description),
        implements: object
            .implements
            .iter()
            .map(|interface_id| interface(file, *interface_id, &mut Vec::new()))
            .collect(),
        directives: directives(&object.directives),
        fields: fields(&object.fields),
    }
}

/// Interfaces embed copies of the interfaces they implement. `path` holds the interfaces being
/// embedded above this one: an interface implementing itself through a cycle is cut off with a
/// name-only copy.
fn interface(
    file: &FileDescriptor,
    id: InterfaceId,
    path: &mut Vec<InterfaceId>,
) -> InterfaceTypeDefinitionDescriptorProto {
    let definition = &file[id];

    if path.contains(&id) {
        return InterfaceTypeDefinitionDescriptorProto {
            name: definition.name.clone(),
            ..Default::default()
        };
    }

    path.push(id);
    let implements = definition
        .implements
        .iter()
        .map(|parent| interface(file, *parent, path))
        .collect();
    path.pop();

    InterfaceTypeDefinitionDescriptorProto {
        name: definition.name.clone(),
        description: description(&definition.description),
        directives: directives(&definition.directives),
        fields: fields(&definition.fields),
        implements,
    }
}

fn union(union: &ir::Union) -> UnionTypeDefinitionDescriptorProto {
    UnionTypeDefinitionDescriptorProto {
        name: union.name.clone(),
        description: description(&union.description),
        directives: directives(&union.directives),
        member_types: union
            .members
            .iter()
            .map(|member| NamedTypeDescriptorProto {
                name: member.name.clone(),
            })
            .collect(),
    }
}

fn enum_type(r#enum: &ir::Enum) -> EnumTypeDefinitionDescriptorProto {
    EnumTypeDefinitionDescriptorProto {
        name: r#enum.name.clone(),
        description: description(&r#enum.description),
        directives: directives(&r#enum.directives),
        values: r#enum
            .values
            .iter()
            .map(|value| EnumValueDefinitionDescription {
                value: value.name.clone(),
                description: description(&value.description),
                directives: directives(&value.directives),
            })
            .collect(),
    }
}

fn directive_definition(definition: &ir::DirectiveDefinition) -> DirectiveDefinitionDescriptorProto {
    DirectiveDefinitionDescriptorProto {
        name: definition.name.clone(),
        description: description(&definition.description),
        arguments: input_values(&definition.arguments),
        locations: definition
            .locations
            .iter()
            .map(|location| DirectiveLocationDescriptorProto {
                location: Some(directive_location(*location)),
            })
            .collect(),
        repeatable: definition.repeatable,
    }
}

fn directive_location(location: DirectiveLocation) -> directive_location_descriptor_proto::Location {
    use directive_location_descriptor_proto::Location;

    match location {
        DirectiveLocation::Executable(location) => Location::ExecutableLocation(
            match location {
                IrExecutable::Query => ExecutableDirectiveLocation::Query,
                IrExecutable::Mutation => ExecutableDirectiveLocation::Mutation,
                IrExecutable::Subscription => ExecutableDirectiveLocation::Subscription,
                IrExecutable::Field => ExecutableDirectiveLocation::Field,
                IrExecutable::FragmentDefinition => ExecutableDirectiveLocation::FragmentDefinition,
                IrExecutable::FragmentSpread => ExecutableDirectiveLocation::FragmentSpread,
                IrExecutable::InlineFragment => ExecutableDirectiveLocation::InlineFragment,
                IrExecutable::VariableDefinition => ExecutableDirectiveLocation::VariableDefinition,
            } as i32,
        ),
        DirectiveLocation::TypeSystem(location) => Location::TypeSystemLocation(
            match location {
                IrTypeSystem::Schema => TypeSystemDirectiveLocation::Schema,
                IrTypeSystem::Scalar => TypeSystemDirectiveLocation::Scalar,
                IrTypeSystem::Object => TypeSystemDirectiveLocation::Object,
                IrTypeSystem::FieldDefinition => TypeSystemDirectiveLocation::FieldDefinition,
                IrTypeSystem::ArgumentDefinition => TypeSystemDirectiveLocation::ArgumentDefinition,
                IrTypeSystem::Interface => TypeSystemDirectiveLocation::Interface,
                IrTypeSystem::Union => TypeSystemDirectiveLocation::Union,
                IrTypeSystem::Enum => TypeSystemDirectiveLocation::Enum,
                IrTypeSystem::EnumValue => TypeSystemDirectiveLocation::EnumValue,
                IrTypeSystem::InputObject => TypeSystemDirectiveLocation::InputObject,
                IrTypeSystem::InputFieldDefinition => TypeSystemDirectiveLocation::InputFieldDefinition,
            } as i32,
        ),
    }
}

fn fields(fields: &[ir::Field]) -> Vec<FieldDefinitionDescriptorProto> {
    fields
        .iter()
        .map(|field| FieldDefinitionDescriptorProto {
            name: field.name.clone(),
            description: description(&field.description),
            arguments: input_values(&field.arguments),
            r#type: Some(type_reference(&field.r#type)),
            directives: directives(&field.directives),
        })
        .collect()
}

fn input_values(values: &[ir::InputValue]) -> Vec<InputValueDefinitionDescriptorProto> {
    values
        .iter()
        .map(|input_value| InputValueDefinitionDescriptorProto {
            name: input_value.name.clone(),
            description: description(&input_value.description),
            r#type: Some(type_reference(&input_value.r#type)),
            default_value: input_value.default_value.as_ref().map(value),
            directives: directives(&input_value.directives),
        })
        .collect()
}

fn directives(directives: &[ir::Directive]) -> Vec<DirectiveDescriptorProto> {
    directives
        .iter()
        .map(|directive| DirectiveDescriptorProto {
            name: directive.name.clone(),
            arguments: directive
                .arguments
                .iter()
                .map(|(name, argument)| ArgumentDescriptorProto {
                    name: name.clone(),
                    value: Some(value(argument)),
                })
                .collect(),
        })
        .collect()
}

fn type_reference(ty: &TypeReference) -> TypeDescriptorProto {
    use type_descriptor_proto::Type;

    let ty = match ty {
        TypeReference::Named(named) => Type::NamedType(named_type(named)),
        TypeReference::List(inner) => Type::ListType(list_type(inner)),
        TypeReference::NonNull(non_null) => Type::NonNullType(NonNullTypeDescriptorProto {
            r#type: Some(match non_null {
                ir::NonNullType::Named(named) => non_null_type_descriptor_proto::Type::NamedType(named_type(named)),
                ir::NonNullType::List(inner) => non_null_type_descriptor_proto::Type::ListType(list_type(inner)),
            }),
        }),
    };

    TypeDescriptorProto { r#type: Some(ty) }
}

fn named_type(named: &ir::NamedType) -> NamedTypeDescriptorProto {
    NamedTypeDescriptorProto {
        name: named.name.clone(),
    }
}

fn list_type(inner: &TypeReference) -> ListTypeDescriptorProto {
    ListTypeDescriptorProto {
        r#type: Some(Box::new(type_reference(inner))),
    }
}

fn value(value: &ir::Value) -> ValueDescriptorProto {
    use value_descriptor_proto::Value;

    let value = match value {
        ir::Value::Variable(name) => Value::VariableValue(VariableDescriptorProto { name: name.clone() }),
        ir::Value::Int(n) => Value::IntValue(*n),
        ir::Value::Float(n) => Value::FloatValue(*n),
        ir::Value::String(s) => Value::StringValue(s.clone()),
        ir::Value::Boolean(b) => Value::BooleanValue(*b),
        ir::Value::Null => Value::NullValue(NullValueDescriptorProto {}),
        ir::Value::Enum(symbol) => Value::EnumValue(EnumValueDescriptorProto { value: symbol.clone() }),
        ir::Value::List(items) => Value::ListValue(ListValueDescriptorProto {
            values: items.iter().map(self::value).collect(),
        }),
        ir::Value::Object(object_fields) => Value::ObjectValue(ObjectValueDescriptorProto {
            fields: object_fields
                .iter()
                .map(|(name, field_value)| ObjectFieldDescriptorProto {
                    name: name.clone(),
                    value: Some(self::value(field_value)),
                })
                .collect(),
        }),
    };

    ValueDescriptorProto { value: Some(value) }
}

fn description(description: &Option<String>) -> String {
    description.clone().unwrap_or_default()
}
