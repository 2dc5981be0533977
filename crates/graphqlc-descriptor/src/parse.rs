//! Turns SDL text into a [`syntax::Document`] with `cynic-parser`.

use crate::{syntax::*, Error};
use cynic_parser::{common::WrappingType, type_system as ast, Value as ParserValue};

/// Parses a GraphQL type system document.
pub fn parse_document(source: &str) -> Result<Document, Error> {
    reject_out_of_range_ints(source)?;

    let parsed = cynic_parser::parse_type_system_document(source).map_err(|err| Error::Parse(err.to_string()))?;

    Ok(Document {
        definitions: parsed.definitions().map(convert_definition).collect(),
    })
}

/// Rejects integer literals outside the `i64` range, which `cynic-parser` cannot hold.
fn reject_out_of_range_ints(source: &str) -> Result<(), Error> {
    let bytes = source.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'#' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'"' if bytes[pos..].starts_with(b"\"\"\"") => {
                pos += 3;
                while pos < bytes.len() && !bytes[pos..].starts_with(b"\"\"\"") {
                    pos += if bytes[pos..].starts_with(b"\\\"\"\"") { 4 } else { 1 };
                }
                pos += 3;
            }
            b'"' => {
                pos += 1;
                while pos < bytes.len() && !matches!(bytes[pos], b'"' | b'\n') {
                    pos += if bytes[pos] == b'\\' { 2 } else { 1 };
                }
                pos += 1;
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                }
            }
            b'-' | b'0'..=b'9' => {
                let start = pos;
                if bytes[pos] == b'-' {
                    pos += 1;
                }
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }

                let literal = &source[start..pos];
                let is_float = matches!(bytes.get(pos), Some(b'.' | b'e' | b'E'));

                if !is_float && literal != "-" && literal.parse::<i64>().is_err() {
                    return Err(Error::Parse(format!("integer `{literal}` does not fit in 64 bits")));
                }

                // The rest of a float, or an invalid suffix the lexer reports.
                let continues_number = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'+' | b'-');
                while pos < bytes.len() && continues_number(bytes[pos]) {
                    pos += 1;
                }
            }
            _ => pos += 1,
        }
    }

    Ok(())
}

fn convert_definition(definition: ast::Definition<'_>) -> Definition {
    match definition {
        ast::Definition::Schema(schema) => Definition::Schema(convert_schema_definition(schema)),
        ast::Definition::Type(typedef) => Definition::Type(convert_type_definition(typedef)),
        ast::Definition::Directive(directive) => Definition::Directive(convert_directive_definition(directive)),
        ast::Definition::SchemaExtension(_) => Definition::Other(OtherDefinition {
            kind: "schema extension".to_owned(),
            name: None,
        }),
        ast::Definition::TypeExtension(typedef) => Definition::Other(OtherDefinition {
            kind: "type extension".to_owned(),
            name: Some(typedef.name().to_owned()),
        }),
    }
}

fn convert_schema_definition(schema: ast::SchemaDefinition<'_>) -> SchemaDefinition {
    let operation_types = [
        (OperationType::Query, schema.query_type()),
        (OperationType::Mutation, schema.mutation_type()),
        (OperationType::Subscription, schema.subscription_type()),
    ]
    .into_iter()
    .filter_map(|(operation, root)| {
        root.map(|root| OperationTypeDefinition {
            operation,
            named_type: root.named_type().to_owned(),
        })
    })
    .collect();

    SchemaDefinition {
        directives: schema.directives().map(convert_directive).collect(),
        operation_types,
    }
}

fn convert_type_definition(typedef: ast::TypeDefinition<'_>) -> TypeDefinition {
    let name = typedef.name().to_owned();
    let description = typedef
        .description()
        .map(|description| description.to_cow().into_owned());
    let directives = typedef.directives().map(convert_directive).collect();

    match typedef {
        ast::TypeDefinition::Scalar(_) => TypeDefinition::Scalar(ScalarDefinition {
            name,
            description,
            directives,
        }),
        ast::TypeDefinition::Object(object) => TypeDefinition::Object(ObjectDefinition {
            name,
            description,
            implements_interfaces: object.implements_interfaces().map(ToOwned::to_owned).collect(),
            directives,
            fields: object.fields().map(convert_field_definition).collect(),
        }),
        ast::TypeDefinition::Interface(interface) => TypeDefinition::Interface(InterfaceDefinition {
            name,
            description,
            implements_interfaces: interface.implements_interfaces().map(ToOwned::to_owned).collect(),
            directives,
            fields: interface.fields().map(convert_field_definition).collect(),
        }),
        ast::TypeDefinition::Union(union) => TypeDefinition::Union(UnionDefinition {
            name,
            description,
            directives,
            members: union.members().map(|member| member.name().to_owned()).collect(),
        }),
        ast::TypeDefinition::Enum(enm) => TypeDefinition::Enum(EnumDefinition {
            name,
            description,
            directives,
            values: enm
                .values()
                .map(|value| EnumValueDefinition {
                    value: value.value().to_owned(),
                    description: value
                        .description()
                        .map(|description| description.to_cow().into_owned()),
                    directives: value.directives().map(convert_directive).collect(),
                })
                .collect(),
        }),
        ast::TypeDefinition::InputObject(input_object) => TypeDefinition::InputObject(InputObjectDefinition {
            name,
            description,
            directives,
            fields: input_object.fields().map(convert_input_value_definition).collect(),
        }),
    }
}

fn convert_directive_definition(directive: ast::DirectiveDefinition<'_>) -> DirectiveDefinition {
    DirectiveDefinition {
        name: directive.name().to_owned(),
        description: directive
            .description()
            .map(|description| description.to_cow().into_owned()),
        arguments: directive.arguments().map(convert_input_value_definition).collect(),
        locations: directive
            .locations()
            .map(|location| directive_location_name(location).to_owned())
            .collect(),
        repeatable: directive.is_repeatable(),
    }
}

fn convert_field_definition(field: ast::FieldDefinition<'_>) -> FieldDefinition {
    FieldDefinition {
        name: field.name().to_owned(),
        description: field.description().map(|description| description.to_cow().into_owned()),
        arguments: field.arguments().map(convert_input_value_definition).collect(),
        ty: convert_type(field.ty()),
        directives: field.directives().map(convert_directive).collect(),
    }
}

fn convert_input_value_definition(input_value: ast::InputValueDefinition<'_>) -> InputValueDefinition {
    InputValueDefinition {
        name: input_value.name().to_owned(),
        description: input_value
            .description()
            .map(|description| description.to_cow().into_owned()),
        ty: convert_type(input_value.ty()),
        default_value: input_value
            .default_value()
            .map(|default| convert_value(default.into())),
        directives: input_value.directives().map(convert_directive).collect(),
    }
}

fn convert_directive(directive: ast::Directive<'_>) -> Directive {
    Directive {
        name: directive.name().to_owned(),
        arguments: directive
            .arguments()
            .map(|argument| Argument {
                name: argument.name().to_owned(),
                value: convert_value(argument.value().into()),
            })
            .collect(),
    }
}

/// The parser exposes wrappers outermost first, the tree is built from the inside out.
fn convert_type(ty: ast::Type<'_>) -> Type {
    let wrappers = ty.wrappers().collect::<Vec<_>>();

    wrappers
        .into_iter()
        .rev()
        .fold(Type::named(ty.name()), |inner, wrapper| match wrapper {
            WrappingType::NonNull => inner.non_null(),
            WrappingType::List => inner.list(),
        })
}

fn convert_value(value: ParserValue<'_>) -> Value {
    match value {
        ParserValue::Variable(variable) => Value::Variable(variable.name().to_owned()),
        ParserValue::Int(n) => Value::Int(n.as_i64().to_string()),
        ParserValue::Float(n) => Value::Float(n.as_f64().to_string()),
        ParserValue::String(s) => Value::String(s.value().to_string()),
        ParserValue::Boolean(b) => Value::Boolean(b.value()),
        ParserValue::Null(_) => Value::Null,
        ParserValue::Enum(enm) => Value::Enum(enm.name().to_owned()),
        ParserValue::List(list) => Value::List(list.into_iter().map(convert_value).collect()),
        ParserValue::Object(object) => Value::Object(
            object
                .fields()
                .map(|field| ObjectField {
                    name: field.name().to_owned(),
                    value: convert_value(field.value()),
                })
                .collect(),
        ),
    }
}

fn directive_location_name(location: ast::DirectiveLocation) -> &'static str {
    match location {
        ast::DirectiveLocation::Query => "QUERY",
        ast::DirectiveLocation::Mutation => "MUTATION",
        ast::DirectiveLocation::Subscription => "SUBSCRIPTION",
        ast::DirectiveLocation::Field => "FIELD",
        ast::DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
        ast::DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
        ast::DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
        ast::DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
        ast::DirectiveLocation::Schema => "SCHEMA",
        ast::DirectiveLocation::Scalar => "SCALAR",
        ast::DirectiveLocation::Object => "OBJECT",
        ast::DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
        ast::DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
        ast::DirectiveLocation::Interface => "INTERFACE",
        ast::DirectiveLocation::Union => "UNION",
        ast::DirectiveLocation::Enum => "ENUM",
        ast::DirectiveLocation::EnumValue => "ENUM_VALUE",
        ast::DirectiveLocation::InputObject => "INPUT_OBJECT",
        ast::DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}
