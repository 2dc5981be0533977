use crate::{
    syntax, Definition, Directive, DirectiveDefinition, DirectiveLocation, Enum, EnumValue, Error, Field, InputObject,
    InputValue, Interface, InterfaceId, NamedType, NonNullType, Object, ObjectId, Scalar, Schema, TypeReference,
    TypeRegistry, Union, Value,
};

/// Second pass builder. Turns syntax nodes into descriptors, resolving every type name through
/// the registry filled by the first pass.
pub struct DescriptorBuilder<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        DescriptorBuilder { registry }
    }

    pub fn schema(&self, schema: &syntax::SchemaDefinition) -> Result<Schema, Error> {
        let mut out = Schema {
            directives: self.directives(&schema.directives, "the schema definition")?,
            ..Default::default()
        };

        for operation_type in &schema.operation_types {
            let id = self.root_object(&operation_type.named_type)?;

            match operation_type.operation {
                syntax::OperationType::Query => out.query = Some(id),
                syntax::OperationType::Mutation => out.mutation = Some(id),
                syntax::OperationType::Subscription => out.subscription = Some(id),
            }
        }

        Ok(out)
    }

    pub fn scalar(&self, scalar: &syntax::ScalarDefinition) -> Result<Scalar, Error> {
        Ok(Scalar {
            name: scalar.name.clone(),
            description: scalar.description.clone(),
            directives: self.directives(&scalar.directives, &scalar.name)?,
        })
    }

    pub fn object(&self, object: &syntax::ObjectDefinition) -> Result<Object, Error> {
        Ok(Object {
            name: object.name.clone(),
            description: object.description.clone(),
            directives: self.directives(&object.directives, &object.name)?,
            implements: self.implements(&object.implements_interfaces, &object.name)?,
            fields: self.fields(&object.fields, &object.name)?,
        })
    }

    pub fn interface(&self, interface: &syntax::InterfaceDefinition) -> Result<Interface, Error> {
        Ok(Interface {
            name: interface.name.clone(),
            description: interface.description.clone(),
            directives: self.directives(&interface.directives, &interface.name)?,
            implements: self.implements(&interface.implements_interfaces, &interface.name)?,
            fields: self.fields(&interface.fields, &interface.name)?,
        })
    }

    pub fn union(&self, union: &syntax::UnionDefinition) -> Result<Union, Error> {
        let members = union
            .members
            .iter()
            .map(|member| self.named_type(member, &union.name))
            .collect::<Result<_, _>>()?;

        Ok(Union {
            name: union.name.clone(),
            description: union.description.clone(),
            directives: self.directives(&union.directives, &union.name)?,
            members,
        })
    }

    pub fn enum_type(&self, r#enum: &syntax::EnumDefinition) -> Result<Enum, Error> {
        let values = r#enum
            .values
            .iter()
            .map(|value| {
                Ok(EnumValue {
                    name: value.value.clone(),
                    description: value.description.clone(),
                    directives: self.directives(&value.directives, &format!("{}.{}", r#enum.name, value.value))?,
                })
            })
            .collect::<Result<_, Error>>()?;

        Ok(Enum {
            name: r#enum.name.clone(),
            description: r#enum.description.clone(),
            directives: self.directives(&r#enum.directives, &r#enum.name)?,
            values,
        })
    }

    pub fn input_object(&self, input_object: &syntax::InputObjectDefinition) -> Result<InputObject, Error> {
        Ok(InputObject {
            name: input_object.name.clone(),
            description: input_object.description.clone(),
            directives: self.directives(&input_object.directives, &input_object.name)?,
            fields: self.input_values(&input_object.fields, &input_object.name)?,
        })
    }

    pub fn directive_definition(&self, directive: &syntax::DirectiveDefinition) -> Result<DirectiveDefinition, Error> {
        let context = format!("@{}", directive.name);

        let locations = directive
            .locations
            .iter()
            .map(|location| {
                location
                    .parse::<DirectiveLocation>()
                    .map_err(|_| Error::UnknownDirectiveLocation {
                        location: location.clone(),
                        directive: directive.name.clone(),
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(DirectiveDefinition {
            name: directive.name.clone(),
            description: directive.description.clone(),
            arguments: self.input_values(&directive.arguments, &context)?,
            locations,
            repeatable: directive.repeatable,
        })
    }

    pub fn field(&self, field: &syntax::FieldDefinition, parent: &str) -> Result<Field, Error> {
        let context = format!("{parent}.{}", field.name);

        Ok(Field {
            name: field.name.clone(),
            description: field.description.clone(),
            directives: self.directives(&field.directives, &context)?,
            r#type: self.type_reference(&field.ty, &context)?,
            arguments: self.input_values(&field.arguments, &context)?,
        })
    }

    pub fn input_value(&self, input_value: &syntax::InputValueDefinition, parent: &str) -> Result<InputValue, Error> {
        let context = format!("{parent}.{}", input_value.name);

        Ok(InputValue {
            name: input_value.name.clone(),
            description: input_value.description.clone(),
            r#type: self.type_reference(&input_value.ty, &context)?,
            default_value: input_value
                .default_value
                .as_ref()
                .map(|value| self.value(value, &context))
                .transpose()?,
            directives: self.directives(&input_value.directives, &context)?,
        })
    }

    /// Resolves a type reference. `context` names the definition it appears in, for errors.
    pub fn type_reference(&self, ty: &syntax::Type, context: &str) -> Result<TypeReference, Error> {
        match ty {
            syntax::Type::Named(name) => Ok(TypeReference::Named(self.named_type(name, context)?)),
            syntax::Type::List(inner) => Ok(TypeReference::List(Box::new(self.type_reference(inner, context)?))),
            syntax::Type::NonNull(inner) => match inner.as_ref() {
                syntax::Type::Named(name) => Ok(TypeReference::NonNull(NonNullType::Named(
                    self.named_type(name, context)?,
                ))),
                syntax::Type::List(item) => Ok(TypeReference::NonNull(NonNullType::List(Box::new(
                    self.type_reference(item, context)?,
                )))),
                syntax::Type::NonNull(_) => Err(Error::UnknownType(format!("non-null of non-null in {context}"))),
            },
        }
    }

    pub fn directives(&self, directives: &[syntax::Directive], context: &str) -> Result<Vec<Directive>, Error> {
        directives
            .iter()
            .map(|directive| {
                let arguments = directive
                    .arguments
                    .iter()
                    .map(|argument| Ok((argument.name.clone(), self.value(&argument.value, context)?)))
                    .collect::<Result<_, Error>>()?;

                Ok(Directive {
                    name: directive.name.clone(),
                    arguments,
                })
            })
            .collect()
    }

    pub fn value(&self, value: &syntax::Value, context: &str) -> Result<Value, Error> {
        let unknown = |value: &str| Error::UnknownValue {
            value: value.to_owned(),
            context: context.to_owned(),
        };

        Ok(match value {
            syntax::Value::Variable(name) => Value::Variable(name.clone()),
            syntax::Value::Int(text) => Value::Int(text.parse().map_err(|_| unknown(text))?),
            syntax::Value::Float(text) => {
                let n = text.parse::<f64>().map_err(|_| unknown(text))?;
                if !n.is_finite() {
                    return Err(unknown(text));
                }
                Value::Float(n)
            }
            syntax::Value::String(s) => Value::String(s.clone()),
            syntax::Value::Boolean(b) => Value::Boolean(*b),
            syntax::Value::Null => Value::Null,
            syntax::Value::Enum(symbol) => Value::Enum(symbol.clone()),
            syntax::Value::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.value(item, context))
                    .collect::<Result<_, _>>()?,
            ),
            syntax::Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|field| Ok((field.name.clone(), self.value(&field.value, context)?)))
                    .collect::<Result<_, Error>>()?,
            ),
        })
    }

    fn fields(&self, fields: &[syntax::FieldDefinition], parent: &str) -> Result<Vec<Field>, Error> {
        fields.iter().map(|field| self.field(field, parent)).collect()
    }

    fn input_values(&self, values: &[syntax::InputValueDefinition], parent: &str) -> Result<Vec<InputValue>, Error> {
        values.iter().map(|value| self.input_value(value, parent)).collect()
    }

    fn named_type(&self, name: &str, context: &str) -> Result<NamedType, Error> {
        let definition = self
            .registry
            .resolve(name)
            .ok_or_else(|| Error::UnresolvedTypeReference {
                name: name.to_owned(),
                referenced_from: context.to_owned(),
            })?;

        Ok(NamedType {
            name: name.to_owned(),
            definition,
        })
    }

    fn implements(&self, interfaces: &[String], context: &str) -> Result<Vec<InterfaceId>, Error> {
        interfaces
            .iter()
            .map(|name| {
                self.registry
                    .resolve(name)
                    .and_then(Definition::as_interface)
                    .ok_or_else(|| Error::UnresolvedTypeReference {
                        name: name.clone(),
                        referenced_from: context.to_owned(),
                    })
            })
            .collect()
    }

    fn root_object(&self, name: &str) -> Result<ObjectId, Error> {
        self.registry
            .resolve(name)
            .and_then(Definition::as_object)
            .ok_or_else(|| Error::UnresolvedTypeReference {
                name: name.to_owned(),
                referenced_from: "the schema definition".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_document, BuiltinScalar, FileDescriptor};
    use pretty_assertions::assert_eq;
    use syntax::Type;

    fn empty_registry() -> TypeRegistry {
        let document = syntax::Document::default();
        TypeRegistry::register_stubs(&document, &mut FileDescriptor::default()).unwrap()
    }

    #[test]
    fn non_null_list_of_named() {
        let registry = empty_registry();
        let builder = DescriptorBuilder::new(&registry);

        let resolved = builder
            .type_reference(&Type::named("String").list().non_null(), "Query.tags")
            .unwrap();

        assert_eq!(
            resolved,
            TypeReference::NonNull(NonNullType::List(Box::new(TypeReference::Named(NamedType {
                name: "String".to_owned(),
                definition: Definition::BuiltinScalar(BuiltinScalar::String),
            }))))
        );
        assert_eq!(resolved.to_string(), "[String]!");
    }

    #[test]
    fn non_null_of_non_null_is_an_unknown_type() {
        let registry = empty_registry();
        let builder = DescriptorBuilder::new(&registry);

        let error = builder
            .type_reference(&Type::named("Int").non_null().non_null(), "Query.count")
            .unwrap_err();

        insta::assert_snapshot!(error.to_string(), @"unknown type shape: non-null of non-null in Query.count");
    }

    #[test]
    fn float_literals_are_rendered_with_six_digits() {
        let registry = empty_registry();
        let builder = DescriptorBuilder::new(&registry);

        let value = builder.value(&syntax::Value::Float("3.14".to_owned()), "x").unwrap();

        assert_eq!(value, Value::Float(3.14));
        assert_eq!(value.to_string(), "3.140000");
    }

    #[test]
    fn out_of_range_int_is_an_unknown_value() {
        let registry = empty_registry();
        let builder = DescriptorBuilder::new(&registry);

        let error = builder
            .value(&syntax::Value::Int("99999999999999999999".to_owned()), "Query.page")
            .unwrap_err();

        assert_eq!(
            error,
            Error::UnknownValue {
                value: "99999999999999999999".to_owned(),
                context: "Query.page".to_owned(),
            }
        );
    }

    #[test]
    fn unknown_directive_location() {
        let document = syntax::Document {
            definitions: vec![syntax::Definition::Directive(syntax::DirectiveDefinition {
                name: "weird".to_owned(),
                locations: vec!["NOWHERE".to_owned()],
                ..Default::default()
            })],
        };

        let error = crate::build_file("weird.graphql", &document).unwrap_err();

        insta::assert_snapshot!(error.to_string(), @"unknown directive location `NOWHERE` on @weird");
    }

    #[test]
    fn implementing_a_non_interface_fails() {
        let document = parse_document("type Query { a: Int } type Thing implements Query { a: Int }").unwrap();

        let error = crate::build_file("a.graphql", &document).unwrap_err();

        assert_eq!(
            error,
            Error::UnresolvedTypeReference {
                name: "Query".to_owned(),
                referenced_from: "Thing".to_owned(),
            }
        );
    }
}
