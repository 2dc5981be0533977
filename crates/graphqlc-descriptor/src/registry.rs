use crate::{
    syntax::{self, TypeDefinition},
    DescriptorBuilder, Definition, DirectiveDefinition, DirectiveDefinitionId, Enum, EnumId, Error, FileDescriptor,
    InputObject, InputObjectId, Interface, InterfaceId, Object, ObjectId, Scalar, ScalarId, Schema, Union, UnionId,
};
use indexmap::IndexMap;

const QUERY_TYPE_NAME: &str = "Query";
const MUTATION_TYPE_NAME: &str = "Mutation";
const SUBSCRIPTION_TYPE_NAME: &str = "Subscription";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stub {
    Type(Definition),
    Directive(DirectiveDefinitionId),
}

/// Name to descriptor map of one file.
///
/// Built once by [`TypeRegistry::register_stubs`] and read-only afterwards: populating the
/// descriptors only ever looks names up.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    names: IndexMap<String, Stub>,
    has_schema: bool,
}

impl TypeRegistry {
    /// First pass. Pushes an empty descriptor per top level definition into `file` and keys it by
    /// name.
    pub fn register_stubs(document: &syntax::Document, file: &mut FileDescriptor) -> Result<Self, Error> {
        let mut registry = TypeRegistry::default();

        for definition in &document.definitions {
            match definition {
                syntax::Definition::Schema(_) => {
                    if registry.has_schema {
                        return Err(Error::DuplicateSchema);
                    }
                    registry.has_schema = true;
                }
                syntax::Definition::Type(typedef) => {
                    let name = typedef.name();
                    registry.ensure_unique(name)?;

                    let definition = match typedef {
                        TypeDefinition::Scalar(_) => Definition::Scalar(ScalarId::from(file.scalars.push_return_idx(
                            Scalar {
                                name: name.to_owned(),
                                ..Default::default()
                            },
                        ))),
                        TypeDefinition::Object(_) => Definition::Object(ObjectId::from(file.objects.push_return_idx(
                            Object {
                                name: name.to_owned(),
                                ..Default::default()
                            },
                        ))),
                        TypeDefinition::Interface(_) => Definition::Interface(InterfaceId::from(
                            file.interfaces.push_return_idx(Interface {
                                name: name.to_owned(),
                                ..Default::default()
                            }),
                        )),
                        TypeDefinition::Union(_) => Definition::Union(UnionId::from(file.unions.push_return_idx(
                            Union {
                                name: name.to_owned(),
                                ..Default::default()
                            },
                        ))),
                        TypeDefinition::Enum(_) => Definition::Enum(EnumId::from(file.enums.push_return_idx(Enum {
                            name: name.to_owned(),
                            ..Default::default()
                        }))),
                        TypeDefinition::InputObject(_) => Definition::InputObject(InputObjectId::from(
                            file.input_objects.push_return_idx(InputObject {
                                name: name.to_owned(),
                                ..Default::default()
                            }),
                        )),
                    };

                    registry.names.insert(name.to_owned(), Stub::Type(definition));
                }
                syntax::Definition::Directive(directive) => {
                    registry.ensure_unique(&directive.name)?;

                    let id = DirectiveDefinitionId::from(file.directive_definitions.push_return_idx(
                        DirectiveDefinition {
                            name: directive.name.clone(),
                            ..Default::default()
                        },
                    ));

                    registry.names.insert(directive.name.clone(), Stub::Directive(id));
                }
                syntax::Definition::Other(other) => {
                    return Err(Error::UnknownDefinition {
                        kind: other.kind.clone(),
                        name: other.name.clone(),
                    });
                }
            }
        }

        Ok(registry)
    }

    /// Second pass. Fills every stub in, in declaration order.
    pub fn populate(&self, document: &syntax::Document, file: &mut FileDescriptor) -> Result<(), Error> {
        let builder = DescriptorBuilder::new(self);

        for definition in &document.definitions {
            match definition {
                syntax::Definition::Schema(schema) => {
                    file.schema = builder.schema(schema)?;
                }
                syntax::Definition::Type(typedef) => {
                    let stub = self.names.get(typedef.name()).copied();

                    match (typedef, stub) {
                        (TypeDefinition::Scalar(def), Some(Stub::Type(Definition::Scalar(id)))) => {
                            file[id] = builder.scalar(def)?;
                        }
                        (TypeDefinition::Object(def), Some(Stub::Type(Definition::Object(id)))) => {
                            file[id] = builder.object(def)?;
                        }
                        (TypeDefinition::Interface(def), Some(Stub::Type(Definition::Interface(id)))) => {
                            file[id] = builder.interface(def)?;
                        }
                        (TypeDefinition::Union(def), Some(Stub::Type(Definition::Union(id)))) => {
                            file[id] = builder.union(def)?;
                        }
                        (TypeDefinition::Enum(def), Some(Stub::Type(Definition::Enum(id)))) => {
                            file[id] = builder.enum_type(def)?;
                        }
                        (TypeDefinition::InputObject(def), Some(Stub::Type(Definition::InputObject(id)))) => {
                            file[id] = builder.input_object(def)?;
                        }
                        _ => {
                            return Err(Error::DuplicateDefinition {
                                name: typedef.name().to_owned(),
                            })
                        }
                    }
                }
                syntax::Definition::Directive(def) => {
                    let Some(Stub::Directive(id)) = self.names.get(&def.name).copied() else {
                        return Err(Error::DuplicateDefinition { name: def.name.clone() });
                    };
                    file[id] = builder.directive_definition(def)?;
                }
                syntax::Definition::Other(other) => {
                    return Err(Error::UnknownDefinition {
                        kind: other.kind.clone(),
                        name: other.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds the schema of a file without a `schema` block from the conventional root type
    /// names. A missing `Query` object is created empty and appended to the file.
    pub fn synthesize_schema(&self, file: &mut FileDescriptor) -> Result<(), Error> {
        let query = match self.root_object(QUERY_TYPE_NAME)? {
            Some(query) => query,
            None => ObjectId::from(file.objects.push_return_idx(Object {
                name: QUERY_TYPE_NAME.to_owned(),
                ..Default::default()
            })),
        };

        file.schema = Schema {
            directives: Vec::new(),
            query: Some(query),
            mutation: self.root_object(MUTATION_TYPE_NAME)?,
            subscription: self.root_object(SUBSCRIPTION_TYPE_NAME)?,
        };

        Ok(())
    }

    /// Resolves a type name: file definitions first, then the built-in scalars.
    pub fn resolve(&self, name: &str) -> Option<Definition> {
        match self.names.get(name) {
            Some(Stub::Type(definition)) => Some(*definition),
            Some(Stub::Directive(_)) => None,
            None => name.parse().ok().map(Definition::BuiltinScalar),
        }
    }

    /// Number of registered stubs, the `schema` block included.
    pub fn len(&self) -> usize {
        self.names.len() + usize::from(self.has_schema)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_schema(&self) -> bool {
        self.has_schema
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    fn ensure_unique(&self, name: &str) -> Result<(), Error> {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateDefinition { name: name.to_owned() });
        }

        Ok(())
    }

    fn root_object(&self, name: &str) -> Result<Option<ObjectId>, Error> {
        match self.names.get(name) {
            None => Ok(None),
            Some(Stub::Type(Definition::Object(id))) => Ok(Some(*id)),
            Some(_) => Err(Error::UnresolvedTypeReference {
                name: name.to_owned(),
                referenced_from: "the implicit schema definition".to_owned(),
            }),
        }
    }
}

trait VecExt<T> {
    fn push_return_idx(&mut self, elem: T) -> usize;
}

impl<T> VecExt<T> for Vec<T> {
    fn push_return_idx(&mut self, elem: T) -> usize {
        let idx = self.len();
        self.push(elem);
        idx
    }
}
