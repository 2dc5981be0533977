//! Resolution of GraphQL type system documents into [`FileDescriptor`]s.
//!
//! Resolution happens in two passes over the top level definitions of a file. The first pass
//! allocates an empty descriptor per definition and registers it by name in a [`TypeRegistry`],
//! the second pass fills every descriptor in, looking up each referenced type name in the
//! registry. Definitions can therefore reference each other in any order, cycles included, and
//! every reference to a name ends up pointing at the same descriptor.

mod builder;
mod error;
mod file_descriptor;
mod parse;
mod registry;
pub mod syntax;

pub use self::{
    builder::DescriptorBuilder,
    error::Error,
    file_descriptor::*,
    parse::parse_document,
    registry::TypeRegistry,
};

/// Parses and resolves one SDL source file.
pub fn compile(name: impl Into<String>, source: &str) -> Result<FileDescriptor, Error> {
    let document = parse_document(source)?;
    build_file(name, &document)
}

/// Resolves an already parsed document.
pub fn build_file(name: impl Into<String>, document: &syntax::Document) -> Result<FileDescriptor, Error> {
    let mut file = FileDescriptor {
        name: name.into(),
        ..Default::default()
    };

    let registry = TypeRegistry::register_stubs(document, &mut file)?;
    tracing::debug!(file = %file.name, stubs = registry.len(), "registered definitions");

    registry.populate(document, &mut file)?;

    if !registry.has_schema() {
        registry.synthesize_schema(&mut file)?;
    }

    Ok(file)
}
