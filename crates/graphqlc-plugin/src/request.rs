mod convert;

use crate::protocol::{CodeGeneratorRequest, FileDescriptorGraphql, Version};
use graphqlc_descriptor::FileDescriptor;

/// Builds the request every plugin of one run receives.
///
/// The compiled files are converted to their wire form once, each plugin then gets its own copy
/// carrying its parameter string.
#[derive(Debug, Clone)]
pub struct RequestAssembler {
    compiler_version: Version,
    file_to_generate: Vec<String>,
    graphql_file: Vec<FileDescriptorGraphql>,
}

impl RequestAssembler {
    pub fn new(compiler_version: Version, files: &[FileDescriptor]) -> Self {
        RequestAssembler {
            compiler_version,
            file_to_generate: files.iter().map(|file| file.name.clone()).collect(),
            graphql_file: files.iter().map(convert::file_descriptor).collect(),
        }
    }

    pub fn request(&self, parameter: &str) -> CodeGeneratorRequest {
        CodeGeneratorRequest {
            file_to_generate: self.file_to_generate.clone(),
            parameter: parameter.to_owned(),
            compiler_version: Some(self.compiler_version.clone()),
            graphql_file: self.graphql_file.clone(),
        }
    }

    pub fn files(&self) -> &[FileDescriptorGraphql] {
        &self.graphql_file
    }
}

impl Version {
    /// Builds a version from the pieces cargo exposes as `CARGO_PKG_VERSION_*`.
    pub fn from_parts(major: &str, minor: &str, patch: &str, pre: &str) -> Self {
        Version {
            major: major.parse().unwrap_or_default(),
            minor: minor.parse().unwrap_or_default(),
            patch: patch.parse().unwrap_or_default(),
            suffix: pre.to_owned(),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if !self.suffix.is_empty() {
            write!(f, "-{}", self.suffix)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{type_descriptor_proto, value_descriptor_proto, ValueDescriptorProto};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use prost::Message;

    fn compile(sdl: &str) -> FileDescriptor {
        graphqlc_descriptor::compile("schema.graphql", sdl).unwrap()
    }

    #[test]
    fn every_plugin_gets_its_own_parameter() {
        let files = [compile("type Query { a: Int }")];
        let assembler = RequestAssembler::new(Version::from_parts("0", "3", "1", "alpha"), &files);

        let first = assembler.request("paths=source_relative");
        let second = assembler.request("");

        assert_eq!(first.parameter, "paths=source_relative");
        assert_eq!(second.parameter, "");
        assert_eq!(first.file_to_generate, ["schema.graphql"]);
        assert_eq!(first.graphql_file, second.graphql_file);
        assert_eq!(first.compiler_version.unwrap().to_string(), "0.3.1-alpha");
    }

    #[test]
    fn request_survives_the_wire() {
        let files = [compile(indoc! {r#"
            "A person"
            type Person implements Named @key(fields: "id") {
              id: ID!
              name(format: Format = SHORT, limit: Int = 3, ratio: Float = 0.25, nothing: String = null): String
              friends: [Person!]!
            }
            interface Named { name: String }
            enum Format { SHORT LONG }
            union Anything = Person
            directive @key(fields: String!) repeatable on OBJECT | QUERY
        "#})];
        let request = RequestAssembler::new(Version::from_parts("1", "0", "0", ""), &files).request("x");

        let decoded = CodeGeneratorRequest::decode(request.encode_to_vec().as_slice()).unwrap();

        assert_eq!(decoded, request);

        let file = &decoded.graphql_file[0];
        let person = &file.objects[0];
        assert_eq!(person.description, "A person");
        assert_eq!(person.implements[0].name, "Named");
        assert_eq!(file.schema.as_ref().unwrap().query.as_ref().unwrap().name, "Query");

        let defaults = person.fields[1]
            .arguments
            .iter()
            .map(|argument| argument.default_value.clone().and_then(|value| value.value))
            .collect::<Vec<_>>();
        assert_eq!(
            defaults,
            [
                Some(value_descriptor_proto::Value::EnumValue(
                    crate::protocol::EnumValueDescriptorProto { value: "SHORT".to_owned() }
                )),
                Some(value_descriptor_proto::Value::IntValue(3)),
                Some(value_descriptor_proto::Value::FloatValue(0.25)),
                Some(value_descriptor_proto::Value::NullValue(Default::default())),
            ]
        );

        let friends = person.fields[2].r#type.clone().and_then(|ty| ty.r#type);
        assert!(matches!(friends, Some(type_descriptor_proto::Type::NonNullType(_))));

        assert_eq!(
            person.directives[0].arguments[0].value,
            Some(ValueDescriptorProto {
                value: Some(value_descriptor_proto::Value::StringValue("id".to_owned()))
            })
        );
    }
}
