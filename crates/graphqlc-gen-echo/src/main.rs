//! Prints every file to generate back as SDL, into `<name>.echo.graphql`.

mod render;

use graphqlc_plugin::protocol::{code_generator_response::File, CodeGeneratorRequest};
use std::{
    fmt::Write as _,
    path::{Component, Path},
    process::ExitCode,
};

fn main() -> ExitCode {
    graphqlc_plugin::plugin::run(generate)
}

fn generate(request: &CodeGeneratorRequest) -> Result<Vec<File>, String> {
    request
        .graphql_file
        .iter()
        .filter(|file| request.file_to_generate.contains(&file.name))
        .map(|file| {
            let mut content = String::new();
            write!(content, "{}", render::Sdl(file))
                .map_err(|_| format!("{}: a field or argument has no type", file.name))?;

            Ok(File {
                name: echo_file_name(&file.name),
                content,
                ..Default::default()
            })
        })
        .collect()
}

/// Output names must be relative, so roots and `..` of the source path are dropped.
fn echo_file_name(name: &str) -> String {
    let stem = name.strip_suffix(".graphql").unwrap_or(name);
    let relative = Path::new(stem)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("{relative}.echo.graphql")
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphqlc_plugin::{protocol::Version, RequestAssembler};
    use pretty_assertions::assert_eq;

    #[test]
    fn file_names() {
        assert_eq!(echo_file_name("schema/books.graphql"), "schema/books.echo.graphql");
        assert_eq!(echo_file_name("books.gql"), "books.gql.echo.graphql");
        assert_eq!(echo_file_name("/srv/api/books.graphql"), "srv/api/books.echo.graphql");
        assert_eq!(echo_file_name("../shared/./books.graphql"), "shared/books.echo.graphql");
    }

    #[test]
    fn only_files_to_generate_are_echoed() {
        let files = ["a.graphql", "b.graphql"].map(|name| graphqlc_descriptor::compile(name, "type Query { a: Int }").unwrap());
        let mut request = RequestAssembler::new(Version::default(), &files).request("");
        request.file_to_generate.retain(|name| name == "b.graphql");

        let generated = generate(&request).unwrap();

        let names = generated.iter().map(|file| file.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["b.echo.graphql"]);
        assert!(generated[0].insertion_point.is_empty());
    }

    #[test]
    fn missing_types_are_reported() {
        let file = graphqlc_descriptor::compile("a.graphql", "type Query { a: Int }").unwrap();
        let mut request = RequestAssembler::new(Version::default(), &[file]).request("");
        request.graphql_file[0].objects[0].fields[0].r#type = None;

        assert_eq!(generate(&request).unwrap_err(), "a.graphql: a field or argument has no type");
    }
}
