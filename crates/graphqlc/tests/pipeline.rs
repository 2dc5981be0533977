#![cfg(unix)]

use graphqlc::{CompilerConfig, CompilerError, PluginInvocation};
use graphqlc_plugin::{
    protocol::{code_generator_response::File, CodeGeneratorRequest, CodeGeneratorResponse},
    PluginError, EXECUTABLE_PREFIX,
};
use indexmap::IndexMap;
use indoc::indoc;
use pretty_assertions::assert_eq;
use prost::Message;
use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("plugins")).unwrap();
        Fixture { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn schema(&self, name: &str, sdl: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, sdl).unwrap();
        path
    }

    /// A plugin that stores its request in `<name>.request` and answers with `response`.
    fn plugin(&self, name: &str, response: &CodeGeneratorResponse) {
        let canned = self.path(&format!("plugins/{name}.response"));
        fs::write(&canned, response.encode_to_vec()).unwrap();

        self.script(
            name,
            &format!(
                "cat > '{}'\ncat '{}'",
                self.path(&format!("plugins/{name}.request")).display(),
                canned.display()
            ),
        );
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.path(&format!("plugins/{EXECUTABLE_PREFIX}{name}"));
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn request(&self, name: &str) -> CodeGeneratorRequest {
        let bytes = fs::read(self.path(&format!("plugins/{name}.request"))).unwrap();
        CodeGeneratorRequest::decode(bytes.as_slice()).unwrap()
    }

    fn config(&self, files: Vec<PathBuf>, plugins: &[(&str, &str, &str)]) -> CompilerConfig {
        CompilerConfig {
            files,
            plugins: plugins
                .iter()
                .map(|(name, parameter, output_dir)| {
                    let invocation = PluginInvocation {
                        name: (*name).to_owned(),
                        parameter: (*parameter).to_owned(),
                        output_dir: self.path(output_dir),
                    };
                    ((*name).to_owned(), invocation)
                })
                .collect::<IndexMap<_, _>>(),
            search_path: vec![self.path("plugins")],
        }
    }
}

fn new_file(name: &str, content: &str) -> File {
    File {
        name: name.to_owned(),
        content: content.to_owned(),
        ..Default::default()
    }
}

#[test]
fn every_plugin_gets_all_files_and_its_own_parameter() {
    let fixture = Fixture::new();
    let books = fixture.schema("books.graphql", "type Query { books: [Book!]! } type Book { title: String! }");
    let users = fixture.schema(
        "users.graphql",
        indoc! {r#"
            schema { query: Root }
            type Root { me: User }
            type User { name: String }
        "#},
    );

    fixture.plugin(
        "first",
        &CodeGeneratorResponse {
            file: vec![new_file("first.txt", "1")],
            ..Default::default()
        },
    );
    fixture.plugin(
        "second",
        &CodeGeneratorResponse {
            file: vec![new_file("nested/second.txt", "2")],
            ..Default::default()
        },
    );

    let config = fixture.config(
        vec![books.clone(), users.clone()],
        &[("first", "a=1", "out/first"), ("second", "", "out/second")],
    );
    graphqlc::run(&config).unwrap();

    let request = fixture.request("first");
    assert_eq!(request.parameter, "a=1");
    assert_eq!(
        request.file_to_generate,
        [books.display().to_string(), users.display().to_string()]
    );
    assert_eq!(request.graphql_file.len(), 2);
    assert_eq!(
        request.graphql_file[1].schema.as_ref().and_then(|schema| schema.query.as_ref()).map(|query| query.name.as_str()),
        Some("Root")
    );
    assert_eq!(fixture.request("second").parameter, "");

    assert_eq!(fs::read_to_string(fixture.path("out/first/first.txt")).unwrap(), "1");
    assert_eq!(fs::read_to_string(fixture.path("out/second/nested/second.txt")).unwrap(), "2");
}

#[test]
fn duplicate_schema_stops_before_any_plugin() {
    let fixture = Fixture::new();
    let schema = fixture.schema(
        "twice.graphql",
        indoc! {r#"
            schema { query: Query }
            schema { query: Query }
            type Query { a: Int }
        "#},
    );
    fixture.plugin(
        "recorder",
        &CodeGeneratorResponse {
            file: vec![new_file("recorded.txt", "ran")],
            ..Default::default()
        },
    );

    let error = graphqlc::run(&fixture.config(vec![schema], &[("recorder", "", "out")])).unwrap_err();

    assert!(matches!(
        error,
        CompilerError::Build {
            source: graphqlc_descriptor::Error::DuplicateSchema,
            ..
        }
    ));
    assert!(!fixture.path("plugins/recorder.request").exists());
    assert!(!fixture.path("out").exists());
}

#[test]
fn failing_plugin_stops_the_run() {
    let fixture = Fixture::new();
    let schema = fixture.schema("a.graphql", "type Query { a: Int }");
    fixture.plugin(
        "good",
        &CodeGeneratorResponse {
            file: vec![new_file("good.txt", "ok")],
            ..Default::default()
        },
    );
    fixture.script("bad", "cat >/dev/null\necho 'cannot do it' >&2\nexit 1");
    fixture.plugin(
        "never",
        &CodeGeneratorResponse {
            file: vec![new_file("never.txt", "no")],
            ..Default::default()
        },
    );

    let config = fixture.config(vec![schema], &[("good", "", "out"), ("bad", "", "out"), ("never", "", "out")]);
    let error = graphqlc::run(&config).unwrap_err();

    let CompilerError::Plugin {
        name,
        source: PluginError::Exit { stderr, .. },
    } = error
    else {
        unreachable!("expected the bad plugin to fail");
    };
    assert_eq!(name, "bad");
    assert_eq!(stderr, "cannot do it\n");

    assert_eq!(fs::read_to_string(fixture.path("out/good.txt")).unwrap(), "ok");
    assert!(!fixture.path("plugins/never.request").exists());
    assert!(!fixture.path("out/never.txt").exists());
}

#[test]
fn merge_errors_name_the_plugin() {
    let fixture = Fixture::new();
    let schema = fixture.schema("a.graphql", "type Query { a: Int }");
    fixture.plugin(
        "confused",
        &CodeGeneratorResponse {
            file: vec![File {
                content: "dangling".to_owned(),
                ..Default::default()
            }],
            ..Default::default()
        },
    );

    let error = graphqlc::run(&fixture.config(vec![schema], &[("confused", "", "out")])).unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"plugin `confused` output: file #0 of the response appends to the previous file, but there is none");
}

#[test]
fn resolution_errors_name_the_file() {
    let fixture = Fixture::new();
    let schema = fixture.schema("a.graphql", "type Query { a: Unknown }");

    let error = graphqlc::run(&fixture.config(vec![schema.clone()], &[])).unwrap_err();

    assert_eq!(
        error.to_string(),
        format!("{}: unknown type `Unknown` referenced from Query.a", schema.display())
    );
}
