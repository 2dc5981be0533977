#![cfg(unix)]

use graphqlc_plugin::{
    protocol::{code_generator_response::File, CodeGeneratorRequest, CodeGeneratorResponse, Version},
    PluginError, PluginRunner, RequestAssembler, ResponseMerger, EXECUTABLE_PREFIX,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use prost::Message;
use std::{fs, os::unix::fs::PermissionsExt, path::Path};

/// Installs a shell plugin that stores its request next to itself and answers with `response`.
fn install_plugin(dir: &Path, name: &str, response: &CodeGeneratorResponse) {
    let canned = dir.join(format!("{name}.response"));
    fs::write(&canned, response.encode_to_vec()).unwrap();

    let script = format!(
        "#!/bin/sh\ncat > '{request}'\ncat '{canned}'\n",
        request = dir.join(format!("{name}.request")).display(),
        canned = canned.display(),
    );
    install_script(dir, name, &script);
}

fn install_script(dir: &Path, name: &str, script: &str) {
    let path = dir.join(format!("{EXECUTABLE_PREFIX}{name}"));
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn assembler() -> RequestAssembler {
    let file = graphqlc_descriptor::compile(
        "library.graphql",
        indoc! {r#"
            type Book { title: String! author: Author }
            type Author { name: String books: [Book!] }
            type Query { books: [Book] }
        "#},
    )
    .unwrap();

    RequestAssembler::new(Version::from_parts("0", "1", "0", ""), &[file])
}

#[test]
fn request_reaches_the_plugin_and_files_are_merged() {
    let plugins = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    install_plugin(
        plugins.path(),
        "books",
        &CodeGeneratorResponse {
            file: vec![
                File {
                    name: "library.rs".to_owned(),
                    content: "// books\n// @@graphqlc_insertion_point(types)\n".to_owned(),
                    ..Default::default()
                },
                File {
                    content: "// end\n".to_owned(),
                    ..Default::default()
                },
                File {
                    name: "library.rs".to_owned(),
                    insertion_point: "types".to_owned(),
                    content: " struct Book;".to_owned(),
                },
            ],
            ..Default::default()
        },
    );

    let assembler = assembler();
    let request = assembler.request("module=library");
    let runner = PluginRunner::new(vec![plugins.path().to_owned()]);

    let response = runner.run("books", &request).unwrap();
    ResponseMerger::new(output.path()).apply(&response).unwrap();

    let received = fs::read(plugins.path().join("books.request")).unwrap();
    assert_eq!(CodeGeneratorRequest::decode(received.as_slice()).unwrap(), request);

    insta::assert_snapshot!(fs::read_to_string(output.path().join("library.rs")).unwrap(), @r###"
    // books
    // @@graphqlc_insertion_point(types) struct Book;
    // @@graphqlc_insertion_point(types)
    // end
    "###);
}

#[test]
fn failing_plugin_writes_nothing() {
    let plugins = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    install_script(
        plugins.path(),
        "fails",
        "#!/bin/sh\ncat >/dev/null\necho 'cannot generate books' >&2\nexit 1\n",
    );

    let runner = PluginRunner::new(vec![plugins.path().to_owned()]);
    let error = runner.run("fails", &assembler().request("")).unwrap_err();

    let PluginError::Exit { stderr, .. } = &error else {
        unreachable!("expected an exit error");
    };
    assert_eq!(stderr, "cannot generate books\n");
    insta::assert_snapshot!(error.to_string(), @r###"
    graphqlc-gen-fails failed with exit status: 1:
    cannot generate books
    "###);
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn reported_errors_are_plugin_errors() {
    let plugins = tempfile::tempdir().unwrap();
    install_plugin(
        plugins.path(),
        "picky",
        &CodeGeneratorResponse {
            error: "unknown option `colour`".to_owned(),
            ..Default::default()
        },
    );

    let runner = PluginRunner::new(vec![plugins.path().to_owned()]);
    let error = runner.run("picky", &assembler().request("colour=red")).unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"graphqlc-gen-picky: unknown option `colour`");
}

#[test]
fn later_search_path_entries_are_used() {
    let empty = tempfile::tempdir().unwrap();
    let plugins = tempfile::tempdir().unwrap();
    install_plugin(plugins.path(), "found", &CodeGeneratorResponse::default());

    let runner = PluginRunner::new(vec![empty.path().to_owned(), plugins.path().to_owned()]);

    assert_eq!(
        runner.find("found").unwrap(),
        plugins.path().join("graphqlc-gen-found")
    );
}
