//! Scaffolding for generator plugins.
//!
//! ```no_run
//! use graphqlc_plugin::protocol::code_generator_response::File;
//!
//! fn main() -> std::process::ExitCode {
//!     graphqlc_plugin::plugin::run(|request| {
//!         let files = request
//!             .file_to_generate
//!             .iter()
//!             .map(|name| File {
//!                 name: format!("{name}.txt"),
//!                 content: "generated\n".to_owned(),
//!                 ..Default::default()
//!             })
//!             .collect();
//!
//!         Ok::<_, std::convert::Infallible>(files)
//!     })
//! }
//! ```

use crate::protocol::{code_generator_response::File, CodeGeneratorRequest, CodeGeneratorResponse};
use prost::Message;
use std::{
    fmt,
    io::{self, Read, Write},
    process::ExitCode,
};
use thiserror::Error;

/// A broken exchange with the compiler. Generator failures are not errors at this level, they
/// travel in the response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("could not read the request: {0}")]
    Read(#[source] io::Error),
    #[error("could not decode the request: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("could not write the response: {0}")]
    Write(#[source] io::Error),
}

/// Reads the request from stdin, runs `generate` and writes its files to stdout.
///
/// An error returned by `generate` is sent back in the response and the process still exits
/// successfully; the compiler reports it. Only a failure to talk to the compiler makes the
/// plugin exit with an error status.
pub fn run<F, E>(generate: F) -> ExitCode
where
    F: FnOnce(&CodeGeneratorRequest) -> Result<Vec<File>, E>,
    E: fmt::Display,
{
    match run_with(io::stdin().lock(), io::stdout().lock(), generate) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let program = std::env::args().next().unwrap_or_else(|| "plugin".to_owned());
            eprintln!("{program}: {err}");
            ExitCode::FAILURE
        }
    }
}

pub fn run_with<R, W, F, E>(mut reader: R, mut writer: W, generate: F) -> Result<(), ProtocolError>
where
    R: Read,
    W: Write,
    F: FnOnce(&CodeGeneratorRequest) -> Result<Vec<File>, E>,
    E: fmt::Display,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(ProtocolError::Read)?;

    let request = CodeGeneratorRequest::decode(buffer.as_slice())?;

    let response = match generate(&request) {
        Ok(file) => CodeGeneratorResponse {
            file,
            ..Default::default()
        },
        Err(err) => CodeGeneratorResponse {
            error: err.to_string(),
            ..Default::default()
        },
    };

    writer
        .write_all(&response.encode_to_vec())
        .and_then(|()| writer.flush())
        .map_err(ProtocolError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn exchange<E: fmt::Display>(
        request: &CodeGeneratorRequest,
        generate: impl FnOnce(&CodeGeneratorRequest) -> Result<Vec<File>, E>,
    ) -> CodeGeneratorResponse {
        let mut output: Vec<u8> = Vec::new();
        run_with(request.encode_to_vec().as_slice(), &mut output, generate).unwrap();
        CodeGeneratorResponse::decode(output.as_slice()).unwrap()
    }

    #[test]
    fn generated_files_are_sent_back() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a.graphql".to_owned(), "b.graphql".to_owned()],
            parameter: "suffix=.rs".to_owned(),
            ..Default::default()
        };

        let response = exchange(&request, |request| {
            Ok::<_, String>(
                request
                    .file_to_generate
                    .iter()
                    .map(|name| File {
                        name: name.replace(".graphql", &request.parameter["suffix=".len()..]),
                        content: String::new(),
                        ..Default::default()
                    })
                    .collect(),
            )
        });

        let names = response.file.iter().map(|file| file.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["a.rs", "b.rs"]);
        assert_eq!(response.error, "");
    }

    #[test]
    fn generator_errors_travel_in_the_response() {
        let response = exchange(&CodeGeneratorRequest::default(), |_| {
            Err::<Vec<File>, _>("unsupported parameter")
        });

        assert_eq!(response.error, "unsupported parameter");
        assert!(response.file.is_empty());
    }

    #[test]
    fn undecodable_request() {
        let error = run_with(&[0xff_u8, 0xff, 0xff][..], Vec::<u8>::new(), |_| Ok::<_, String>(Vec::new())).unwrap_err();

        assert!(matches!(error, ProtocolError::Decode(_)));
    }
}
