use crate::protocol::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost::Message;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::{Child, ChildStdin, Command, ExitStatus, Output, Stdio},
};
use thiserror::Error;

/// Plugins are looked up as `graphqlc-gen-<name>` for a `--<name>_out` flag.
pub const EXECUTABLE_PREFIX: &str = "graphqlc-gen-";

#[derive(Debug, Error)]
pub enum PluginError {
    /// The executable is not on the search path or could not be started.
    #[error("could not run {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("could not send the request to {executable}: {source}")]
    WriteRequest {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("could not wait for {executable}: {source}")]
    Wait {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("{executable} failed with {status}:\n{stderr}")]
    Exit {
        executable: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{executable} returned an invalid response: {source}")]
    ResponseDecode {
        executable: String,
        #[source]
        source: prost::DecodeError,
    },
    /// The plugin ran fine but reported that it could not generate code.
    #[error("{executable}: {message}")]
    Reported { executable: String, message: String },
}

/// Runs generator plugins, one process per call.
#[derive(Debug, Clone, Default)]
pub struct PluginRunner {
    search_path: Vec<PathBuf>,
}

impl PluginRunner {
    /// `search_path` is scanned in order for plugin executables.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        PluginRunner { search_path }
    }

    /// Finds the executable of the plugin registered as `name`.
    pub fn find(&self, name: &str) -> Result<PathBuf, PluginError> {
        let executable = format!("{EXECUTABLE_PREFIX}{name}");
        let cwd = std::env::current_dir().map_err(|source| PluginError::Spawn {
            executable: executable.clone(),
            source,
        })?;

        self.search_path
            .iter()
            .find_map(|dir| which::which_in(&executable, Some(dir), &cwd).ok())
            .ok_or_else(|| PluginError::Spawn {
                source: io::Error::new(io::ErrorKind::NotFound, "not found on the plugin search path"),
                executable,
            })
    }

    /// Sends `request` to the plugin registered as `name` and waits for its response.
    pub fn run(&self, name: &str, request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse, PluginError> {
        let program = self.find(name)?;
        let executable = format!("{EXECUTABLE_PREFIX}{name}");

        tracing::debug!(plugin = name, program = %program.display(), "running plugin");

        let child = Command::new(&program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PluginError::Spawn {
                executable: executable.clone(),
                source,
            })?;

        let payload = request.encode_to_vec();
        let (written, output) = exchange(child, &payload);

        let output = output.map_err(|source| PluginError::Wait {
            executable: executable.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(PluginError::Exit {
                executable,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        written.map_err(|source| PluginError::WriteRequest {
            executable: executable.clone(),
            source,
        })?;

        tracing::debug!(
            plugin = name,
            response_bytes = output.stdout.len(),
            "plugin finished"
        );

        let response =
            CodeGeneratorResponse::decode(output.stdout.as_slice()).map_err(|source| PluginError::ResponseDecode {
                executable: executable.clone(),
                source,
            })?;

        if !response.error.is_empty() {
            return Err(PluginError::Reported {
                executable,
                message: response.error,
            });
        }

        Ok(response)
    }
}

/// Feeds the request from a scoped thread while `wait_with_output` drains stdout and stderr, so
/// a plugin writing before it has read all of its input cannot block on a full pipe.
fn exchange(mut child: Child, payload: &[u8]) -> (io::Result<()>, io::Result<Output>) {
    let stdin = child.stdin.take();

    std::thread::scope(|scope| {
        let writer = scope.spawn(move || write_request(stdin, payload));

        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("request writer panicked")));

        (written, output)
    })
}

fn write_request(stdin: Option<ChildStdin>, payload: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Err(io::Error::new(io::ErrorKind::BrokenPipe, "plugin stdin is not captured"));
    };

    // A plugin may exit without reading its input.
    match stdin.write_all(payload) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}
