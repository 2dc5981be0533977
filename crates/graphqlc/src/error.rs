use graphqlc_plugin::{MergeError, PluginError};
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompilerError {
    /// returned if a positional argument is not a valid glob pattern
    #[error("invalid file pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// returned if a schema file cannot be read
    #[error("could not read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// wraps a parse or resolution error of one schema file
    #[error("{}: {source}", path.display())]
    Build {
        path: PathBuf,
        #[source]
        source: graphqlc_descriptor::Error,
    },
    /// wraps a failed plugin run
    #[error("plugin `{name}`: {source}")]
    Plugin {
        name: String,
        #[source]
        source: PluginError,
    },
    /// wraps a failure writing the files of a plugin
    #[error("plugin `{name}` output: {source}")]
    Merge {
        name: String,
        #[source]
        source: MergeError,
    },
}

impl CompilerError {
    pub fn to_hint(&self) -> Option<String> {
        match self {
            Self::Plugin {
                name,
                source: PluginError::Spawn { executable, source },
            } if source.kind() == io::ErrorKind::NotFound => Some(format!(
                "install {executable} somewhere on your PATH or pass its directory with --plugin-path to use --{name}_out"
            )),
            Self::Plugin {
                source: PluginError::Spawn { source, .. },
                ..
            } if source.kind() == io::ErrorKind::PermissionDenied => {
                Some("make sure the plugin file is executable".to_owned())
            }
            Self::Merge {
                source: MergeError::MissingName { .. }
                    | MergeError::MissingPredecessor { .. }
                    | MergeError::OutsideOutputDir { .. },
                ..
            } => Some("this is a bug in the plugin, not in your schema".to_owned()),
            Self::Plugin {
                source: PluginError::ResponseDecode { .. },
                ..
            } => Some("the plugin may have printed something other than its response to stdout".to_owned()),
            _ => None,
        }
    }
}
