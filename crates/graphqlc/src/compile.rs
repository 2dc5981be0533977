use crate::{config::CompilerConfig, error::CompilerError};
use graphqlc_descriptor::FileDescriptor;
use graphqlc_plugin::{protocol::Version, PluginRunner, RequestAssembler, ResponseMerger};
use std::{fs, path::PathBuf};

pub fn compiler_version() -> Version {
    Version::from_parts(
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH"),
        env!("CARGO_PKG_VERSION_PRE"),
    )
}

/// Reads and resolves every file. Each descriptor is named after the path it was read from.
pub fn compile_files(paths: &[PathBuf]) -> Result<Vec<FileDescriptor>, CompilerError> {
    paths
        .iter()
        .map(|path| {
            tracing::debug!(path = %path.display(), "compiling");

            let source = fs::read_to_string(path).map_err(|source| CompilerError::SourceRead {
                path: path.clone(),
                source,
            })?;

            graphqlc_descriptor::compile(path.display().to_string(), &source).map_err(|source| CompilerError::Build {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

/// Compiles the configured files, then runs every plugin in turn and writes its output.
///
/// Nothing is written before all files compiled. A failing plugin stops the run, the output of
/// the plugins before it stays on disk.
pub fn run(config: &CompilerConfig) -> Result<(), CompilerError> {
    let files = compile_files(&config.files)?;

    if config.plugins.is_empty() {
        tracing::debug!(files = files.len(), "no plugins to run");
        return Ok(());
    }

    let assembler = RequestAssembler::new(compiler_version(), &files);
    let runner = PluginRunner::new(config.search_path.clone());

    for (name, invocation) in &config.plugins {
        let response = runner
            .run(name, &assembler.request(&invocation.parameter))
            .map_err(|source| CompilerError::Plugin {
                name: name.clone(),
                source,
            })?;

        tracing::debug!(plugin = %name, files = response.file.len(), "merging plugin output");

        ResponseMerger::new(&invocation.output_dir)
            .apply(&response)
            .map_err(|source| CompilerError::Merge {
                name: name.clone(),
                source,
            })?;
    }

    Ok(())
}
