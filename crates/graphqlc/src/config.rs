use crate::{cli::Args, error::CompilerError};
use indexmap::IndexMap;
use std::{env, io, path::PathBuf};

const PLUGIN_FLAG_MARKER: &str = "_out=";

/// One `--<name>_out=[<parameter>:]<output_dir>` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInvocation {
    /// The suffix after `graphqlc-gen-` of the plugin executable.
    pub name: String,
    pub parameter: String,
    pub output_dir: PathBuf,
}

/// Parses a plugin flag, with or without its leading dashes.
///
/// Returns `None` for flags without `_out=` and for an empty plugin name.
pub fn parse_plugin_flag(flag: &str) -> Option<PluginInvocation> {
    let flag = flag.trim_start_matches('-');
    let (name, rest) = flag.split_once(PLUGIN_FLAG_MARKER)?;

    if name.is_empty() {
        return None;
    }

    let (parameter, output_dir) = match rest.split_once(':') {
        Some((parameter, output_dir)) => (parameter, output_dir),
        None => ("", rest),
    };

    Some(PluginInvocation {
        name: name.to_owned(),
        parameter: parameter.to_owned(),
        output_dir: PathBuf::from(output_dir),
    })
}

/// Everything a compiler run needs, resolved from the command line and the environment.
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Schema files, in the order they are compiled and handed to plugins.
    pub files: Vec<PathBuf>,
    /// Plugins to run, in flag order, keyed by name.
    pub plugins: IndexMap<String, PluginInvocation>,
    pub search_path: Vec<PathBuf>,
}

impl CompilerConfig {
    pub fn from_args(args: &Args) -> Result<Self, CompilerError> {
        Ok(CompilerConfig {
            files: expand_patterns(&args.patterns)?,
            plugins: plugins(&args.plugin_flags),
            search_path: search_path(&args.plugin_path),
        })
    }
}

fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, CompilerError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| CompilerError::Glob {
            pattern: pattern.clone(),
            source,
        })?;

        let before = files.len();

        for path in paths {
            let path = path.map_err(|err| CompilerError::SourceRead {
                path: err.path().to_owned(),
                source: io::Error::from(err),
            })?;

            files.push(path);
        }

        if files.len() == before {
            tracing::warn!(pattern = %pattern, "pattern matches no files");
        }
    }

    Ok(files)
}

fn plugins(flags: &[String]) -> IndexMap<String, PluginInvocation> {
    let mut plugins = IndexMap::new();

    for flag in flags {
        match parse_plugin_flag(flag) {
            Some(invocation) => {
                if plugins.contains_key(&invocation.name) {
                    tracing::warn!(plugin = %invocation.name, "plugin given more than once, the last flag wins");
                }

                plugins.insert(invocation.name.clone(), invocation);
            }
            None => tracing::warn!(flag = %flag, "ignoring argument that is not a --<name>_out= plugin flag"),
        }
    }

    plugins
}

/// PATH first, then the explicit plugin directories, then cargo's bin directory.
fn search_path(plugin_path: &[PathBuf]) -> Vec<PathBuf> {
    let mut search_path = env::var_os("PATH")
        .map(|path| env::split_paths(&path).collect::<Vec<_>>())
        .unwrap_or_default();

    search_path.extend(plugin_path.iter().cloned());

    let cargo_home = env::var_os("CARGO_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".cargo")));

    if let Some(cargo_home) = cargo_home {
        search_path.push(cargo_home.join("bin"));
    }

    search_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("--rust_out=gen", "rust", "", "gen")]
    #[case::with_parameter("--go_out=package=api,strict:gen/go", "go", "package=api,strict", "gen/go")]
    #[case::empty_parameter("--ts_out=:gen", "ts", "", "gen")]
    #[case::underscores_in_name("--my_gen_out=out", "my_gen", "", "out")]
    #[case::colon_in_path("--echo_out=a:b:c", "echo", "a", "b:c")]
    fn plugin_flags(#[case] flag: &str, #[case] name: &str, #[case] parameter: &str, #[case] output_dir: &str) {
        let invocation = parse_plugin_flag(flag).unwrap();

        assert_eq!(
            invocation,
            PluginInvocation {
                name: name.to_owned(),
                parameter: parameter.to_owned(),
                output_dir: PathBuf::from(output_dir),
            }
        );
    }

    #[rstest]
    #[case::no_marker("--verbose")]
    #[case::no_value("--rust_out")]
    #[case::no_name("--_out=gen")]
    fn malformed_plugin_flags(#[case] flag: &str) {
        assert_eq!(parse_plugin_flag(flag), None);
    }

    #[test]
    fn repeated_plugin_keeps_its_position() {
        let plugins = plugins(&[
            "--a_out=one".to_owned(),
            "--b_out=two".to_owned(),
            "--bogus".to_owned(),
            "--a_out=x:three".to_owned(),
        ]);

        let order = plugins.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(plugins["a"].output_dir, PathBuf::from("three"));
        assert_eq!(plugins["a"].parameter, "x");
    }

    #[test]
    fn patterns_expand_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.graphql", "a.graphql", "c.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let patterns = [
            dir.path().join("c.txt").display().to_string(),
            dir.path().join("*.graphql").display().to_string(),
            dir.path().join("none-*.graphql").display().to_string(),
        ];
        let files = expand_patterns(&patterns).unwrap();

        assert_eq!(
            files,
            [
                dir.path().join("c.txt"),
                dir.path().join("a.graphql"),
                dir.path().join("b.graphql")
            ]
        );
    }

    #[test]
    fn invalid_pattern() {
        let error = expand_patterns(&["schema/***.graphql".to_owned()]).unwrap_err();

        assert!(matches!(error, CompilerError::Glob { ref pattern, .. } if pattern == "schema/***.graphql"));
    }

    #[test]
    fn explicit_plugin_dirs_come_after_path() {
        let search_path = search_path(&[PathBuf::from("/opt/graphqlc/plugins")]);

        let position = search_path
            .iter()
            .position(|dir| dir == &PathBuf::from("/opt/graphqlc/plugins"))
            .unwrap();
        let path_entries = env::var_os("PATH")
            .map(|path| env::split_paths(&path).count())
            .unwrap_or_default();

        assert_eq!(position, path_entries);
    }
}
