use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Long options the compiler parses itself, with whether they take a value. Any other `--`
/// argument is a plugin flag.
const OWN_OPTIONS: &[(&str, bool)] = &[
    ("log-filter", true),
    ("plugin-path", true),
    ("help", false),
    ("version", false),
];

/// Compiles GraphQL schema files and runs code generator plugins on them.
///
/// Every `--<NAME>_out=[<PARAMETER>:]<OUTPUT_DIR>` flag runs the plugin `graphqlc-gen-<NAME>`
/// and writes what it generates below OUTPUT_DIR.
#[derive(Debug, Parser)]
#[command(name = "graphqlc", version, about, long_about, after_help = PLUGIN_HELP)]
pub struct Args {
    /// Glob patterns of the schema files to compile
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
    /// Set the tracing filter, e.g. `debug` or `graphqlc_plugin=trace`. Defaults to RUST_LOG,
    /// then `warn`
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
    /// Also look for plugins in these directories, after the ones in PATH
    #[arg(long, value_name = "DIR", env = "GRAPHQLC_PLUGIN_PATH", value_delimiter = PATH_LIST_SEPARATOR)]
    pub plugin_path: Vec<PathBuf>,
    /// Raw plugin flags, in command line order.
    #[arg(skip)]
    pub plugin_flags: Vec<String>,
}

const PLUGIN_HELP: &str = "Plugins:
  --<NAME>_out=[<PARAMETER>:]<OUTPUT_DIR>  Run graphqlc-gen-<NAME> and write its output below OUTPUT_DIR";

impl Args {
    /// Parses the command line, setting plugin flags aside before handing the rest to clap.
    pub fn try_parse_with_plugin_flags<I, T>(arguments: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (own, plugin_flags) = split_arguments(arguments);

        let mut args = Args::try_parse_from(own)?;
        args.plugin_flags = plugin_flags;

        Ok(args)
    }

    pub fn parse_with_plugin_flags<I, T>(arguments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_with_plugin_flags(arguments).unwrap_or_else(|err| err.exit())
    }
}

fn split_arguments<I, T>(arguments: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut own = Vec::new();
    let mut plugin_flags = Vec::new();
    let mut arguments = arguments.into_iter().map(Into::into);

    while let Some(argument) = arguments.next() {
        let Some(text) = argument.to_str() else {
            own.push(argument);
            continue;
        };

        if text == "--" {
            own.push(argument);
            own.extend(arguments.by_ref());
            break;
        }

        let Some(long) = text.strip_prefix("--") else {
            own.push(argument);
            continue;
        };

        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };

        match OWN_OPTIONS.iter().find(|(option, _)| *option == name) {
            Some((_, takes_value)) => {
                let needs_next = *takes_value && !inline_value;
                own.push(argument);

                if needs_next {
                    own.extend(arguments.next());
                }
            }
            None => plugin_flags.push(text.to_owned()),
        }
    }

    (own, plugin_flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_with_plugin_flags(std::iter::once("graphqlc").chain(arguments.iter().copied())).unwrap()
    }

    #[test]
    fn plugin_flags_are_set_aside() {
        let args = parse(&[
            "schema/*.graphql",
            "--go_out=package=api:gen/go",
            "--log-filter",
            "debug",
            "--ts_out=gen/ts",
            "extra.graphql",
        ]);

        assert_eq!(args.patterns, ["schema/*.graphql", "extra.graphql"]);
        assert_eq!(args.plugin_flags, ["--go_out=package=api:gen/go", "--ts_out=gen/ts"]);
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn inline_option_values() {
        let args = parse(&["--plugin-path=/opt/plugins", "a.graphql"]);

        assert_eq!(args.plugin_path, [PathBuf::from("/opt/plugins")]);
        assert_eq!(args.patterns, ["a.graphql"]);
        assert!(args.plugin_flags.is_empty());
    }

    #[test]
    fn everything_after_double_dash_is_a_pattern() {
        let args = parse(&["--", "--weird-name.graphql"]);

        assert_eq!(args.patterns, ["--weird-name.graphql"]);
        assert!(args.plugin_flags.is_empty());
    }

    #[test]
    fn unknown_short_options_still_fail() {
        let error = Args::try_parse_with_plugin_flags(["graphqlc", "-x"]).unwrap_err();

        assert_eq!(error.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
