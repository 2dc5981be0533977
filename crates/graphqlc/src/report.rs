use crate::error::CompilerError;
use colored::Colorize;
use std::io::IsTerminal as _;

/// Disables colours when stderr is not a terminal. `NO_COLOR` and `CLICOLOR_FORCE` are honoured
/// by `colored` itself.
pub fn init_colors() {
    if !std::io::stderr().is_terminal() && std::env::var_os("CLICOLOR_FORCE").is_none() {
        colored::control::set_override(false);
    }
}

/// reports an error to stderr
pub fn error(error: &CompilerError) {
    eprintln!("{}", format!("error: {error}").bright_red());
    if let Some(hint) = error.to_hint() {
        eprintln!("{}", format!("hint: {hint}").bright_blue());
    }
}
