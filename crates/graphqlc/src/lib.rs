//! The `graphqlc` compiler: resolves GraphQL schema files and runs code generator plugins on
//! them.

pub mod cli;
pub mod compile;
pub mod config;
pub mod error;
pub mod report;

pub use self::{
    cli::Args,
    compile::run,
    config::{CompilerConfig, PluginInvocation},
    error::CompilerError,
};
