//! The plugin side of graphqlc: the wire protocol, running generator processes and merging what
//! they return into the output directory.
//!
//! [`plugin`] is the other end of the protocol, for generators written in Rust.

mod merge;
pub mod plugin;
pub mod protocol;
mod request;
mod runner;

pub use self::{
    merge::{MergeError, ResponseMerger, INSERTION_POINT_MARKER},
    request::RequestAssembler,
    runner::{PluginError, PluginRunner, EXECUTABLE_PREFIX},
};
