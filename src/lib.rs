//! satadmin
//!
//! Self-describing registry of satellite admin API operations. Every remote
//! administrative action (API keys, buckets, projects, users) is exposed as
//! data: a name, a description, typed parameter descriptors and an async
//! invocation function. Consumers walk the registry to build their own input
//! surfaces without hard-coding anything per action.
//!
//! # Module Structure
//!
//! - [`api`] - HTTP transport, URL/query helpers and the typed admin client
//! - [`operation`] - Parameter descriptors, operations and the category registry
//! - [`config`] - Persisted preferences for the command line consumer

pub mod api;
pub mod config;
pub mod operation;

pub use api::{AdminClient, AdminError};
pub use operation::{Args, Operation, ParamDescriptor, Registry};
