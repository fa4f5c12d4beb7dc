//! Operation registry
//!
//! Every admin action is modelled as data so a single consumer can render
//! inputs for, and invoke, any number of heterogeneous actions.
//!
//! # Architecture
//!
//! - [`params`] - Tagged parameter descriptors (text-like or choice)
//! - [`registry`] - Operations, categories, positional arguments
//! - [`catalog`] - The declared categories and their operations
//!
//! # Example
//!
//! ```ignore
//! use satadmin::Registry;
//!
//! async fn show_project(registry: &Registry) -> satadmin::api::Result<()> {
//!     let op = registry.operation("project", "get").unwrap();
//!     let result = op.invoke(vec!["my-project-id".into()]).await?;
//!     println!("{:?}", result);
//!     Ok(())
//! }
//! ```

pub mod catalog;
mod params;
mod registry;

pub use params::{ChoiceOption, Param, ParamDescriptor, TextKind};
pub use registry::{is_supplied, Args, Category, InvokeFn, InvokeResult, Operation, Registry};
