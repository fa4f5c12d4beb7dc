//! Admin API interaction module
//!
//! This module provides the primitives shared by every registry operation:
//! the pluggable HTTP transport, URL and query string assembly, response
//! classification and the typed admin client.
//!
//! # Module Structure
//!
//! - [`client`] - Admin client: URL building, request dispatch, typed actions
//! - [`error`] - Error taxonomy (validation, server response, transport)
//! - [`http`] - Transport trait and the reqwest-backed implementation
//! - [`query`] - Query string encoding from an ordered value bag
//!
//! # Example
//!
//! ```ignore
//! use satadmin::api::AdminClient;
//!
//! async fn example() -> Result<(), satadmin::AdminError> {
//!     let client = AdminClient::new("http://localhost:10005/api", "token")?;
//!     let project = client.get_project("my-project-id").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod query;

pub use client::{AdminClient, ProjectLimits, UserUpdate};
pub use error::{
    format_admin_error, AdminError, Result, TransportError, SERVER_RESPONSE_ERROR,
};
pub use http::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use query::{encode_query, QueryValue};
