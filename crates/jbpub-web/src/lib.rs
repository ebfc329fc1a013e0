//! jbpub Web Gateway
//!
//! Serves the link generator as a server-rendered page:
//! - normalizes the submitted repository reference
//! - builds the shareable link under the configured public base
//! - asks the resolver and shows the kind badge and extracted fields
//! - gates the "Go" and copy actions like the interactive front end

pub mod error;
pub mod routes;
pub mod templates;

pub use error::WebError;
pub use routes::{create_router, web_routes, IndexQuery, WebState};
pub use templates::{ErrorTemplate, IndexTemplate};
