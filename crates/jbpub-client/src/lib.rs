//! # jbpub client
//!
//! The asynchronous half of the link generator.
//!
//! ## Modules
//!
//! - [`api`] - HTTP client for the external resolution endpoint
//! - [`debounce`] - Debounced trigger over a value stream
//! - [`session`] - Link generator state and the session loop driving it

pub mod api;
pub mod debounce;
pub mod session;

pub use api::{ApiError, ApiResult, Resolve, ResolverClient, DEFAULT_TIMEOUT};
pub use debounce::debounce;
pub use session::{run_session, spawn_session, LinkGenerator, ResolveTicket, SessionHandle};
