//! axum front end: the dashboard page plus JSON endpoints over the same data.
//!
//! Every request runs its own refresh cycle against the external services; the only state shared
//! between requests is the read-only [`AppState`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
