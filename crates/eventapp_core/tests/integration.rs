//! Single integration test binary: all scenarios as modules over the in-memory backend.
//!
//! Run: `cargo test -p eventapp_core --test integration`
//! Filter by module: `cargo test -p eventapp_core --test integration favorites_sync::`

mod common;
mod events_sync;
mod ownership;
