//! # Observability & Tracing
//!
//! The SDK emits `tracing` events and spans but never installs a subscriber.
//! Applications (and the demo binary) call [`setup_tracing`] once at startup.
//!
//! ## What Gets Traced
//!
//! - **Route operations**: every `find`, `get`, `create`, `update`, `remove`,
//!   action and batch remove runs inside a span carrying the resource path
//! - **Link resolution**: `trace` when a HAL link is used, `debug` when the
//!   fallback template is expanded instead
//! - **Degraded normalization**: `debug` when a sort list is dropped because
//!   fields and directions differ in length
//!
//! ## Usage Examples
//!
//! ```bash
//! # Startup summary only
//! RUST_LOG=info cargo run
//!
//! # Every built request and link fallback
//! RUST_LOG=debug cargo run
//!
//! # Only the core crate
//! RUST_LOG=baasic_core=trace cargo run
//! ```
//!
//! With `RUST_LOG=debug` an unpublish on an article without links shows:
//!
//! ```text
//! DEBUG perform{resource="articles" rel="unpublish"}: No embedded link, expanding fallback template rel="unpublish" template=articles/{id}/unpublish
//! DEBUG perform{resource="articles" rel="unpublish"}: Built action request uri=articles/a1/unpublish method=PUT
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Span names carry the operation already
        .compact()
        .init();
}
