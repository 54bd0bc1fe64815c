//! # Application Lifecycle
//!
//! Wiring for a Baasic application: one [`SdkConfig`](baasic_core::SdkConfig)
//! produces one [`ModelMapper`](baasic_core::ModelMapper), which every route
//! set shares.
//!
//! ```rust
//! use baasic_core::{BaseRoute, SdkConfig};
//! use baasic_sdk::lifecycle::BaasicApp;
//!
//! let app = BaasicApp::new(SdkConfig::new("blog")).unwrap();
//! let request = app.articles.get("a1", None);
//!
//! assert_eq!(
//!     app.absolute_url(&request).unwrap().as_str(),
//!     "https://api.baasic.com/v1/blog/articles/a1/"
//! );
//! ```
//!
//! Observability is set up separately through [`tracing::setup_tracing`]; the
//! library itself only emits events.

mod app;
pub mod tracing;

pub use app::{AppError, BaasicApp};
