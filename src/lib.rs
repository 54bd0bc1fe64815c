//! # Baasic SDK
//!
//! > **Typed route sets for the Baasic backend, built on [`baasic_core`].**
//!
//! Each Baasic resource exposes the same CRUD surface plus a few workflow
//! actions. This crate declares the route sets for a handful of modules and
//! wires them together in [`lifecycle::BaasicApp`]. Route operations return
//! [`ApiRequest`](baasic_core::ApiRequest) descriptors; sending them is left
//! to whichever HTTP client the application already uses.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`baasic_core`])
//! Option normalization, HAL link resolution, URI templates and the
//! [`BaseRoute`](baasic_core::BaseRoute) trait.
//!
//! ### 2. The Route Sets ([`article`], [`membership`], [`notification`])
//! One [`resource_routes!`](baasic_core::resource_routes) declaration per
//! resource: path, key property, find filters and actions.
//!
//! ### 3. The Wiring ([`lifecycle`])
//! [`BaasicApp`](lifecycle::BaasicApp) builds every route set from one
//! [`SdkConfig`](baasic_core::SdkConfig) and resolves request URIs against the
//! API base URL.
//!
//! ## Quick Start
//!
//! ```bash
//! BAASIC_APPLICATION_IDENTIFIER=blog RUST_LOG=debug cargo run
//! ```

pub mod article;
pub mod lifecycle;
pub mod membership;
pub mod notification;
