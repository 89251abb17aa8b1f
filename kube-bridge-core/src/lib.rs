//! Client-less building blocks for bridging blocking Kubernetes calls into async code
//!
//! This crate holds the pieces that do not need a cluster connection:
//!
//! - [`race`] with the single-assignment [`Pending`] handle and the deadline race
//! - [`call`] with the [`Operation`] / [`Callback`] contract between a bridged call and the
//!   synchronous operation it runs
//! - [`error`] with the [`CallError`] a call resolves to on failure
//! - [`models`] with the [`ModelRegistry`] of Kubernetes object models
//! - [`builders`] and [`Body`] for request objects and payloads
//!
//! The same items are re-exported from `kube-bridge` under `kube_bridge::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod body;
pub use body::Body;

pub mod builders;

pub mod call;
pub use call::{operation, Callback, FnOperation, Operation, PendingCall};

pub mod error;
pub use error::{CallError, CallTimeoutError};

pub mod models;
pub use models::{ModelRegistry, ModelType, UnknownModel};

pub mod race;
pub use race::{pending, race, Pending, Resolver};

/// Namespace used when a namespaced helper is not given one
pub const DEFAULT_NAMESPACE: &str = "default";
