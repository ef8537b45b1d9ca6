//! Shared HTTP plumbing for the provider adapters.
//!
//! Every adapter owns a [`JsonClient`] built from an [`HttpProviderConfig`].
//! The client appends path segments and query pairs to the configured base
//! URL, issues `GET` requests and decodes JSON bodies, mapping transport
//! failures onto [`wayfare_core::ProviderError`].

mod client;
mod config;

pub(crate) use client::JsonClient;
pub use config::{DEFAULT_USER_AGENT, HttpProviderConfig, ProviderBuildError};
