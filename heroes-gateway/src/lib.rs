//! HTTP API gateway for the heroes catalogue.
//!
//! Exposes create, read, update, delete and list endpoints under `/heroes`,
//! with update and delete restricted to admin callers.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
