//! Core types for the heroes catalogue.
//!
//! Defines the hero record, its create and partial-update payloads,
//! pagination, the [`HeroStore`] persistence seam and the [`HeroService`]
//! that implements the catalogue operations on top of it.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod hero;
pub mod id;
pub mod page;
pub mod service;
pub mod store;

pub use error::{CoreError, HeroError, StoreError};
pub use hero::{Hero, HeroAttributes, HeroPatch, NewHero};
pub use id::HeroId;
pub use page::Page;
pub use service::{DeletedHero, DeletionReceipt, HeroService};
pub use store::HeroStore;
