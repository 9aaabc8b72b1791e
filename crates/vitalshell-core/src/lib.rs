//! Vitalshell Core - Types and Effect Interfaces
//!
//! This crate provides the foundational types and effect interfaces for the
//! vitalshell host: the wire-format data model exchanged with the embedded
//! measurement application, the injected-script payload codec, and the pure
//! trait seams behind which platform services live.
//!
//! # Structure
//!
//! - Wire types: [`UserProfile`] (outbound), [`VitalsResult`] and friends
//!   (inbound), serialized with the embedded content's camelCase field names.
//! - [`codec`]: both halves of the injected-script protocol and the results
//!   decoder.
//! - [`effects`]: pure effect interfaces (`CapabilityEffects`,
//!   `WebContentEffects`). Production handlers live in `vitalshell-effects`;
//!   scripted mocks live in `vitalshell-testkit`.
//! - [`ShellError`]: unified error type for all host operations.

#![forbid(unsafe_code)]

pub mod codec;
pub mod effects;

mod errors;
mod profile;
mod vitals;

pub use errors::ShellError;
pub use profile::UserProfile;
pub use vitals::{BasicVitals, GlucoseRange, ResultData, VitalsResult, VitalsResultList};
