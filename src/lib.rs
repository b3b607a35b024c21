//! # Postboard
//!
//! Postboard is a small web application that lists posts stored in a SQL
//! database, creates a post from a submitted form and deletes a post by id.
//!
//! The store is reached through the [`db::models::post::Manager`] capability,
//! which is handed to every operation in [`posts`] explicitly.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Official docs:
//   https://doc.rust-lang.org/nightly/clippy/lints.html
//
// Lints are as pedantic as clippy allows, but only as warnings. Build-denial
// is left to CI.
//
#![warn(
    // correctness, suspicious, complexity, perf and style
    clippy::all,

    missing_docs,

    clippy::pedantic,

    // "nursery" means lints still under development
    clippy::nursery,

    clippy::cargo
)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "Restriction lints are opted into as a group and individually allowed below"
)]
#![warn(clippy::restriction)]
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "sqlx and actix pull in differing versions of some transitive crates"
)]
#![allow(
    clippy::std_instead_of_alloc,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::std_instead_of_core,
    reason = "Import items from std instead of core"
)]
#![allow(
    clippy::mod_module_files,
    reason = "mod.rs is the layout used across this crate"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Every handler is bound by a database round-trip, inlining hints buy nothing"
)]
#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "Nothing here is meant to be consumed by other crates"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "Long functions are broken up into smaller ones on purpose"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered by reading flow, not alphabetically"
)]

pub mod config;
pub mod db;
pub mod posts;
pub mod server;
pub mod utils;
