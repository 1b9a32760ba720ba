//! wit: a small local version-control tool
//!
//! Commits are full snapshots of the staging area stored as plain directories
//! under `.wit/images`; branches, HEAD and the activated branch live in two
//! text files. See the `commands::porcelain` module for the user-facing
//! operations.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
