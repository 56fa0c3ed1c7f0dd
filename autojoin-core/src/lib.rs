#![doc = "autojoin-core: core logic library for autojoin."]

//! This crate contains the whole split-file pipeline: finding part-sets in a directory
//! listing, checking them, concatenating them and cleaning up afterwards.
//! It never prints; everything is reported through `tracing` events and returned reports.
//!
//! # Usage
//! Call [`autojoin::autojoin_directory`] once per directory with a [`config::JoinConfig`]
//! and a [`validate::SpaceProbe`].

pub mod autojoin;
pub mod cleanup;
pub mod config;
pub mod discover;
pub mod join;
pub mod validate;
