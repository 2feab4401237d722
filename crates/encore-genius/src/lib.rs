// SPDX-License-Identifier: GPL-3.0-or-later

//! Genius API client for resolving artists by name.
//!
//! Resolution is a two-step process: search for the name to find the
//! primary artist's id, then fetch the full artist record by id. Batch
//! lookups aggregate one output row per query term, in input order,
//! absorbing per-term failures into empty rows instead of aborting.

pub mod client;
pub mod error;
pub mod models;

pub use client::GeniusClient;
pub use error::{GeniusError, Result};
pub use models::{Artist, LookupRow, LookupTable, SearchHit, SearchResponse};
