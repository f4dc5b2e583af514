//! # jsondb.cloud Rust Client
//!
//! A typed Rust client for [jsondb.cloud](https://jsondb.cloud), a hosted
//! JSON document database. JSON over HTTPS, Bearer-token auth, automatic
//! retry with exponential backoff on transient failures, and a typed error
//! taxonomy.
//!
//! The client comes in two flavors with identical method surfaces:
//! [`JsonDb`] (async, the primary implementation) and
//! [`blocking::JsonDb`], which drives the async client to completion on a
//! private runtime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jsondb_cloud::{ClientConfig, JsonDb, ListQuery};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = JsonDb::new(ClientConfig::new("jdb_sk_live_xxxx"))?;
//!     let users = db.collection("users");
//!
//!     // Create a document
//!     let alice = users.create(&json!({"name": "Alice", "role": "admin"})).await?;
//!
//!     // Read it back
//!     let user = users.get(alice["_id"].as_str().unwrap()).await?;
//!     println!("fetched {}", user["name"]);
//!
//!     // Query
//!     let admins = users
//!         .list(
//!             ListQuery::new()
//!                 .with_filter(json!({"role": "admin", "age": {"$gte": 21}}))
//!                 .with_sort("-createdAt")
//!                 .with_limit(10),
//!         )
//!         .await?;
//!     println!("found {} admins", admins.len());
//!
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

// Re-export main types for convenience
pub use client::JsonDb;
pub use collection::Collection;
pub use config::ClientConfig;
pub use error::{JsonDbError, Result, ValidationIssue};
pub use query::ListQuery;
pub use types::*;
