//! breezedb – a small embedded data store with a compact textual query
//! language.
//!
//! Records are organized into databases, tables, fields and elements:
//! * A database is one flat JSON document on disk.
//! * A table groups fields; each [`store::Field`] declares a name and a
//!   [`datatype::FieldType`] and owns the list of its elements.
//! * Row `i` is element `i` of every field, in declaration order.
//!
//! Everything can be driven either through the [`store::Store`] primitives
//! directly or through the query language in [`query`]: statements such as
//! `CREATE TABLE %users%; AT %db%;` are matched against per-verb keyword
//! skeletons, their arguments extracted and coerced, and the resulting
//! command dispatched against the store. Values produced by `GET`,
//! `EXISTS` and `SEARCH` statements are aggregated in statement order.
//!
//! ## Modules
//! * [`datatype`] – The [`datatype::Value`] variant type and field types.
//! * [`persist`] – JSON document read/write for database files.
//! * [`store`] – The [`store::Store`] trait and the flat-file
//!   [`store::JsonStore`].
//! * [`query`] – Tokenizer, grammar matcher, dispatcher and the
//!   [`query::Engine`].
//! * [`error`] – The crate-wide error enum and `Result` alias.
//!
//! ## Quick Start
//! ```no_run
//! use breezedb::{query::Engine, store::JsonStore};
//! let store = JsonStore::new();
//! let engine = Engine::new(&store);
//! engine.run_query("CREATE DB %inventory%; %/tmp%;").unwrap();
//! engine.run_query(
//!     "CREATE TABLE %items%; AT %/tmp/inventory%; >> \
//!      CREATE FIELD %name%; %str%; %count%; %int%; IN %items%; AT %/tmp/inventory%;",
//! ).unwrap();
//! ```
//!
//! ## Semantics
//! Statements in one query execute strictly in order and each commits its
//! effect before the next begins. There are no transactions: the first
//! error aborts the remaining statements and leaves prior effects applied.
//! The parser itself holds no state between calls.

pub mod datatype;
pub mod error;
pub mod persist;
pub mod query;
pub mod store;
