//! # garnet-core
//!
//! Core expression kernel for the Garnet symbolic computation engine.
//!
//! This crate provides:
//! - A tagged, shared expression node model with cached structural hashes
//! - Reference-counted expression handles with O(1) identity equality
//! - The canonicalization engine for sums and products (term sequences)
//!
//! ## Design Principles
//!
//! - **One canonical form per value**: any construction order of the same
//!   mathematical sum or product yields the same structure
//! - **Shared DAG**: expressions share subterms by reference counting; the
//!   DAG is built bottom-up and is provably acyclic
//! - **Single-threaded by type**: handles are `!Send`/`!Sync`, so the
//!   non-atomic counts and caches cannot cross threads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod handle;
pub mod node;
pub mod numeric;
pub mod ops;
pub mod order;
pub mod terms;

#[cfg(test)]
mod proptests;

pub use handle::Expr;
pub use node::{ExprNode, NodeData, NodeKind};
pub use numeric::{Numeric, ParseNumericError};
pub use ops::pow;
pub use terms::{SeqKind, Term, TermSeq};
