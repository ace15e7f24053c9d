//! Persistent storage for expression DAGs.
//!
//! Expressions are flattened into an [`Archive`]: an interned atom
//! table, a node table deduplicated by live-node identity and a list of
//! named roots. Archives serialize to a compact binary stream (varint
//! integers, NUL-terminated atoms) behind a signature and version gate,
//! and reconstruct lazily, caching each node's expression so shared
//! subterms come back shared.
//!
//! ```
//! use garnet_archive::{Archive, SymbolTable};
//! use garnet_core::Expr;
//!
//! let x = Expr::symbol("x");
//! let e = &x * &x + Expr::from(1);
//!
//! let mut archive = Archive::new();
//! archive.archive_ex(&e, "e");
//! let bytes = archive.to_bytes()?;
//!
//! let decoded = Archive::from_bytes(&bytes)?;
//! let mut syms = SymbolTable::new();
//! syms.insert(&x);
//! assert_eq!(decoded.unarchive_ex(&mut syms, "e")?, e);
//! # Ok::<(), garnet_archive::ArchiveError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod archive;
mod codec;
mod error;
mod node;
mod varint;

#[cfg(test)]
mod proptests;

pub use archive::{Archive, SymbolTable};
pub use codec::{OLDEST_SUPPORTED, SIGNATURE, VERSION};
pub use error::ArchiveError;
pub use node::{ArchiveNode, AtomId, NodeId, Property, PropertyKind};
