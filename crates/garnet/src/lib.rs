//! # Garnet
//!
//! The representation kernel of a symbolic computation engine.
//!
//! Garnet keeps expressions as immutable, reference-counted DAG nodes
//! behind cheap [`Expr`](garnet_core::Expr) handles, holds sums and
//! products in one canonical coefficient-pair form, and persists whole
//! expression DAGs to a compact binary archive that preserves node
//! sharing.
//!
//! ## Quick Start
//!
//! ```
//! use garnet::prelude::*;
//!
//! let x = Expr::symbol("x");
//! let e = &x * &x + &x + Expr::from(1);
//!
//! let mut archive = Archive::new();
//! archive.archive_ex(&e, "e");
//! let bytes = archive.to_bytes()?;
//!
//! let decoded = Archive::from_bytes(&bytes)?;
//! let mut syms = SymbolTable::new();
//! syms.insert(&x);
//! assert_eq!(decoded.unarchive_ex(&mut syms, "e")?, e);
//! # Ok::<(), garnet::archive::ArchiveError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use garnet_archive as archive;
pub use garnet_core as core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use garnet_archive::{Archive, SymbolTable};
    pub use garnet_core::{pow, Expr, NodeData, NodeKind, Numeric};
}
