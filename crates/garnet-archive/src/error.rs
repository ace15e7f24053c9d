//! Archive error taxonomy.
//!
//! All archive format problems are recoverable structured errors scoped
//! to the failing call; the archive instance stays usable afterwards.
//! Broken kernel invariants are asserted, never returned.

use thiserror::Error;

/// Errors raised while reading, writing or reconstructing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The input does not start with the archive signature.
    #[error("not a garnet archive (signature not found)")]
    BadSignature,

    /// The archive version is newer than this library or older than the
    /// oldest format it still reads.
    #[error("archive version {version} is outside the supported range {oldest}..={current}")]
    UnsupportedVersion {
        /// Version found in the input.
        version: u64,
        /// Oldest version this library reads.
        oldest: u64,
        /// Current version this library writes.
        current: u64,
    },

    /// A property or name referenced an atom id past the atom table.
    #[error("atom id {0} out of range")]
    AtomIdOutOfRange(u64),

    /// A property referenced a node id past the node table.
    #[error("node id {0} out of range")]
    NodeIdOutOfRange(u64),

    /// An expression index past the named-root table.
    #[error("expression index {0} out of range")]
    IndexOutOfRange(usize),

    /// No archived expression carries the requested name.
    #[error("expression with name '{0}' not found in archive")]
    NameNotFound(String),

    /// A node lacks a property its class requires.
    #[error("archive node has no property '{0}'")]
    MissingProperty(&'static str),

    /// A node's class identifier has no reconstruction routine.
    #[error("unknown class identifier '{0}'")]
    UnknownClass(String),

    /// A property carried a type tag outside the defined set.
    #[error("unknown property type tag {0}")]
    BadPropertyTag(u64),

    /// A numeric literal failed to parse.
    #[error("malformed numeric literal '{0}'")]
    BadNumeric(String),

    /// A matrix node whose element count disagrees with its dimensions.
    #[error("matrix dimensions do not match element count")]
    BadMatrix,

    /// An atom table entry is not valid UTF-8.
    #[error("atom is not valid UTF-8")]
    BadAtom,

    /// A varint ran past 64 bits of payload.
    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    /// The input ended mid-structure.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// An underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Wraps an I/O error, folding truncation into [`Self::UnexpectedEof`].
    #[must_use]
    pub(crate) fn from_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(err)
        }
    }
}
