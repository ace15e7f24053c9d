//! Binary serialization of archives.
//!
//! The wire layout is fully sequential, every integer a varint:
//!
//! ```text
//! signature      "GARC"
//! version        varint
//! atom count     varint, then each atom as UTF-8 bytes + NUL
//! expr count     varint, then per expression: name atom id, root node id
//! node count     varint, then per node: property count, then per
//!                property a packed tag (type in the low 3 bits, name
//!                atom id above) followed by the value
//! ```
//!
//! Reading gates on the version before touching anything else and never
//! materializes expressions; decoded nodes stay raw until unarchived.

use std::io::{Read, Write};

use crate::archive::{Archive, ArchivedExpr};
use crate::error::ArchiveError;
use crate::node::{ArchiveNode, Property, PropertyKind};
use crate::varint::{read_u8, read_unsigned, write_unsigned};

/// Magic bytes opening every archive.
pub const SIGNATURE: [u8; 4] = *b"GARC";

/// Format version written by this library.
pub const VERSION: u64 = 1;

/// Oldest format version this library still reads.
pub const OLDEST_SUPPORTED: u64 = 1;

impl Archive {
    /// Writes the archive in binary form.
    ///
    /// # Errors
    ///
    /// Only I/O failures from the writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), ArchiveError> {
        w.write_all(&SIGNATURE)?;
        write_unsigned(w, VERSION)?;

        write_unsigned(w, self.atoms.len() as u64)?;
        for atom in &self.atoms {
            w.write_all(atom.as_bytes())?;
            w.write_all(&[0])?;
        }

        write_unsigned(w, self.exprs.len() as u64)?;
        for e in &self.exprs {
            write_unsigned(w, e.name as u64)?;
            write_unsigned(w, e.root as u64)?;
        }

        write_unsigned(w, self.nodes.len() as u64)?;
        for node in &self.nodes {
            write_unsigned(w, node.props().len() as u64)?;
            for p in node.props() {
                write_unsigned(w, p.kind.tag() | ((p.name as u64) << 3))?;
                write_unsigned(w, p.value)?;
            }
        }
        Ok(())
    }

    /// Reads an archive in binary form. All nodes come back raw.
    ///
    /// # Errors
    ///
    /// Signature, version, structural or I/O errors.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self, ArchiveError> {
        let mut sig = [0u8; 4];
        r.read_exact(&mut sig).map_err(ArchiveError::from_io)?;
        if sig != SIGNATURE {
            return Err(ArchiveError::BadSignature);
        }
        let version = read_unsigned(r)?;
        if !(OLDEST_SUPPORTED..=VERSION).contains(&version) {
            return Err(ArchiveError::UnsupportedVersion {
                version,
                oldest: OLDEST_SUPPORTED,
                current: VERSION,
            });
        }

        let mut archive = Archive::new();

        let atom_count = read_unsigned(r)?;
        for _ in 0..atom_count {
            let mut bytes = Vec::new();
            loop {
                match read_u8(r)? {
                    0 => break,
                    b => bytes.push(b),
                }
            }
            let atom = String::from_utf8(bytes).map_err(|_| ArchiveError::BadAtom)?;
            let id = archive.atoms.len();
            archive.atom_index.insert(atom.clone(), id);
            archive.atoms.push(atom);
        }

        let expr_count = read_unsigned(r)?;
        for _ in 0..expr_count {
            let name = read_index(r)?;
            let root = read_index(r)?;
            archive.exprs.push(ArchivedExpr { name, root });
        }

        let node_count = read_unsigned(r)?;
        for _ in 0..node_count {
            let prop_count = read_unsigned(r)?;
            // Counts are untrusted until the properties actually decode, so
            // no pre-allocation from the wire value.
            let mut props = Vec::new();
            for _ in 0..prop_count {
                let tag = read_unsigned(r)?;
                let kind = PropertyKind::from_tag(tag & 0x7)
                    .ok_or(ArchiveError::BadPropertyTag(tag & 0x7))?;
                let name = usize::try_from(tag >> 3)
                    .map_err(|_| ArchiveError::AtomIdOutOfRange(tag >> 3))?;
                let value = read_unsigned(r)?;
                props.push(Property { kind, name, value });
            }
            archive.nodes.push(ArchiveNode::from_props(props));
        }

        Ok(archive)
    }

    /// Serializes to an owned byte buffer.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches `write_to`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Deserializes from a byte slice.
    ///
    /// # Errors
    ///
    /// Same as [`Archive::read_from`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        Self::read_from(&mut &bytes[..])
    }
}

fn read_index<R: Read>(r: &mut R) -> Result<usize, ArchiveError> {
    let val = read_unsigned(r)?;
    usize::try_from(val).map_err(|_| ArchiveError::NodeIdOutOfRange(val))
}
