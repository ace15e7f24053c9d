//! Archiving of expression DAGs.
//!
//! An [`Archive`] holds one atom table (interned strings), one node table
//! and a list of named expression roots. Archiving walks a live
//! expression once, bottom-up, deduplicating by node *identity*: a node
//! instance reachable through several parents is stored once and
//! referenced by id, while structurally equal but separately built
//! subexpressions are archived as distinct nodes on purpose. Because the
//! expression DAG is acyclic and built bottom-up, a node only ever
//! references nodes with smaller ids.

use std::fmt;

use garnet_core::{Expr, NodeData, Numeric, SeqKind, Term, TermSeq};
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use crate::error::ArchiveError;
use crate::node::{ArchiveNode, AtomId, NodeId, PropertyKind};

// Class identifiers: the stable wire contract for variant dispatch.
const CLASS_SYMBOL: &str = "symbol";
const CLASS_NUMERIC: &str = "numeric";
const CLASS_ADD: &str = "add";
const CLASS_MUL: &str = "mul";
const CLASS_POWER: &str = "power";
const CLASS_FUNCTION: &str = "function";
const CLASS_MATRIX: &str = "matrix";

/// Caller-supplied table mapping symbol names to live symbol instances.
///
/// Unarchiving resolves free symbols through this table so that
/// re-materialized expressions share the caller's existing symbols;
/// names without an entry get a fresh symbol which is then added, so all
/// occurrences within one unarchive share it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    map: FxHashMap<String, Expr>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a symbol expression under its own name.
    ///
    /// # Panics
    ///
    /// Panics if the expression is not a symbol.
    pub fn insert(&mut self, sym: &Expr) {
        match sym.data() {
            NodeData::Symbol(name) => {
                self.map.insert(name.clone(), sym.clone());
            }
            _ => panic!("SymbolTable::insert: expression is not a symbol"),
        }
    }

    /// Looks up a symbol by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.map.get(name)
    }

    /// Returns the symbol with the given name, creating and remembering
    /// a fresh one if absent.
    pub fn resolve_or_create(&mut self, name: &str) -> Expr {
        if let Some(sym) = self.map.get(name) {
            return sym.clone();
        }
        let sym = Expr::symbol(name);
        self.map.insert(name.to_string(), sym.clone());
        sym
    }

    /// Returns the number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no symbols are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<Expr> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        let mut table = Self::new();
        for sym in iter {
            table.insert(&sym);
        }
        table
    }
}

/// One named expression root.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ArchivedExpr {
    pub(crate) name: AtomId,
    pub(crate) root: NodeId,
}

/// A flat, deduplicated encoding of one or more named expression DAGs.
#[derive(Debug, Default)]
pub struct Archive {
    pub(crate) atoms: Vec<String>,
    pub(crate) atom_index: FxHashMap<String, AtomId>,
    pub(crate) exprs: Vec<ArchivedExpr>,
    pub(crate) nodes: Vec<ArchiveNode>,
}

impl Archive {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Archives an expression under a name.
    ///
    /// Recursively visits every reachable node instance, creating one
    /// archive node per instance (children first, so child ids are known
    /// when the parent is emitted) and registers the root id under
    /// `name`.
    pub fn archive_ex(&mut self, expr: &Expr, name: &str) {
        let root = self.archive_node(expr);
        let name = self.atomize(name);
        self.exprs.push(ArchivedExpr { name, root });
    }

    /// Unarchives the expression stored under `name`.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::NameNotFound`] if no root has that name, or any
    /// reconstruction error from the node table.
    pub fn unarchive_ex(
        &self,
        symbols: &mut SymbolTable,
        name: &str,
    ) -> Result<Expr, ArchiveError> {
        let entry = self
            .atom_id(name)
            .and_then(|atom| self.exprs.iter().find(|e| e.name == atom))
            .ok_or_else(|| ArchiveError::NameNotFound(name.to_string()))?;
        self.unarchive_node(entry.root, symbols)
    }

    /// Unarchives the expression at the given index.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::IndexOutOfRange`] or any reconstruction error.
    pub fn unarchive_at(
        &self,
        symbols: &mut SymbolTable,
        index: usize,
    ) -> Result<Expr, ArchiveError> {
        let entry = self
            .exprs
            .get(index)
            .ok_or(ArchiveError::IndexOutOfRange(index))?;
        self.unarchive_node(entry.root, symbols)
    }

    /// Returns the number of archived expressions.
    #[must_use]
    pub fn num_expressions(&self) -> usize {
        self.exprs.len()
    }

    /// Returns the name of the expression at the given index.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::IndexOutOfRange`] or a corrupt name atom.
    pub fn expression_name(&self, index: usize) -> Result<&str, ArchiveError> {
        let entry = self
            .exprs
            .get(index)
            .ok_or(ArchiveError::IndexOutOfRange(index))?;
        self.atom_str(entry.name as u64)
    }

    /// Returns the root archive node of the expression at the given
    /// index.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::IndexOutOfRange`].
    pub fn root_node(&self, index: usize) -> Result<&ArchiveNode, ArchiveError> {
        let entry = self
            .exprs
            .get(index)
            .ok_or(ArchiveError::IndexOutOfRange(index))?;
        self.nodes
            .get(entry.root)
            .ok_or(ArchiveError::NodeIdOutOfRange(entry.root as u64))
    }

    /// Returns the number of archive nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node's cached expression, resetting them to raw.
    pub fn forget(&self) {
        for node in &self.nodes {
            node.forget();
        }
    }

    /// Empties the archive.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.atom_index.clear();
        self.exprs.clear();
        self.nodes.clear();
    }

    /// Interns a string in the atom table.
    pub(crate) fn atomize(&mut self, s: &str) -> AtomId {
        if let Some(&id) = self.atom_index.get(s) {
            return id;
        }
        let id = self.atoms.len();
        self.atoms.push(s.to_string());
        self.atom_index.insert(s.to_string(), id);
        id
    }

    fn atom_id(&self, s: &str) -> Option<AtomId> {
        self.atom_index.get(s).copied()
    }

    fn atom_str(&self, id: u64) -> Result<&str, ArchiveError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.atoms.get(i))
            .map(String::as_str)
            .ok_or(ArchiveError::AtomIdOutOfRange(id))
    }

    /// Archives one node instance, returning its id; an instance already
    /// present in the node table (by identity) is returned as-is.
    fn archive_node(&mut self, expr: &Expr) -> NodeId {
        // Linear identity scan; archiving is not a hot path.
        for (id, node) in self.nodes.iter().enumerate() {
            if node.same_expr_as(expr) {
                return id;
            }
        }

        let mut node = ArchiveNode::default();
        let class = self.atomize("class");
        match expr.data() {
            NodeData::Symbol(name) => {
                let value = self.atomize(CLASS_SYMBOL);
                node.push(PropertyKind::String, class, value as u64);
                let key = self.atomize("name");
                let value = self.atomize(name);
                node.push(PropertyKind::String, key, value as u64);
            }
            NodeData::Number(n) => {
                let value = self.atomize(CLASS_NUMERIC);
                node.push(PropertyKind::String, class, value as u64);
                let key = self.atomize("value");
                let value = self.atomize(&n.to_string());
                node.push(PropertyKind::String, key, value as u64);
            }
            NodeData::Add(seq) | NodeData::Mul(seq) => {
                let class_name = match expr.data() {
                    NodeData::Add(_) => CLASS_ADD,
                    _ => CLASS_MUL,
                };
                let value = self.atomize(class_name);
                node.push(PropertyKind::String, class, value as u64);
                for term in seq.terms() {
                    let child = self.archive_node(&term.rest);
                    let key = self.atomize("rest");
                    node.push(PropertyKind::Node, key, child as u64);
                    let key = self.atomize("coeff");
                    let value = self.atomize(&term.coeff.to_string());
                    node.push(PropertyKind::String, key, value as u64);
                }
                let key = self.atomize("overall");
                let value = self.atomize(&seq.coeff().to_string());
                node.push(PropertyKind::String, key, value as u64);
            }
            NodeData::Power { base, exp } => {
                let value = self.atomize(CLASS_POWER);
                node.push(PropertyKind::String, class, value as u64);
                let child = self.archive_node(base);
                let key = self.atomize("basis");
                node.push(PropertyKind::Node, key, child as u64);
                let child = self.archive_node(exp);
                let key = self.atomize("exponent");
                node.push(PropertyKind::Node, key, child as u64);
            }
            NodeData::Function { name, args } => {
                let value = self.atomize(CLASS_FUNCTION);
                node.push(PropertyKind::String, class, value as u64);
                let key = self.atomize("name");
                let value = self.atomize(name);
                node.push(PropertyKind::String, key, value as u64);
                for arg in args {
                    let child = self.archive_node(arg);
                    let key = self.atomize("arg");
                    node.push(PropertyKind::Node, key, child as u64);
                }
            }
            NodeData::Matrix { rows, cols, elems } => {
                let value = self.atomize(CLASS_MATRIX);
                node.push(PropertyKind::String, class, value as u64);
                let key = self.atomize("row");
                node.push(PropertyKind::Unsigned, key, *rows as u64);
                let key = self.atomize("col");
                node.push(PropertyKind::Unsigned, key, *cols as u64);
                for elem in elems {
                    let child = self.archive_node(elem);
                    let key = self.atomize("element");
                    node.push(PropertyKind::Node, key, child as u64);
                }
            }
        }

        let id = self.nodes.len();
        node.fill_cache(expr);
        self.nodes.push(node);
        id
    }

    /// Reconstructs the expression for one node, caching the result.
    fn unarchive_node(
        &self,
        id: NodeId,
        symbols: &mut SymbolTable,
    ) -> Result<Expr, ArchiveError> {
        let node = self
            .nodes
            .get(id)
            .ok_or(ArchiveError::NodeIdOutOfRange(id as u64))?;
        if let Some(cached) = node.cached() {
            return Ok(cached);
        }

        let class = self
            .find_string(node, "class", 0)?
            .ok_or(ArchiveError::MissingProperty("class"))?;
        let expr = match class.as_str() {
            CLASS_SYMBOL => {
                let name = self.require_string(node, "name")?;
                symbols.resolve_or_create(&name)
            }
            CLASS_NUMERIC => {
                let value = self.require_string(node, "value")?;
                Expr::number(parse_numeric(&value)?)
            }
            CLASS_ADD => self.unarchive_seq(id, node, SeqKind::Add, symbols)?,
            CLASS_MUL => self.unarchive_seq(id, node, SeqKind::Mul, symbols)?,
            CLASS_POWER => {
                let base = self.require_child(id, node, "basis", 0, symbols)?;
                let exp = self.require_child(id, node, "exponent", 0, symbols)?;
                base.pow(&exp)
            }
            CLASS_FUNCTION => {
                let name = self.require_string(node, "name")?;
                let mut args = Vec::new();
                while let Some(arg) = self.find_child(id, node, "arg", args.len(), symbols)? {
                    args.push(arg);
                }
                Expr::function(name, args)
            }
            CLASS_MATRIX => {
                let rows = self
                    .find_unsigned(node, "row")
                    .ok_or(ArchiveError::MissingProperty("row"))?;
                let cols = self
                    .find_unsigned(node, "col")
                    .ok_or(ArchiveError::MissingProperty("col"))?;
                let mut elems = Vec::new();
                while let Some(elem) =
                    self.find_child(id, node, "element", elems.len(), symbols)?
                {
                    elems.push(elem);
                }
                let (rows, cols) = usize::try_from(rows)
                    .ok()
                    .zip(usize::try_from(cols).ok())
                    .ok_or(ArchiveError::BadMatrix)?;
                if rows.checked_mul(cols) != Some(elems.len()) {
                    return Err(ArchiveError::BadMatrix);
                }
                Expr::matrix(rows, cols, elems)
            }
            _ => return Err(ArchiveError::UnknownClass(class)),
        };

        node.fill_cache(&expr);
        Ok(expr)
    }

    /// Reconstructs a sum or product from its pair properties.
    fn unarchive_seq(
        &self,
        id: NodeId,
        node: &ArchiveNode,
        kind: SeqKind,
        symbols: &mut SymbolTable,
    ) -> Result<Expr, ArchiveError> {
        let mut children = Vec::new();
        let mut nth = 0;
        loop {
            let rest = self.find_child(id, node, "rest", nth, symbols)?;
            let coeff = self.find_string(node, "coeff", nth)?;
            match (rest, coeff) {
                (Some(rest), Some(coeff)) => {
                    let coeff = parse_numeric(&coeff)?;
                    children.push(TermSeq::recombine(kind, &Term { rest, coeff }));
                }
                (None, None) => break,
                (Some(_), None) => return Err(ArchiveError::MissingProperty("coeff")),
                (None, Some(_)) => return Err(ArchiveError::MissingProperty("rest")),
            }
            nth += 1;
        }
        let overall = parse_numeric(&self.require_string(node, "overall")?)?;
        if !(match kind {
            SeqKind::Add => overall.is_zero(),
            SeqKind::Mul => overall.is_one(),
        }) {
            children.push(Expr::number(overall));
        }
        Ok(TermSeq::from_children(kind, &children).into_expr())
    }

    fn find_string(
        &self,
        node: &ArchiveNode,
        name: &'static str,
        nth: usize,
    ) -> Result<Option<String>, ArchiveError> {
        let Some(atom) = self.atom_id(name) else {
            return Ok(None);
        };
        match node.find(PropertyKind::String, atom, nth) {
            Some(value) => Ok(Some(self.atom_str(value)?.to_string())),
            None => Ok(None),
        }
    }

    fn require_string(
        &self,
        node: &ArchiveNode,
        name: &'static str,
    ) -> Result<String, ArchiveError> {
        self.find_string(node, name, 0)?
            .ok_or(ArchiveError::MissingProperty(name))
    }

    fn find_unsigned(&self, node: &ArchiveNode, name: &str) -> Option<u64> {
        let atom = self.atom_id(name)?;
        node.find(PropertyKind::Unsigned, atom, 0)
    }

    /// Resolves the `nth` child-node property, enforcing that children
    /// always have smaller ids than their parent (the DAG is built
    /// bottom-up, so anything else is corruption and would recurse
    /// forever).
    fn find_child(
        &self,
        parent: NodeId,
        node: &ArchiveNode,
        name: &'static str,
        nth: usize,
        symbols: &mut SymbolTable,
    ) -> Result<Option<Expr>, ArchiveError> {
        let Some(atom) = self.atom_id(name) else {
            return Ok(None);
        };
        let Some(value) = node.find(PropertyKind::Node, atom, nth) else {
            return Ok(None);
        };
        let child = usize::try_from(value)
            .ok()
            .filter(|&c| c < parent)
            .ok_or(ArchiveError::NodeIdOutOfRange(value))?;
        Ok(Some(self.unarchive_node(child, symbols)?))
    }

    fn require_child(
        &self,
        parent: NodeId,
        node: &ArchiveNode,
        name: &'static str,
        nth: usize,
        symbols: &mut SymbolTable,
    ) -> Result<Expr, ArchiveError> {
        self.find_child(parent, node, name, nth, symbols)?
            .ok_or(ArchiveError::MissingProperty(name))
    }
}

fn parse_numeric(s: &str) -> Result<Numeric, ArchiveError> {
    s.parse()
        .map_err(|_| ArchiveError::BadNumeric(s.to_string()))
}

impl fmt::Display for Archive {
    /// Raw dump of the archive contents, for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Atoms:")?;
        for (id, atom) in self.atoms.iter().enumerate() {
            writeln!(f, " {id} {atom}")?;
        }
        writeln!(f, "Expressions:")?;
        for (index, e) in self.exprs.iter().enumerate() {
            let name = self.atoms.get(e.name).map_or("?", String::as_str);
            writeln!(f, " {index} \"{name}\" root node {}", e.root)?;
        }
        writeln!(f, "Nodes:")?;
        for (id, node) in self.nodes.iter().enumerate() {
            let state = if node.is_materialized() { "materialized" } else { "raw" };
            writeln!(f, " {id} ({state})")?;
            for p in node.props() {
                let kind = match p.kind {
                    PropertyKind::Bool => "bool",
                    PropertyKind::Unsigned => "unsigned",
                    PropertyKind::String => "string",
                    PropertyKind::Node => "node",
                };
                let name = self.atoms.get(p.name).map_or("?", String::as_str);
                writeln!(f, "  {kind} \"{name}\" {}", p.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use garnet_core::pow;

    use super::*;

    #[test]
    fn same_instance_is_stored_once() {
        let x = Expr::symbol("x");
        let e = &x + Expr::from(1);

        let mut archive = Archive::new();
        archive.archive_ex(&e, "a");
        let before = archive.num_nodes();
        archive.archive_ex(&e, "b");
        // Second root reuses every node.
        assert_eq!(archive.num_nodes(), before);
        assert_eq!(archive.num_expressions(), 2);

        let mut syms = SymbolTable::new();
        let a = archive.unarchive_ex(&mut syms, "a").unwrap();
        let b = archive.unarchive_ex(&mut syms, "b").unwrap();
        assert!(Expr::ptr_eq(&a, &b));
    }

    #[test]
    fn structural_twins_stay_distinct() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let s1 = &x + &y;
        let s2 = &x + &y;
        assert_eq!(s1, s2);
        assert!(!Expr::ptr_eq(&s1, &s2));

        let mut archive = Archive::new();
        archive.archive_ex(&Expr::function("f", [s1, s2]), "f");
        // x, y, two adds, f.
        assert_eq!(archive.num_nodes(), 5);
    }

    #[test]
    fn unarchiving_caches_and_forget_resets() {
        let x = Expr::symbol("x");
        let e = pow(&x, &Expr::from(3));

        let mut archive = Archive::new();
        archive.archive_ex(&e, "e");
        archive.forget();
        assert!(!archive.root_node(0).unwrap().is_materialized());

        let mut syms = SymbolTable::new();
        let first = archive.unarchive_ex(&mut syms, "e").unwrap();
        assert!(archive.root_node(0).unwrap().is_materialized());
        let second = archive.unarchive_ex(&mut syms, "e").unwrap();
        assert!(Expr::ptr_eq(&first, &second));

        archive.forget();
        let third = archive.unarchive_ex(&mut syms, "e").unwrap();
        assert_eq!(third, first);
        assert!(!Expr::ptr_eq(&third, &first));
    }

    #[test]
    fn symbols_resolve_through_the_table() {
        let x = Expr::symbol("x");
        let e = &x * Expr::from(2);

        let mut archive = Archive::new();
        archive.archive_ex(&e, "e");
        archive.forget();

        let mut syms = SymbolTable::new();
        syms.insert(&x);
        let back = archive.unarchive_ex(&mut syms, "e").unwrap();
        let terms = back.terms().unwrap();
        assert!(Expr::ptr_eq(&terms[0].rest, &x));
    }

    #[test]
    fn fresh_symbols_are_shared_within_one_unarchive() {
        let x = Expr::symbol("x");
        let f = Expr::function("f", [x.clone(), pow(&x, &Expr::from(2))]);

        let mut archive = Archive::new();
        archive.archive_ex(&f, "f");
        archive.forget();

        let mut syms = SymbolTable::new();
        let back = archive.unarchive_ex(&mut syms, "f").unwrap();
        let args = back.children();
        let base = args[1].children();
        assert!(Expr::ptr_eq(&args[0], &base[0]));
        assert_eq!(syms.len(), 1);
    }

    #[test]
    fn lookup_errors() {
        let mut archive = Archive::new();
        archive.archive_ex(&Expr::symbol("x"), "x");

        let mut syms = SymbolTable::new();
        assert!(matches!(
            archive.unarchive_ex(&mut syms, "missing"),
            Err(ArchiveError::NameNotFound(_))
        ));
        assert!(matches!(
            archive.unarchive_at(&mut syms, 1),
            Err(ArchiveError::IndexOutOfRange(1))
        ));
        assert_eq!(archive.expression_name(0).unwrap(), "x");
        assert_eq!(
            archive.unarchive_at(&mut syms, 0).unwrap(),
            Expr::symbol("x")
        );
    }

    // Installs a hand-built node as a named root, for corruption tests.
    fn install_root(archive: &mut Archive, node: ArchiveNode, name: &str) -> NodeId {
        let id = archive.nodes.len();
        archive.nodes.push(node);
        let name = archive.atomize(name);
        archive.exprs.push(ArchivedExpr { name, root: id });
        id
    }

    #[test]
    fn unknown_class_is_rejected() {
        let mut archive = Archive::new();
        archive.archive_ex(&Expr::symbol("x"), "good");

        let class = archive.atomize("class");
        let widget = archive.atomize("widget");
        let mut node = ArchiveNode::default();
        node.push(PropertyKind::String, class, widget as u64);
        install_root(&mut archive, node, "bad");

        let mut syms = SymbolTable::new();
        match archive.unarchive_ex(&mut syms, "bad") {
            Err(ArchiveError::UnknownClass(c)) => assert_eq!(c, "widget"),
            other => panic!("expected UnknownClass, got {other:?}"),
        }
        // The failure is scoped to the call; other roots still unarchive.
        assert_eq!(
            archive.unarchive_ex(&mut syms, "good").unwrap(),
            Expr::symbol("x")
        );
    }

    #[test]
    fn missing_required_property_is_rejected() {
        let mut archive = Archive::new();
        archive.archive_ex(&Expr::symbol("x"), "x");

        // A power node with a basis but no exponent.
        let class = archive.atomize("class");
        let power = archive.atomize("power");
        let basis = archive.atomize("basis");
        let mut node = ArchiveNode::default();
        node.push(PropertyKind::String, class, power as u64);
        node.push(PropertyKind::Node, basis, 0);
        install_root(&mut archive, node, "broken");
        archive.forget();

        let mut syms = SymbolTable::new();
        assert!(matches!(
            archive.unarchive_ex(&mut syms, "broken"),
            Err(ArchiveError::MissingProperty("exponent"))
        ));
        assert_eq!(
            archive.unarchive_ex(&mut syms, "x").unwrap(),
            Expr::symbol("x")
        );
    }

    #[test]
    fn malformed_numeric_literal_is_rejected() {
        let mut archive = Archive::new();
        let class = archive.atomize("class");
        let numeric = archive.atomize("numeric");
        let value = archive.atomize("value");
        let bad = archive.atomize("1/0");
        let mut node = ArchiveNode::default();
        node.push(PropertyKind::String, class, numeric as u64);
        node.push(PropertyKind::String, value, bad as u64);
        install_root(&mut archive, node, "q");

        let mut syms = SymbolTable::new();
        match archive.unarchive_ex(&mut syms, "q") {
            Err(ArchiveError::BadNumeric(s)) => assert_eq!(s, "1/0"),
            other => panic!("expected BadNumeric, got {other:?}"),
        }
        // The archive stays usable for new work after the failure.
        archive.archive_ex(&Expr::from(7), "seven");
        assert_eq!(
            archive.unarchive_ex(&mut syms, "seven").unwrap(),
            Expr::from(7)
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut archive = Archive::new();
        archive.archive_ex(&Expr::symbol("x"), "x");
        archive.clear();
        assert_eq!(archive.num_expressions(), 0);
        assert_eq!(archive.num_nodes(), 0);
        assert!(archive.atoms.is_empty());
    }

    #[test]
    fn display_dumps_raw_contents() {
        let mut archive = Archive::new();
        archive.archive_ex(&Expr::symbol("x"), "x");
        let dump = archive.to_string();
        assert!(dump.contains("Atoms:"));
        assert!(dump.contains("symbol"));
        assert!(dump.contains("root node 0"));
    }
}
