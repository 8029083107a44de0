//! Recursive, addressable error tree produced by a validation run.
//!
//! An [`ErrorNode`] mirrors the shape of the record it describes: plain
//! messages live under field keys (or the reserved [`ErrorKey::Base`] key for
//! record-level errors), and embedded records contribute child nodes through
//! [`Nested`].
//!
//! # Examples
//!
//! ```
//! use validation_rail::types::{ErrorNode, Nested};
//!
//! let mut title = ErrorNode::new();
//! title.add("title", "can't be blank");
//!
//! let mut root = ErrorNode::new();
//! root.add("name", "can't be blank");
//! root.attach("tasks", Nested::Many(vec![title, ErrorNode::new()]));
//!
//! assert_eq!(root["name"], ["can't be blank"]);
//!
//! let tasks = root.children("tasks").unwrap();
//! assert_eq!(tasks[0]["title"], ["can't be blank"]);
//! assert!(tasks[1].is_empty());
//! ```
use crate::types::Messages;
use core::fmt;
use core::ops::Index;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

const NO_MESSAGES: &[String] = &[];
const BASE: &str = "base";

/// Key under which messages are recorded.
///
/// `Base` is reserved for errors about the record as a whole and never
/// collides with a field, even one literally called `"base"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey<'a> {
    Base,
    Field(&'a str),
}

impl fmt::Display for ErrorKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKey::Base => f.write_str(BASE),
            ErrorKey::Field(name) => f.write_str(name),
        }
    }
}

/// Child error structure attached under an embedded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested {
    /// Errors of a single embedded record.
    One(ErrorNode),
    /// Errors of an embedded list, one node per input element, index-aligned.
    Many(Vec<ErrorNode>),
}

impl Nested {
    /// Returns `true` when no node in this structure holds a message.
    pub fn is_empty(&self) -> bool {
        match self {
            Nested::One(node) => node.is_empty(),
            Nested::Many(nodes) => nodes.iter().all(ErrorNode::is_empty),
        }
    }

    /// Returns the node at `index`. A single node answers only to index `0`.
    pub fn at(&self, index: usize) -> Option<&ErrorNode> {
        match self {
            Nested::One(node) if index == 0 => Some(node),
            Nested::One(_) => None,
            Nested::Many(nodes) => nodes.get(index),
        }
    }

    pub fn first(&self) -> Option<&ErrorNode> {
        self.at(0)
    }

    /// Number of child nodes (`1` for a single embedded record).
    pub fn len(&self) -> usize {
        match self {
            Nested::One(_) => 1,
            Nested::Many(nodes) => nodes.len(),
        }
    }

    fn error_count(&self) -> usize {
        match self {
            Nested::One(node) => node.error_count(),
            Nested::Many(nodes) => nodes.iter().map(ErrorNode::error_count).sum(),
        }
    }

    fn into_nodes(self) -> Vec<ErrorNode> {
        match self {
            Nested::One(node) => vec![node],
            Nested::Many(nodes) => nodes,
        }
    }

    /// Folds `later` into `self`. Earlier messages stay first and the shape of
    /// `later` wins; when the shapes differ, nodes are merged by index (a
    /// single node counts as index `0`) or collapsed into the single node.
    fn absorb(&mut self, later: Nested) {
        let earlier = core::mem::replace(self, Nested::Many(Vec::new()));
        *self = match (earlier, later) {
            (Nested::One(mut node), Nested::One(other)) => {
                node.merge(other);
                Nested::One(node)
            },
            (earlier, Nested::One(other)) => {
                let mut node = ErrorNode::new();
                for earlier in earlier.into_nodes() {
                    node.merge(earlier);
                }
                node.merge(other);
                Nested::One(node)
            },
            (earlier, Nested::Many(others)) => {
                let mut others = others.into_iter();
                let mut nodes: Vec<ErrorNode> = earlier
                    .into_nodes()
                    .into_iter()
                    .map(|mut node| {
                        if let Some(other) = others.next() {
                            node.merge(other);
                        }
                        node
                    })
                    .collect();
                nodes.extend(others);
                Nested::Many(nodes)
            },
        };
    }
}

/// Per-node error accumulator.
///
/// Field messages and nested structures are kept in separate maps, keyed by
/// field name and iterated in name order. A key with an empty message list is
/// distinct from an absent key, although neither makes the node invalid; this
/// holds for the base key as well.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorNode {
    base: Option<Messages>,
    fields: BTreeMap<String, Messages>,
    nested: BTreeMap<String, Nested>,
}

impl ErrorNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` under `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message);
    }

    /// Records a record-level `message` under the reserved base key.
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_mut().push(message);
    }

    /// Appends every message in `messages` under `field`.
    ///
    /// An empty list leaves the node untouched, so rules that pass do not
    /// create keys.
    pub fn extend(&mut self, field: &str, messages: Messages) {
        if messages.is_empty() {
            return;
        }
        match self.fields.get_mut(field) {
            Some(existing) => existing.extend(messages),
            None => {
                self.fields.insert(field.to_owned(), messages);
            },
        }
    }

    /// Returns the message list under `field`, creating an empty one if needed.
    pub fn messages_mut(&mut self, field: &str) -> &mut Messages {
        self.fields.entry(field.to_owned()).or_default()
    }

    /// Returns the base message list, creating an empty one if needed.
    pub fn base_mut(&mut self) -> &mut Messages {
        self.base.get_or_insert_with(Messages::new)
    }

    /// Attaches a nested structure under `field`.
    ///
    /// A structure already recorded there is merged with the new one rather
    /// than replaced, so nothing recorded earlier is lost.
    pub fn attach(&mut self, field: impl Into<String>, nested: Nested) {
        match self.nested.entry(field.into()) {
            Entry::Vacant(slot) => {
                slot.insert(nested);
            },
            Entry::Occupied(mut slot) => slot.get_mut().absorb(nested),
        }
    }

    /// Appends everything recorded in `other` after what this node holds.
    pub fn merge(&mut self, other: ErrorNode) {
        let ErrorNode {
            base,
            fields,
            nested,
        } = other;
        if let Some(base) = base {
            self.base_mut().extend(base);
        }
        for (field, messages) in fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        for (field, nested) in nested {
            self.attach(field, nested);
        }
    }

    /// Messages recorded under `field`; empty when the field has none.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields
            .get(field)
            .map(Messages::as_slice)
            .unwrap_or(NO_MESSAGES)
    }

    /// Messages recorded under `key`, or `None` if the key was never written.
    pub fn messages(&self, key: ErrorKey<'_>) -> Option<&Messages> {
        match key {
            ErrorKey::Base => self.base.as_ref(),
            ErrorKey::Field(name) => self.fields.get(name),
        }
    }

    /// Record-level messages.
    pub fn base(&self) -> &[String] {
        self.base.as_ref().map_or(NO_MESSAGES, Messages::as_slice)
    }

    /// Nested structure recorded under `field`.
    pub fn nested(&self, field: &str) -> Option<&Nested> {
        self.nested.get(field)
    }

    /// Child node of a single embedded record.
    pub fn child(&self, field: &str) -> Option<&ErrorNode> {
        match self.nested.get(field) {
            Some(Nested::One(node)) => Some(node),
            _ => None,
        }
    }

    /// Child nodes of an embedded list, index-aligned with the input.
    pub fn children(&self, field: &str) -> Option<&[ErrorNode]> {
        match self.nested.get(field) {
            Some(Nested::Many(nodes)) => Some(nodes),
            _ => None,
        }
    }

    /// Returns `true` if `field` has a message list or a nested structure.
    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field) || self.nested.contains_key(field)
    }

    /// Returns `true` iff no key holds a message and every nested node is empty.
    pub fn is_empty(&self) -> bool {
        self.base.as_ref().map_or(true, Messages::is_empty)
            && self.fields.values().all(Messages::is_empty)
            && self.nested.values().all(Nested::is_empty)
    }

    /// Total number of messages in this node and every node below it.
    pub fn error_count(&self) -> usize {
        self.base.as_ref().map_or(0, Messages::len)
            + self.fields.values().map(Messages::len).sum::<usize>()
            + self.nested.values().map(Nested::error_count).sum::<usize>()
    }

    /// Iterates over the message lists of this node, base key first.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey<'_>, &Messages)> {
        let base = self.base.as_ref().map(|messages| (ErrorKey::Base, messages));
        base.into_iter().chain(
            self.fields
                .iter()
                .map(|(name, messages)| (ErrorKey::Field(name), messages)),
        )
    }

    /// Iterates over the nested structures of this node.
    pub fn iter_nested(&self) -> impl Iterator<Item = (&str, &Nested)> {
        self.nested
            .iter()
            .map(|(name, nested)| (name.as_str(), nested))
    }

    /// Flattens the tree into `(path, message)` pairs.
    ///
    /// Paths use dots for embedded records and brackets for list elements,
    /// for example `tasks[0].title` or `address.base`.
    pub fn full_messages(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_messages("", &mut out);
        out
    }

    fn collect_messages(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (key, messages) in self.iter() {
            let path = join_path(prefix, &key.to_string());
            out.extend(messages.iter().map(|m| (path.clone(), m.clone())));
        }
        for (name, nested) in &self.nested {
            let path = join_path(prefix, name);
            match nested {
                Nested::One(node) => node.collect_messages(&path, out),
                Nested::Many(nodes) => {
                    for (index, node) in nodes.iter().enumerate() {
                        node.collect_messages(&format!("{path}[{index}]"), out);
                    }
                },
            }
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

impl Index<&str> for ErrorNode {
    type Output = [String];

    fn index(&self, field: &str) -> &[String] {
        self.get(field)
    }
}

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, message)) in self.full_messages().iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{path} {message}")?;
        }
        Ok(())
    }
}

/// Serializes as a JSON-style object.
///
/// Message lists become arrays of strings, single embedded nodes become
/// objects and embedded lists become arrays of objects. A field carrying both
/// messages and a nested structure is written as
/// `{"errors": [...], "nested": ...}`.
///
/// Base messages are written under `"base"`. A field literally named `"base"`
/// shares that entry: its messages follow the base messages, so both survive
/// in the output.
impl Serialize for ErrorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        let shared;
        let base = match (&self.base, self.fields.get(BASE)) {
            (Some(base), Some(field)) => {
                shared = base.iter().chain(field).cloned().collect::<Messages>();
                Some(&shared)
            },
            (Some(base), None) => Some(base),
            (None, field) => field,
        };
        if let Some(messages) = base {
            write_entry(&mut map, BASE, messages, self.nested.get(BASE))?;
        }

        for (name, messages) in self.fields.iter().filter(|(name, _)| name.as_str() != BASE) {
            write_entry(&mut map, name, messages, self.nested.get(name))?;
        }
        for (name, nested) in &self.nested {
            let written = self.fields.contains_key(name) || (name == BASE && base.is_some());
            if !written {
                map.serialize_entry(name, nested)?;
            }
        }
        map.end()
    }
}

fn write_entry<M: SerializeMap>(
    map: &mut M,
    name: &str,
    errors: &Messages,
    nested: Option<&Nested>,
) -> Result<(), M::Error> {
    match nested {
        Some(nested) => map.serialize_entry(name, &Combined { errors, nested }),
        None => map.serialize_entry(name, errors),
    }
}

impl Serialize for Nested {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nested::One(node) => node.serialize(serializer),
            Nested::Many(nodes) => nodes.serialize(serializer),
        }
    }
}

#[derive(Serialize)]
struct Combined<'a> {
    errors: &'a Messages,
    nested: &'a Nested,
}
