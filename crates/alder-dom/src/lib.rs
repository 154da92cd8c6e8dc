//! DOM tree implementation for the alder markup toolkit.
//!
//! This crate provides an arena-based, mutable, DOM-like tree for
//! environments with no native document model, loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Node kinds are a tagged variant ([`NodeData`]); cloning dispatches
//! explicitly on the variant instead of through virtual constructors.
//! Attribute nodes live in a sibling arena addressed by [`AttrId`], so an
//! attribute's value has exactly one storage location and element lookups
//! and attribute-node writes stay synchronized by construction.

use std::collections::HashSet;

use strum_macros::Display;
use thiserror::Error;

pub mod attrs;
pub mod class_style;
pub mod events;
pub mod selector;
pub mod serialize;
pub mod walker;

pub use attrs::AttrNode;
pub use class_style::{StyleRule, StyleSheet};
pub use events::{EventListener, ListenerSet};
pub use selector::{AttrOperator, SelectorStep, SimpleSelector, parse_selector};
pub use serialize::SerializeOptions;
pub use walker::{
    SHOW_ALL, SHOW_COMMENT, SHOW_DOCUMENT, SHOW_DOCUMENT_FRAGMENT, SHOW_ELEMENT, SHOW_TEXT,
    TreeWalker,
};

/// A type-safe index into the node arena of a [`Document`].
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A type-safe index into the attribute arena of a [`Document`].
///
/// Attribute nodes are not tree children; they are reachable only through
/// their owning element's attribute lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrId(pub usize);

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    DocumentFragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element,
    /// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
    Attribute,
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text,
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment,
}

/// Kind-specific payload of a node.
///
/// A tagged variant instead of an inheritance hierarchy: generic operations
/// (cloning, serialization, traversal) dispatch on the variant explicitly.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The tree root. Exactly one per parsed document.
    Document,
    /// A parentless container whose insertion splices its children.
    DocumentFragment,
    /// An element with a tag name, attributes, classes, and style.
    Element(ElementData),
    /// "Text nodes are known as text." The payload is the character data.
    Text(String),
    /// "Comment nodes are known as comments." Also holds collapsed
    /// DOCTYPE/CDATA interiors produced by the permissive parser.
    Comment(String),
}

impl NodeData {
    /// The [`NodeKind`] of this payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::DocumentFragment => NodeKind::DocumentFragment,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
        }
    }
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name..."
/// and "an associated attribute list".
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element's local name.
    pub tag_name: String,
    /// Optional namespace prefix (the `svg` in `<svg:rect>`).
    pub prefix: Option<String>,
    /// Default-namespace attributes, in insertion order.
    pub attributes: Vec<AttrId>,
    /// Per-namespace-URI attribute lists, each in insertion order.
    pub ns_attributes: Vec<(String, Vec<AttrId>)>,
    /// Inline style dictionary, in insertion order. Merged over the `style`
    /// attribute at serialization time; dictionary entries win.
    pub style: Vec<(String, String)>,
    /// True when the element came from a self-closing tag. Such elements
    /// never acquire children.
    pub self_closing: bool,
}

impl ElementData {
    /// The qualified tag name (`prefix:local`, or just the local name).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.tag_name),
            None => self.tag_name.clone(),
        }
    }
}

/// A node slot in the arena.
///
/// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
/// "An object that participates in a tree has a parent, which is either
/// null or an object." The parent link is a non-owning back-reference;
/// the `children` vector is the owning, directly-indexable child order.
#[derive(Debug, Clone)]
pub struct Node {
    /// Kind-specific payload.
    pub data: NodeData,
    /// Back-reference to the parent, if attached.
    pub parent: Option<NodeId>,
    /// Ordered child list, owned exclusively by this node.
    pub children: Vec<NodeId>,
    /// Per-event-name listener sets. Cloning a node duplicates the sets
    /// while sharing the listener objects themselves.
    pub listeners: ListenerSet,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            listeners: ListenerSet::default(),
        }
    }
}

/// Failures raised by the mutation API.
///
/// Parsing never produces these: malformed markup degrades permissively.
/// Every failing operation aborts before any structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    /// "If child is non-null and its parent is not parent, then throw a
    /// 'NotFoundError' DOMException."
    #[error("reference node is not a child of the parent")]
    ReferenceNotFound,
    /// [§ 4.9.2](https://dom.spec.whatwg.org/#dom-element-setattributenode)
    /// "InUseAttributeError" — the attribute node belongs to another element.
    #[error("attribute node is already in use by another element")]
    AttributeInUse,
    /// The id does not address a node of this document.
    #[error("node does not belong to this document")]
    NodeNotFound,
    /// The insertion would create a cycle, or the target cannot hold
    /// children (leaf node, or an element built from a self-closing tag).
    #[error("hierarchy violation: target cannot receive this node")]
    HierarchyViolation,
}

/// Arena-based document tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; attribute
/// nodes live in a second vector indexed by [`AttrId`]. `Document::new()`
/// is an explicit per-call factory — there is no process-wide document.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) attrs: Vec<AttrNode>,
    /// Every element ever created through the factories, in creation order.
    /// Used for id lookup. Deliberately never pruned on detachment.
    pub(crate) registry: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document holding only the root Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            attrs: Vec::new(),
            registry: Vec::new(),
        }
    }

    /// The root document node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always holds at least its root node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    // =========================================================================
    // Factories
    // =========================================================================
    //
    // [§ 4.5](https://dom.spec.whatwg.org/#interface-document)
    // Factory methods are the only sanctioned way to create nodes bound to
    // this document.

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// Create a detached element and register it for id lookup.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create_element_ns(None, tag_name)
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createelementns)
    ///
    /// Create a detached element with a namespace prefix.
    pub fn create_element_ns(&mut self, prefix: Option<&str>, tag_name: &str) -> NodeId {
        let id = self.alloc(NodeData::Element(ElementData {
            tag_name: tag_name.to_string(),
            prefix: prefix.map(str::to_string),
            ..ElementData::default()
        }));
        self.registry.push(id);
        id
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeData::Text(data.to_string()))
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeData::Comment(data.to_string()))
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::DocumentFragment)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// The node's kind, if the id is valid.
    #[must_use]
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|node| node.data.kind())
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-nodename)
    ///
    /// `#document`, `#document-fragment`, `#text`, `#comment`, or the
    /// element's qualified tag name.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<String> {
        self.get(id).map(|node| match &node.data {
            NodeData::Document => "#document".to_string(),
            NodeData::DocumentFragment => "#document-fragment".to_string(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
            NodeData::Element(data) => data.qualified_name(),
        })
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|node| match &node.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|node| match &mut node.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get character data if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|node| match &node.data {
            NodeData::Text(data) => Some(data.as_str()),
            _ => None,
        })
    }

    /// Get character data if this node is a comment node.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|node| match &node.data {
            NodeData::Comment(data) => Some(data.as_str()),
            _ => None,
        })
    }

    /// [§ 4.13](https://dom.spec.whatwg.org/#dom-characterdata-data)
    ///
    /// Replace the character data of a Text or Comment node. Other node
    /// kinds are ignored.
    pub fn set_data(&mut self, id: NodeId, data: &str) {
        if let Some(node) = self.get_mut(id) {
            match &mut node.data {
                NodeData::Text(payload) | NodeData::Comment(payload) => {
                    *payload = data.to_string();
                }
                _ => {}
            }
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Get all children of a node, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the next sibling of a node.
    ///
    /// Sibling order is derived from the parent's child list, which is the
    /// single source of truth for ordering.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&sibling| sibling == id)?;
        siblings.get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&sibling| sibling == id)?;
        index.checked_sub(1).and_then(|prev| siblings.get(prev).copied())
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenated data of every descendant text node.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|node| &node.data) {
            Some(NodeData::Text(data)) => out.push_str(data),
            Some(NodeData::Comment(_)) | None => {}
            _ => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// [§ 4.2.6](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// Look up an element by its `id` attribute.
    ///
    /// The lookup consults the registry of every element created by this
    /// document's factories, which is never pruned: a detached element with
    /// a matching id is still returned. Callers that need a live result can
    /// verify with [`Document::parent`].
    #[must_use]
    pub fn get_element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.registry
            .iter()
            .copied()
            .find(|&element| self.get_attribute(element, "id") == Some(id_value))
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-getelementsbytagname)
    ///
    /// Collect descendants of `root` with the given local tag name
    /// (`"*"` matches every element), in document order.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, root: NodeId, tag_name: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_elements(root, &mut |doc, id| {
            let Some(data) = doc.as_element(id) else {
                return;
            };
            if tag_name == "*" || data.tag_name == tag_name {
                out.push(id);
            }
        });
        out
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-getelementsbyclassname)
    ///
    /// Collect descendants of `root` carrying the given class token.
    #[must_use]
    pub fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_elements(root, &mut |doc, id| {
            if doc.has_class(id, class) {
                out.push(id);
            }
        });
        out
    }

    fn walk_elements(&self, root: NodeId, visit: &mut impl FnMut(&Self, NodeId)) {
        for &child in self.children(root) {
            visit(self, child);
            self.walk_elements(child, visit);
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    pub(crate) fn check_node(&self, id: NodeId) -> Result<(), DomError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::NodeNotFound)
        }
    }

    /// A node that may hold children: the document, a fragment, or an
    /// element that did not come from a self-closing tag.
    fn is_container(&self, id: NodeId) -> bool {
        match self.get(id).map(|node| &node.data) {
            Some(NodeData::Document | NodeData::DocumentFragment) => true,
            Some(NodeData::Element(data)) => !data.self_closing,
            _ => false,
        }
    }

    /// Remove `node` from its current parent's child list, if attached.
    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    /// Attach without validation; callers have already checked invariants.
    fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before
    /// null." Detaches `child` from its current parent first; appending a
    /// DocumentFragment splices its children and leaves it empty.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an id outside this document;
    /// [`DomError::HierarchyViolation`] when the insertion would create a
    /// cycle or the parent cannot hold children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.insert_before(parent, child, None)
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Insert `child` into `parent` before `reference`. A `None` reference
    /// appends. All validation happens before any structural change, so a
    /// failed insertion leaves the tree untouched.
    ///
    /// # Errors
    ///
    /// [`DomError::ReferenceNotFound`] when `reference` is not a current
    /// child of `parent`; [`DomError::NodeNotFound`] /
    /// [`DomError::HierarchyViolation`] as for [`Document::append_child`].
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId, DomError> {
        self.check_node(parent)?;
        self.check_node(child)?;
        if !self.is_container(parent) || child == parent || self.is_descendant_of(parent, child) {
            return Err(DomError::HierarchyViolation);
        }
        let mut reference = reference;
        if let Some(reference_id) = reference {
            if !self.children(parent).contains(&reference_id) {
                return Err(DomError::ReferenceNotFound);
            }
            // "If child is node, set child to node's next sibling."
            if reference_id == child {
                reference = self.next_sibling(child);
            }
        }

        if matches!(self.nodes[child.0].data, NodeData::DocumentFragment) {
            // Splice the fragment's children in place and leave it empty.
            let moved = std::mem::take(&mut self.nodes[child.0].children);
            let mut index = self.insertion_index(parent, reference);
            for node in moved {
                self.attach_at(parent, node, index);
                index += 1;
            }
            return Ok(child);
        }

        // Any insertion first detaches the node from its current parent.
        self.detach(child);
        let index = self.insertion_index(parent, reference);
        self.attach_at(parent, child, index);
        Ok(child)
    }

    fn insertion_index(&self, parent: NodeId, reference: Option<NodeId>) -> usize {
        reference
            .and_then(|reference_id| {
                self.children(parent)
                    .iter()
                    .position(|&child| child == reference_id)
            })
            .unwrap_or_else(|| self.children(parent).len())
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-removechild)
    ///
    /// Detach `child` from `parent` and return it. Only the parent link is
    /// broken; the node and its subtree stay alive in the arena.
    ///
    /// # Errors
    ///
    /// [`DomError::ReferenceNotFound`] when `child` is not a current child
    /// of `parent`; [`DomError::NodeNotFound`] for a foreign id.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.check_node(parent)?;
        self.check_node(child)?;
        if !self.children(parent).contains(&child) {
            return Err(DomError::ReferenceNotFound);
        }
        self.detach(child);
        Ok(child)
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-replacechild)
    ///
    /// Replace `old` with `new` inside `parent`, returning `old`.
    ///
    /// # Errors
    ///
    /// As for [`Document::insert_before`]; nothing changes on failure.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<NodeId, DomError> {
        self.check_node(new)?;
        if !self.children(parent).contains(&old) {
            self.check_node(parent)?;
            self.check_node(old)?;
            return Err(DomError::ReferenceNotFound);
        }
        if new == old {
            return Ok(old);
        }
        let _ = self.insert_before(parent, new, Some(old))?;
        self.detach(old);
        Ok(old)
    }

    // =========================================================================
    // Cloning
    // =========================================================================

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-clonenode)
    ///
    /// Clone a node. The shallow clone duplicates identity fields per kind;
    /// element clones re-instantiate every attribute node bound to the new
    /// owner (values copied, never shared). Listener sets are duplicated
    /// while the listener objects themselves stay shared. A deep clone
    /// recurses into children and reparents each clone.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an id outside this document.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        self.check_node(id)?;
        let clone = self.clone_shallow(id);
        if deep {
            let children = self.nodes[id.0].children.clone();
            for child in children {
                let child_clone = self.clone_node(child, true)?;
                let index = self.nodes[clone.0].children.len();
                self.attach_at(clone, child_clone, index);
            }
        }
        Ok(clone)
    }

    /// Explicit per-variant shallow clone dispatch.
    fn clone_shallow(&mut self, id: NodeId) -> NodeId {
        let listeners = self.nodes[id.0].listeners.clone();
        // Snapshot the payload first; allocation needs the arena mutably.
        let data = self.nodes[id.0].data.clone();
        let clone = match data {
            NodeData::Document => self.alloc(NodeData::Document),
            NodeData::DocumentFragment => self.alloc(NodeData::DocumentFragment),
            NodeData::Text(text) => self.alloc(NodeData::Text(text)),
            NodeData::Comment(comment) => self.alloc(NodeData::Comment(comment)),
            NodeData::Element(data) => {
                let clone = self.create_element_ns(data.prefix.as_deref(), &data.tag_name);
                for attr_id in data.attributes {
                    let (name, value) = {
                        let attr = &self.attrs[attr_id.0];
                        (attr.name.clone(), attr.value.clone())
                    };
                    self.set_attribute(clone, &name, &value);
                }
                for (namespace, attr_ids) in data.ns_attributes {
                    for attr_id in attr_ids {
                        let (name, value) = {
                            let attr = &self.attrs[attr_id.0];
                            (attr.name.clone(), attr.value.clone())
                        };
                        self.set_attribute_ns(clone, &namespace, &name, &value);
                    }
                }
                if let Some(element) = self.as_element_mut(clone) {
                    element.style = data.style;
                    element.self_closing = data.self_closing;
                }
                clone
            }
        };
        self.nodes[clone.0].listeners = listeners;
        clone
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// [Selectors Level 4 § 4.1](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// First element under `root` matching the selector, in document order.
    #[must_use]
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all(root, selector).into_iter().next()
    }

    /// All elements under `root` matching the selector, in document order.
    ///
    /// The selector's whitespace-separated steps scope sequentially: each
    /// step searches the descendants of the previous step's matches. This is
    /// a deliberate simplification of CSS combinator semantics.
    #[must_use]
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let steps = parse_selector(selector);
        if steps.is_empty() {
            return Vec::new();
        }
        let mut scope = vec![root];
        for step in &steps {
            let mut matched = Vec::new();
            let mut seen = HashSet::new();
            for &scope_root in &scope {
                self.walk_elements(scope_root, &mut |doc, id| {
                    if doc.as_element(id).is_some()
                        && step.matches(doc, id)
                        && seen.insert(id)
                    {
                        matched.push(id);
                    }
                });
            }
            scope = matched;
        }
        scope
    }
}
