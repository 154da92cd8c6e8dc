//! Attribute storage and attribute-node operations.
//!
//! [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
//!
//! Attribute nodes live in the document's attribute arena, addressed by
//! [`AttrId`]. An element's attribute lists store ids into that arena, so
//! the value has one storage location: writing through the node is visible
//! through the owner's lookup, and the owner's lookup hands back the same
//! node. Lists are plain ordered vectors searched by name; elements carry
//! few attributes and insertion order is part of the observable contract.

use crate::{AttrId, DomError, Document, NodeId, NodeKind};

/// An attribute node.
///
/// "Attr nodes are simply known as attributes. They are sometimes referred
/// to as content attributes..."
#[derive(Debug, Clone)]
pub struct AttrNode {
    /// The attribute's name.
    pub name: String,
    /// Namespace URI, for attributes set through the `*_ns` operations.
    pub namespace: Option<String>,
    /// The attribute's value.
    pub value: String,
    /// Non-owning back-reference to the owning element, if attached.
    pub owner: Option<NodeId>,
}

impl AttrNode {
    /// Attribute nodes always report the same kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        NodeKind::Attribute
    }
}

impl Document {
    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createattribute)
    ///
    /// Create a detached attribute node with an empty value.
    pub fn create_attribute(&mut self, name: &str) -> AttrId {
        self.alloc_attr(AttrNode {
            name: name.to_string(),
            namespace: None,
            value: String::new(),
            owner: None,
        })
    }

    pub(crate) fn alloc_attr(&mut self, attr: AttrNode) -> AttrId {
        let id = AttrId(self.attrs.len());
        self.attrs.push(attr);
        id
    }

    /// Get an attribute node by id.
    #[must_use]
    pub fn attribute(&self, id: AttrId) -> Option<&AttrNode> {
        self.attrs.get(id.0)
    }

    /// Set an attribute node's value. The owning element's lookup sees the
    /// new value immediately; there is no second copy to update.
    pub fn set_attribute_value(&mut self, id: AttrId, value: &str) {
        if let Some(attr) = self.attrs.get_mut(id.0) {
            attr.value = value.to_string();
        }
    }

    /// Find the default-namespace attribute id with the given name.
    #[must_use]
    pub fn get_attribute_node(&self, element: NodeId, name: &str) -> Option<AttrId> {
        self.as_element(element)?
            .attributes
            .iter()
            .copied()
            .find(|&attr_id| self.attrs[attr_id.0].name == name)
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// Look up a default-namespace attribute value by name.
    #[must_use]
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        let attr_id = self.get_attribute_node(element, name)?;
        Some(self.attrs[attr_id.0].value.as_str())
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Set a default-namespace attribute, updating the existing node in
    /// place or appending a new one. Non-element targets are ignored.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) {
        if let Some(attr_id) = self.get_attribute_node(element, name) {
            self.attrs[attr_id.0].value = value.to_string();
            return;
        }
        if self.as_element(element).is_none() {
            return;
        }
        let attr_id = self.alloc_attr(AttrNode {
            name: name.to_string(),
            namespace: None,
            value: value.to_string(),
            owner: Some(element),
        });
        if let Some(data) = self.as_element_mut(element) {
            data.attributes.push(attr_id);
        }
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute_node(element, name).is_some()
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// Remove a default-namespace attribute by name, detaching its node.
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) {
        let Some(attr_id) = self.get_attribute_node(element, name) else {
            return;
        };
        if let Some(data) = self.as_element_mut(element) {
            data.attributes.retain(|&id| id != attr_id);
        }
        self.attrs[attr_id.0].owner = None;
    }

    /// Ordered default-namespace attribute names of an element.
    #[must_use]
    pub fn attribute_names(&self, element: NodeId) -> Vec<&str> {
        self.as_element(element)
            .map(|data| {
                data.attributes
                    .iter()
                    .map(|&attr_id| self.attrs[attr_id.0].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-setattributenode)
    ///
    /// Attach an attribute node to an element, replacing (and returning)
    /// any existing node of the same name.
    ///
    /// # Errors
    ///
    /// [`DomError::AttributeInUse`] when the node already belongs to a
    /// different element — the node must be removed from its current owner
    /// first. [`DomError::NodeNotFound`] for a foreign id or a non-element
    /// target. Nothing changes on failure.
    pub fn set_attribute_node(
        &mut self,
        element: NodeId,
        attr: AttrId,
    ) -> Result<Option<AttrId>, DomError> {
        if self.as_element(element).is_none() || attr.0 >= self.attrs.len() {
            return Err(DomError::NodeNotFound);
        }
        match self.attrs[attr.0].owner {
            Some(owner) if owner != element => return Err(DomError::AttributeInUse),
            _ => {}
        }
        let name = self.attrs[attr.0].name.clone();
        let existing = self.get_attribute_node(element, &name);
        if existing == Some(attr) {
            return Ok(None);
        }
        if let Some(old) = existing {
            self.attrs[old.0].owner = None;
            if let Some(data) = self.as_element_mut(element) {
                if let Some(slot) = data.attributes.iter_mut().find(|id| **id == old) {
                    *slot = attr;
                }
            }
        } else if let Some(data) = self.as_element_mut(element) {
            data.attributes.push(attr);
        }
        self.attrs[attr.0].owner = Some(element);
        Ok(existing)
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-removeattributenode)
    ///
    /// Detach an attribute node from its owning element and return it.
    ///
    /// # Errors
    ///
    /// [`DomError::ReferenceNotFound`] when the node is not currently
    /// attached to this element.
    pub fn remove_attribute_node(
        &mut self,
        element: NodeId,
        attr: AttrId,
    ) -> Result<AttrId, DomError> {
        let attached = self
            .as_element(element)
            .is_some_and(|data| data.attributes.contains(&attr));
        if !attached {
            return Err(DomError::ReferenceNotFound);
        }
        if let Some(data) = self.as_element_mut(element) {
            data.attributes.retain(|&id| id != attr);
        }
        self.attrs[attr.0].owner = None;
        Ok(attr)
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-getattributens)
    ///
    /// Look up an attribute value in a specific namespace URI.
    #[must_use]
    pub fn get_attribute_ns(&self, element: NodeId, namespace: &str, name: &str) -> Option<&str> {
        let data = self.as_element(element)?;
        let (_, attr_ids) = data
            .ns_attributes
            .iter()
            .find(|(uri, _)| uri == namespace)?;
        attr_ids
            .iter()
            .copied()
            .find(|&attr_id| self.attrs[attr_id.0].name == name)
            .map(|attr_id| self.attrs[attr_id.0].value.as_str())
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-setattributens)
    ///
    /// Set an attribute in a specific namespace URI, updating in place or
    /// appending to that namespace's ordered list.
    pub fn set_attribute_ns(&mut self, element: NodeId, namespace: &str, name: &str, value: &str) {
        let existing = self.as_element(element).and_then(|data| {
            data.ns_attributes
                .iter()
                .find(|(uri, _)| uri == namespace)
                .and_then(|(_, attr_ids)| {
                    attr_ids
                        .iter()
                        .copied()
                        .find(|&attr_id| self.attrs[attr_id.0].name == name)
                })
        });
        if let Some(attr_id) = existing {
            self.attrs[attr_id.0].value = value.to_string();
            return;
        }
        if self.as_element(element).is_none() {
            return;
        }
        let attr_id = self.alloc_attr(AttrNode {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            value: value.to_string(),
            owner: Some(element),
        });
        if let Some(data) = self.as_element_mut(element) {
            if let Some((_, attr_ids)) = data
                .ns_attributes
                .iter_mut()
                .find(|(uri, _)| uri == namespace)
            {
                attr_ids.push(attr_id);
            } else {
                data.ns_attributes
                    .push((namespace.to_string(), vec![attr_id]));
            }
        }
    }

    /// Explicit accessor for `data-*` attributes: `get_data_attribute("x")`
    /// reads the `data-x` attribute. Replaces the original design's
    /// reflective any-property interception with a defined capability.
    #[must_use]
    pub fn get_data_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get_attribute(element, &format!("data-{name}"))
    }
}
