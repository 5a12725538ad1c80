//! Arena-allocated HTML tree.
//!
//! html5ever builds into this through [`super::tree_sink::DomSink`]. Nodes sit
//! in one vector and link to each other by index, so walking a chapter never
//! touches reference counts.

use html5ever::{LocalName, QualName};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for a missing link.
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// What a node holds.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Class list, split once at creation time.
        classes: Vec<String>,
    },
    Text(String),
    /// Comments and processing instructions. Never read as content.
    Comment(String),
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub(crate) struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node plus its tree links.
#[derive(Debug)]
pub(crate) struct DomNode {
    pub kind: NodeKind,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl DomNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A parsed HTML document.
pub struct HtmlDom {
    nodes: Vec<DomNode>,
    document: NodeId,
}

impl HtmlDom {
    /// Create an empty tree holding only the document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(DomNode::new(NodeKind::Document));
        dom
    }

    fn alloc(&mut self, node: DomNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub(crate) fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let classes = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "class")
            .map(|a| a.value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        self.alloc(DomNode::new(NodeKind::Element {
            name,
            attrs,
            classes,
        }))
    }

    pub(crate) fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(DomNode::new(NodeKind::Text(text)))
    }

    pub(crate) fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(DomNode::new(NodeKind::Comment(text)))
    }

    /// Append `child` as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` directly before `sibling`.
    pub(crate) fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Unlink a node from its parent and siblings. Its own children stay put.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Append text under `parent`, extending a trailing text node if there is one.
    ///
    /// The tokenizer hands text over in pieces; coalescing them here means a
    /// run of characters between two tags is always a single text node.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeKind::Text(existing) = &mut last.kind
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Insert text directly before `sibling`, extending the text node in
    /// front of it if there is one.
    pub(crate) fn insert_text_before(&mut self, sibling: NodeId, text: &str) {
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(NodeId::NONE);

        if let Some(prev_node) = self.get_mut(prev)
            && let NodeKind::Text(existing) = &mut prev_node.kind
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.insert_before(sibling, text_node);
    }

    /// Iterate over the direct children of a node.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children {
            dom: self,
            current: first,
        }
    }

    /// Iterate over every node below `root` in document order (pre-order).
    ///
    /// `root` itself is not yielded.
    pub(crate) fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).collect();
        stack.reverse();
        Descendants { dom: self, stack }
    }

    /// First element with the given tag name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.document)
            .find(|&id| self.is_element_named(id, tag))
    }

    /// All elements with the given tag name, in document order.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.document)
            .filter(|&id| self.is_element_named(id, tag))
            .collect()
    }
}

impl Default for HtmlDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    dom: &'a HtmlDom,
    current: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub(crate) struct Descendants<'a> {
    dom: &'a HtmlDom,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.dom.children(id));
        self.stack[start..].reverse();
        Some(id)
    }
}

// Element accessors
impl HtmlDom {
    /// Local tag name of an element.
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|name| name.as_ref() == tag)
    }

    pub fn element_classes(&self, id: NodeId) -> &[String] {
        self.get(id)
            .and_then(|n| match &n.kind {
                NodeKind::Element { classes, .. } => Some(classes.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Whether the element's class list contains `class` as a whole token.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element_classes(id).iter().any(|c| c == class)
    }

    /// Contents of a text node. `None` for any other kind of node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of every text node below `id`, or the node's own
    /// text if it is a text node.
    pub fn text(&self, id: NodeId) -> String {
        if let Some(text) = self.text_content(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|child| self.text_content(child))
            .collect()
    }
}
