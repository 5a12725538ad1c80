//! html5ever `TreeSink` that builds an [`HtmlDom`].

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Attribute, HtmlDom, NodeId, NodeKind};

/// Handle html5ever uses to refer to nodes while building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub NodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(NodeId::NONE)
    }
}

/// Sink that collects the parse into an arena.
///
/// `TreeSink` methods take `&self`, so the tree sits behind a `RefCell`.
pub struct DomSink {
    dom: RefCell<HtmlDom>,
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(HtmlDom::new()),
        }
    }

    pub fn into_dom(self) -> HtmlDom {
        self.dom.into_inner()
    }

    fn convert_attrs(attrs: Vec<Html5Attribute>) -> Vec<Attribute> {
        attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect()
    }

    fn append_to(dom: &mut HtmlDom, parent: NodeId, child: NodeOrText<NodeHandle>) {
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }

    fn insert_before(dom: &mut HtmlDom, sibling: NodeId, child: NodeOrText<NodeHandle>) {
        match child {
            NodeOrText::AppendNode(node) => dom.insert_before(sibling, node.0),
            NodeOrText::AppendText(text) => dom.insert_text_before(sibling, &text),
        }
    }
}

impl TreeSink for DomSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // Chapter exports are rarely valid HTML; keep going like a browser.
        tracing::trace!(%msg, "html parse error");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.kind) {
            Some(NodeKind::Element { name, .. }) => {
                // SAFETY: nodes are never freed or moved out of the arena while
                // the sink is alive, and an element's QualName is never
                // rewritten. The RefCell guard hides that from the borrow
                // checker, so the lifetime is widened to that of `self`.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = Self::convert_attrs(attrs);
        NodeHandle(self.dom.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        Self::append_to(&mut self.dom.borrow_mut(), parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        // Foster parenting: content goes right in front of the table when it
        // is attached, otherwise into the element below it on the stack.
        let mut dom = self.dom.borrow_mut();
        let attached = dom.get(element.0).is_some_and(|n| n.parent.is_some());
        if attached {
            Self::insert_before(&mut dom, element.0, child);
        } else {
            Self::append_to(&mut dom, prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // The doctype carries nothing the extractor looks at.
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        Self::insert_before(&mut self.dom.borrow_mut(), sibling.0, new_node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        if let Some(node) = dom.get_mut(target.0)
            && let NodeKind::Element {
                attrs: existing, ..
            } = &mut node.kind
        {
            for attr in Self::convert_attrs(attrs) {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(node.0).collect();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.0, child);
        }
    }
}
