use std::cell::RefCell;

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::animation::props::VisualState;
use crate::animation::{NodeId, Stage};

/// [`Stage`] over the live document. Nodes are registered the first time a
/// selector finds them and keep their id for the life of the stage.
pub struct DomStage {
    document: Document,
    nodes: RefCell<Vec<Element>>,
}

impl DomStage {
    pub fn new(document: Document) -> Self {
        Self { document, nodes: RefCell::new(Vec::new()) }
    }

    pub fn from_window() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }

    /// Register `element` and return its id.
    pub fn adopt(&self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(index) = nodes.iter().position(|known| *known == element) {
            return NodeId(index);
        }
        nodes.push(element);
        NodeId(nodes.len() - 1)
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node).and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }
}

impl Stage for DomStage {
    fn select(&self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!("bad selector `{}`: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.adopt(element))
            .collect()
    }

    fn apply(&self, node: NodeId, state: &VisualState) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        for declaration in state.to_css().split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let _ = style.set_property(property.trim(), value.trim());
        }
    }

    fn reset(&self, node: NodeId) {
        if let Some(element) = self.html(node) {
            let style = element.style();
            let _ = style.remove_property("opacity");
            let _ = style.remove_property("transform");
        }
    }
}
