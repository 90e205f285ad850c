// Element - Owned, fully-closed node tree
//
// The natural output of an SGML lowering pass: every tag becomes an
// element, leaf tags carry their text.

use super::OfxNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Aggregate element with no text
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Leaf element (e.g. `<TRNAMT>-42.50`)
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder pattern: append a child
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder pattern: append a leaf child
    pub fn with_leaf(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_child(Element::leaf(name, text))
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }
}

impl OfxNode for Element {
    fn child_text(&self, name: &str) -> String {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.text.clone())
            .unwrap_or_default()
    }

    fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }

    fn children(&self, name: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.name == name).collect()
    }
}
