// 🌳 Tree Accessor - Read-only capability over a lowered OFX tree
//
// The builder never sees raw OFX bytes. Whatever turns the SGML into a
// tree only has to implement `OfxNode` for its node type.

pub mod element;
pub mod json;

pub use element::Element;

/// Read access to one node of an already-lowered OFX document
///
/// Expression Problem Coverage:
/// - New tree representation: implement this trait → builder untouched ✓
/// - Only child lookups: no parent/sibling navigation, no mutation
pub trait OfxNode {
    /// Text of the named direct child, empty if the child is absent
    fn child_text(&self, name: &str) -> String;

    /// Whether the named direct child exists
    fn has_child(&self, name: &str) -> bool;

    /// All direct children with this name, in document order
    fn children(&self, name: &str) -> Vec<&Self>;

    /// First direct child with this name
    fn child(&self, name: &str) -> Option<&Self> {
        self.children(name).into_iter().next()
    }
}
