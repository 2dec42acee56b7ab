use serde::Serialize;

/// One tagged section of a parsed document.
///
/// `content` is the node's own text: what precedes its first child tag and
/// what follows its last one, joined by a blank line. Text between sibling
/// children belongs to no node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNode {
    pub tag_name: String,
    /// Display form of `tag_name`, e.g. `"Order Retrieval Process"`.
    pub label: String,
    pub content: String,
    /// Direct children only, in document order.
    pub children: Vec<TagNode>,
}

impl TagNode {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one, at any depth.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Depth-first search for the first node named `tag_name`, including `self`.
    #[must_use]
    pub fn find(&self, tag_name: &str) -> Option<&TagNode> {
        if self.tag_name == tag_name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag_name))
    }
}
