//! Document content tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute names that give structure to an otherwise opaque content tree
///
/// The packager only relies on these contracts, so any editor schema that
/// tags its metadata parts and references this way can be packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHints {
    /// Attribute naming the metadata role of a top-level part
    pub metadata_attr: String,
    /// Attribute on a top-level part that hides it from readers
    pub hidden_attr: String,
    /// Attribute holding an image id on figure-like nodes
    pub image_attr: String,
    /// Node type of inline citations
    pub citation_node: String,
    /// Attribute on a citation node listing its references
    pub citation_refs_attr: String,
    /// Field of a reference entry holding the bibliography key
    pub citation_key_field: String,
}

impl Default for SchemaHints {
    fn default() -> Self {
        Self {
            metadata_attr: "metadata".to_string(),
            hidden_attr: "hidden".to_string(),
            image_attr: "image".to_string(),
            citation_node: "citation".to_string(),
            citation_refs_attr: "references".to_string(),
            citation_key_field: "id".to_string(),
        }
    }
}

/// Metadata role of the part listing the authors
pub const AUTHORS_ROLE: &str = "authors";

/// Metadata role of the part holding the abstract
pub const ABSTRACT_ROLE: &str = "abstract";

/// A node of the editor's content tree
///
/// Attributes are kept in a sorted map so serializing the same tree twice
/// yields the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Node type name
    #[serde(rename = "type")]
    pub node_type: String,
    /// Node attributes
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
    /// Child nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentNode>>,
    /// Text of a text node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline marks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Value>>,
}

impl ContentNode {
    /// Element node with no attributes
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            attrs: Map::new(),
            content: None,
            text: None,
            marks: None,
        }
    }

    /// Text node
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new("text")
        }
    }

    /// Builder: set an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Builder: set the children
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.content = Some(children);
        self
    }

    /// Children, empty for leaves
    pub fn children(&self) -> &[Self] {
        self.content.as_deref().unwrap_or_default()
    }

    /// String value of an attribute
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Metadata role tag of this node, if any
    pub fn metadata_role(&self, hints: &SchemaHints) -> Option<&str> {
        self.attr_str(&hints.metadata_attr)
    }

    /// Whether the part is hidden from readers
    pub fn is_hidden(&self, hints: &SchemaHints) -> bool {
        self.attrs
            .get(&hints.hidden_attr)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// First top-level part carrying the metadata `role`
    pub fn find_part(&self, role: &str, hints: &SchemaHints) -> Option<&Self> {
        self.children()
            .iter()
            .find(|part| part.metadata_role(hints) == Some(role))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node| {
            if let Some(text) = &node.text {
                out.push_str(text);
            }
        });
        out
    }

    /// Depth-first pre-order traversal
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Empty the content of every top-level part tagged with `role`
    ///
    /// Returns the number of parts emptied.
    pub fn clear_parts(&mut self, role: &str, hints: &SchemaHints) -> usize {
        let Some(parts) = self.content.as_mut() else {
            return 0;
        };
        let mut cleared = 0;
        for part in parts
            .iter_mut()
            .filter(|p| p.attr_str(&hints.metadata_attr) == Some(role))
        {
            part.content = Some(Vec::new());
            cleared += 1;
        }
        cleared
    }
}
