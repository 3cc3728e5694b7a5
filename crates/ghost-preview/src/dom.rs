//! Parses span markup back into a traversable node tree.
//!
//! Purely structural: tag names, `class`/`style` attribute values, text
//! content, and document order are preserved verbatim. Keeping the tree
//! owned makes the renderer independent of any particular parser or host
//! environment.

use std::fmt;

/// One node of parsed markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderNode {
    Text(String),
    Element {
        tag: String,
        class: String,
        style: String,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    /// Concatenated text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            RenderNode::Text(text) => out.push_str(text),
            RenderNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn has_class(&self, token: &str) -> bool {
        match self {
            RenderNode::Text(_) => false,
            RenderNode::Element { class, .. } => class.split_whitespace().any(|t| t == token),
        }
    }

    /// Descendant elements carrying `token` as a class, in document order.
    pub fn elements_with_class<'a>(&'a self, token: &str) -> Vec<&'a RenderNode> {
        let mut out = Vec::new();
        self.collect_elements_with_class(token, &mut out);
        out
    }

    fn collect_elements_with_class<'a>(&'a self, token: &str, out: &mut Vec<&'a RenderNode>) {
        if self.has_class(token) {
            out.push(self);
        }
        if let RenderNode::Element { children, .. } = self {
            for child in children {
                child.collect_elements_with_class(token, out);
            }
        }
    }
}

/// Error raised when markup cannot be parsed into a tree.
#[derive(Debug)]
pub enum RenderError {
    Markup(roxmltree::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Markup(err) => write!(f, "malformed markup: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Markup(err) => Some(err),
        }
    }
}

/// Parses markup into an owned [`RenderNode`] tree rooted at its single
/// top-level element.
pub fn parse(markup: &str) -> Result<RenderNode, RenderError> {
    let doc = roxmltree::Document::parse(markup).map_err(RenderError::Markup)?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> RenderNode {
    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert(child));
        } else if child.is_text()
            && let Some(text) = child.text()
        {
            children.push(RenderNode::Text(text.to_string()));
        }
    }

    RenderNode::Element {
        tag: node.tag_name().name().to_string(),
        class: node.attribute("class").unwrap_or_default().to_string(),
        style: node.attribute("style").unwrap_or_default().to_string(),
        children,
    }
}
