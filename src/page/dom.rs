// src/page/dom.rs
// =============================================================================
// A very small document tree: elements with classes, attributes and
// children, plus text nodes.
//
// This is just enough structure for the result list. Nodes are plain values
// (Clone + PartialEq), which is what lets the tests compare two renders
// directly.
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    // All text below this node, concatenated (like DOM textContent)
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    // Depth-first search for the first element carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        let element = self.as_element()?;
        if element.has_class(class) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find_by_class(class))
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(element) => element.write_html(out),
        }
    }
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    // Adds one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

// Escapes text for use in HTML content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Element::new("a")
            .class("list-item flex-row")
            .attr("href", "./x.html?repo=a/b")
            .child(Element::new("span").child(Node::text("a/b")).into())
            .child(
                Element::new("span")
                    .class("status")
                    .child(Element::new("i").class("icon-danger").into())
                    .child(Node::text("2 issue(s)"))
                    .into(),
            )
            .into()
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), "a/b2 issue(s)");
    }

    #[test]
    fn test_find_by_class() {
        let node = sample();
        assert!(node.find_by_class("icon-danger").is_some());
        assert_eq!(node.find_by_class("status").unwrap().tag, "span");
        assert!(node.find_by_class("missing").is_none());
    }

    #[test]
    fn test_write_html_escapes() {
        let node: Node = Element::new("span")
            .attr("title", "\"quoted\"")
            .child(Node::text("<b>&</b>"))
            .into();
        let mut html = String::new();
        node.write_html(&mut html);
        assert_eq!(html, "<span title=\"&quot;quoted&quot;\">&lt;b&gt;&amp;&lt;/b&gt;</span>");
    }
}
