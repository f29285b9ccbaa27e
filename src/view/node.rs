//! Render Tree
//!
//! Declarative description of rendered markup. Event handlers are typed
//! [`Action`] values attached to the element that owns them, so nothing is
//! registered in a shared global namespace. A tree is plain data: rendering
//! the same state twice yields equal trees.

use std::fmt::Write;

use super::action::{Action, Event};

/// Position of an element as child indices from the root
pub type NodePath = Vec<usize>;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node of the render tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes, listeners, and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub listeners: Vec<Listener>,
    pub children: Vec<Node>,
}

/// An event handler bound to one element
#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub event: Event,
    pub action: Action,
}

/// Start building an element
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        listeners: Vec::new(),
        children: Vec::new(),
    }
}

/// A text node
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

impl Element {
    /// Set an attribute, replacing any previous value
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Attach a handler to this element
    pub fn on(mut self, event: Event, action: Action) -> Self {
        self.listeners.push(Listener { event, action });
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(text(content))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|name| name == class))
            .unwrap_or(false)
    }

    /// Target id of an `<a href="#id">` link
    pub fn in_page_target(&self) -> Option<&str> {
        if self.tag != "a" {
            return None;
        }
        self.get_attr("href")
            .and_then(|href| href.strip_prefix('#'))
            .filter(|target| !target.is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::Text(content.to_string())
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::Text(content)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Visit every element depth-first with its path from this node
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&[usize], &Element),
    {
        let mut path = Vec::new();
        self.visit_at(&mut path, f);
    }

    fn visit_at<F>(&self, path: &mut Vec<usize>, f: &mut F)
    where
        F: FnMut(&[usize], &Element),
    {
        if let Node::Element(element) = self {
            f(path, element);
            for (index, child) in element.children.iter().enumerate() {
                path.push(index);
                child.visit_at(path, f);
                path.pop();
            }
        }
    }

    /// All elements, depth-first
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_elements(&mut found);
        found
    }

    fn collect_elements<'a>(&'a self, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            found.push(element);
            for child in &element.children {
                child.collect_elements(found);
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements()
            .into_iter()
            .find(|e| e.get_attr("id") == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// Links pointing at an element on the same page
    pub fn in_page_anchors(&self) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|e| e.in_page_target().is_some())
            .collect()
    }

    /// Every listener in the tree, in document order
    pub fn listeners(&self) -> Vec<&Listener> {
        self.elements()
            .into_iter()
            .flat_map(|e| e.listeners.iter())
            .collect()
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Serialize to HTML. Listeners become `data-on-<event>` attributes
    /// holding the action key.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(&escape(content)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                for listener in &element.listeners {
                    let _ = write!(
                        out,
                        " data-on-{}=\"{}\"",
                        listener.event,
                        escape(&listener.action.to_string())
                    );
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::action::Nav;

    #[test]
    fn test_html_serialization() {
        let tree: Node = el("div")
            .class("card")
            .child(el("h3").text("Tom & Jerry <3"))
            .child(el("input").attr("type", "email"))
            .into();

        assert_eq!(
            tree.to_html(),
            r#"<div class="card"><h3>Tom &amp; Jerry &lt;3</h3><input type="email"></div>"#
        );
    }

    #[test]
    fn test_listener_serialization() {
        let tree: Node = el("button")
            .on(Event::Click, Action::Navigate(Nav::Login))
            .text("Sign In")
            .into();

        assert_eq!(
            tree.to_html(),
            r#"<button data-on-click="navigate:login">Sign In</button>"#
        );
    }

    #[test]
    fn test_attr_replaces_existing() {
        let element = el("a").attr("href", "#a").attr("href", "#b");
        assert_eq!(element.attrs.len(), 1);
        assert_eq!(element.get_attr("href"), Some("#b"));
    }

    #[test]
    fn test_in_page_anchors() {
        let tree: Node = el("nav")
            .child(el("a").attr("href", "#pricing").text("Pricing"))
            .child(el("a").attr("href", "#").text("Top"))
            .child(el("a").attr("href", "https://example.com").text("Out"))
            .child(el("div").attr("href", "#features"))
            .into();

        let targets: Vec<&str> = tree
            .in_page_anchors()
            .into_iter()
            .filter_map(Element::in_page_target)
            .collect();
        assert_eq!(targets, vec!["pricing"]);
    }

    #[test]
    fn test_queries() {
        let tree: Node = el("section")
            .child(el("p").id("first").class("fade-in-up lead").text("one"))
            .child(el("div").child(el("p").class("fade-in-up").text("two")))
            .into();

        assert_eq!(tree.find_by_id("first").map(|e| e.tag), Some("p"));
        assert_eq!(tree.find_by_class("fade-in-up").len(), 2);
        assert_eq!(tree.text_content(), "onetwo");

        let mut paths = Vec::new();
        tree.visit(&mut |path, element| {
            if element.tag == "p" {
                paths.push(path.to_vec());
            }
        });
        assert_eq!(paths, vec![vec![0], vec![1, 0]]);
    }
}
