//! Display node tree
//!
//! A deliberately small element model: just enough structure to express a
//! heading, an ordered run of list entries with an emphasized headline and a
//! body paragraph, and plain text. Nodes render to HTML or to terminal text.

use html_escaper::HtmlEscaper;
use std::fmt::{self, Write as _};

/// `Display` adapter that HTML-escapes the wrapped text
pub(crate) struct Escape<'a>(pub(crate) &'a str);

impl fmt::Display for Escape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        HtmlEscaper(f).write_str(self.0)
    }
}

/// One element of the display region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Bare text
    Text(String),
    /// Section heading (`<h3>`)
    Heading(String),
    /// List container (`<ul>`); children are normally `ListItem`s
    List(Vec<Node>),
    /// List entry (`<li>`)
    ListItem(Vec<Node>),
    /// Emphasized text (`<strong>`)
    Strong(String),
    /// Paragraph (`<p>`)
    Paragraph(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Concatenated text of this node and its descendants, like DOM `textContent`
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text)
            | Node::Heading(text)
            | Node::Strong(text)
            | Node::Paragraph(text) => text.clone(),
            Node::List(children) | Node::ListItem(children) => {
                children.iter().map(Node::text_content).collect()
            }
        }
    }

    /// Direct children of container nodes; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::List(children) | Node::ListItem(children) => children,
            _ => &[],
        }
    }

    /// Serialize as an HTML fragment with all text escaped
    pub fn to_html(&self) -> String {
        Html(self).to_string()
    }

    /// Append a terminal rendering of this node, one or more lines
    pub(crate) fn write_text(&self, out: &mut String) {
        match self {
            Node::Paragraph(text) if text.is_empty() => {}
            Node::Text(text) | Node::Heading(text) | Node::Paragraph(text) | Node::Strong(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Node::List(children) => {
                for child in children {
                    child.write_text(out);
                }
            }
            Node::ListItem(children) => {
                let mut item = String::new();
                for child in children {
                    child.write_text(&mut item);
                }

                for (i, line) in item.lines().enumerate() {
                    if i == 0 {
                        out.push_str("- ");
                    } else if !line.is_empty() {
                        out.push_str("  ");
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }
}

/// HTML view of a node; text is escaped, markup is not
struct Html<'a>(&'a Node);

impl fmt::Display for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Node::Text(text) => write!(f, "{}", Escape(text)),
            Node::Heading(text) => write!(f, "<h3>{}</h3>", Escape(text)),
            Node::Strong(text) => write!(f, "<strong>{}</strong>", Escape(text)),
            Node::Paragraph(text) => write!(f, "<p>{}</p>", Escape(text)),
            Node::List(children) => write_children(f, "ul", children),
            Node::ListItem(children) => write_children(f, "li", children),
        }
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, tag: &str, children: &[Node]) -> fmt::Result {
    write!(f, "<{}>", tag)?;
    for child in children {
        write!(f, "{}", Html(child))?;
    }
    write!(f, "</{}>", tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Node {
        Node::ListItem(vec![
            Node::Strong("Flood Warning".to_string()),
            Node::Paragraph("Heavy rain expected.".to_string()),
        ])
    }

    #[test]
    fn test_text_content_concatenates() {
        assert_eq!(
            sample_item().text_content(),
            "Flood WarningHeavy rain expected."
        );
        assert_eq!(Node::text("plain").text_content(), "plain");
    }

    #[test]
    fn test_to_html_structure() {
        let list = Node::List(vec![sample_item()]);
        assert_eq!(
            list.to_html(),
            "<ul><li><strong>Flood Warning</strong><p>Heavy rain expected.</p></li></ul>"
        );
        assert_eq!(Node::Heading("Alerts".to_string()).to_html(), "<h3>Alerts</h3>");
    }

    #[test]
    fn test_to_html_escapes_text() {
        let node = Node::Paragraph("<script>alert(1)</script> & more".to_string());
        assert_eq!(
            node.to_html(),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</p>"
        );

        let quoted = Node::Strong("Say \"hi\"".to_string()).to_html();
        assert!(quoted.starts_with("<strong>Say "));
        assert!(!quoted.contains('"'));
    }

    #[test]
    fn test_to_html_escapes_nested_text() {
        let list = Node::List(vec![Node::ListItem(vec![
            Node::Strong("A < B".to_string()),
            Node::Paragraph("C & D".to_string()),
        ])]);
        assert_eq!(
            list.to_html(),
            "<ul><li><strong>A &lt; B</strong><p>C &amp; D</p></li></ul>"
        );
    }

    #[test]
    fn test_write_text_indents_item_body() {
        let item = Node::ListItem(vec![
            Node::Strong("Heat Advisory".to_string()),
            Node::Paragraph("Line one\nLine two".to_string()),
        ]);

        let mut out = String::new();
        item.write_text(&mut out);
        assert_eq!(out, "- Heat Advisory\n  Line one\n  Line two\n");
    }

    #[test]
    fn test_children() {
        let list = Node::List(vec![sample_item(), sample_item()]);
        assert_eq!(list.children().len(), 2);
        assert!(Node::text("leaf").children().is_empty());
    }
}
