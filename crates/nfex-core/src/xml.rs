//! Namespace-aware XML document model.
//!
//! NF-e field extraction only needs element names, their resolved
//! namespaces, text content and nesting, so documents are reduced to a
//! small owned tree instead of streaming events at the callers.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::XmlError;

/// A parsed XML document.
#[derive(Debug)]
pub struct XmlDocument {
    root: Element,
}

#[derive(Debug)]
struct Element {
    name: String,
    namespace: Option<String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn matches(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }
}

impl XmlDocument {
    /// Parse XML text into a document tree.
    ///
    /// Fails on reader errors, mismatched or unclosed elements, and input
    /// without a root element (e.g. a plain text file).
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = NsReader::from_str(text);
        let config = reader.config_mut();
        config.trim_text_start = true;
        config.trim_text_end = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_resolved_event() {
                Ok((ns, Event::Start(e))) => {
                    stack.push(element_from(e.local_name().as_ref(), ns));
                }
                Ok((ns, Event::Empty(e))) => {
                    let element = element_from(e.local_name().as_ref(), ns);
                    attach(&mut stack, &mut root, element)?;
                }
                Ok((_, Event::Text(t))) => {
                    if let Some(open) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| XmlError::Syntax(e.to_string()))?;
                        open.text.push_str(&text);
                    }
                }
                Ok((_, Event::CData(t))) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Ok((_, Event::End(_))) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Syntax("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok((_, Event::Eof)) => break,
                Ok(_) => {}
                Err(e) => return Err(XmlError::Syntax(e.to_string())),
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Unclosed(open.name.clone()));
        }
        root.map(|root| Self { root }).ok_or(XmlError::NoRoot)
    }

    /// Find the first element matching `path` under `namespace` and return
    /// its trimmed text.
    ///
    /// The first path segment may sit at any depth below the root; the
    /// remaining segments must follow as nested children. Elements are
    /// visited in document order. Absent elements and empty or
    /// whitespace-only text both yield `None`.
    pub fn first_text(&self, namespace: &str, path: &[&str]) -> Option<&str> {
        let (first, rest) = path.split_first()?;
        let element = find_descendant(&self.root, namespace, first, rest)?;
        let text = element.text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn element_from(local_name: &[u8], ns: ResolveResult<'_>) -> Element {
    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    };
    Element {
        name: String::from_utf8_lossy(local_name).into_owned(),
        namespace,
        text: String::new(),
        children: Vec::new(),
    }
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(XmlError::Syntax("multiple root elements".into()));
    }
    Ok(())
}

/// Document-order search for `name` at any depth, then `rest` as a nested
/// child chain.
fn find_descendant<'a>(
    element: &'a Element,
    namespace: &str,
    name: &str,
    rest: &[&str],
) -> Option<&'a Element> {
    for child in &element.children {
        if child.matches(namespace, name) {
            if let Some(found) = find_children(child, namespace, rest) {
                return Some(found);
            }
        }
        if let Some(found) = find_descendant(child, namespace, name, rest) {
            return Some(found);
        }
    }
    None
}

fn find_children<'a>(element: &'a Element, namespace: &str, path: &[&str]) -> Option<&'a Element> {
    let Some((first, rest)) = path.split_first() else {
        return Some(element);
    };
    element
        .children
        .iter()
        .filter(|child| child.matches(namespace, first))
        .find_map(|child| find_children(child, namespace, rest))
}
