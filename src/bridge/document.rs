//! The page regions the bridge writes to.
//!
//! All DOM access goes through [`Document`], so everything upstream of it
//! stays testable without a browser.

use std::collections::HashMap;

/// Writable view of the page, addressed by element id.
pub trait Document {
    /// Replace the contents of element `id`. Returns false if it does not exist.
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    /// Remove element `id`. Returns false if it does not exist.
    fn remove_element(&mut self, id: &str) -> bool;

    /// Reset the fields of form `id`. Returns false if it does not exist.
    fn reset_form(&mut self, id: &str) -> bool;
}

/// Headless document: named top-level containers holding markup.
///
/// Elements rendered inside a container are located by their `id="..."`
/// attribute and can be rewritten or removed like real nodes. Good enough
/// for the well-formed fragments this crate renders; not an HTML parser.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    containers: HashMap<String, String>,
    resets: Vec<String>,
}

/// Byte offsets of an element inside a container's markup.
struct Span {
    outer_start: usize,
    inner_start: usize,
    inner_end: usize,
    outer_end: usize,
}

fn find_element(html: &str, id: &str) -> Option<Span> {
    let attr = html.find(&format!(r#"id="{}""#, id))?;
    let outer_start = html[..attr].rfind('<')?;
    let tag: String = html[outer_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    let inner_start = attr + html[attr..].find('>')? + 1;

    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut depth = 0usize;
    let mut cursor = inner_start;
    loop {
        let rest = &html[cursor..];
        let next_close = rest.find(&close)?;
        match rest.find(&open).filter(|&o| o < next_close) {
            Some(o) => {
                depth += 1;
                cursor += o + open.len();
            }
            None if depth == 0 => {
                let inner_end = cursor + next_close;
                return Some(Span {
                    outer_start,
                    inner_start,
                    inner_end,
                    outer_end: inner_end + close.len(),
                });
            }
            None => {
                depth -= 1;
                cursor += next_close + close.len();
            }
        }
    }
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: register an empty top-level container.
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.containers.insert(id.into(), String::new());
        self
    }

    /// Contents of element `id`, whether a container or nested inside one.
    pub fn inner_html(&self, id: &str) -> Option<String> {
        if let Some(html) = self.containers.get(id) {
            return Some(html.clone());
        }
        self.containers.values().find_map(|html| {
            find_element(html, id).map(|span| html[span.inner_start..span.inner_end].to_string())
        })
    }

    /// True if element `id` exists anywhere in the document.
    pub fn contains(&self, id: &str) -> bool {
        self.inner_html(id).is_some()
    }

    /// Form ids that have been reset, in order.
    pub fn resets(&self) -> &[String] {
        &self.resets
    }

    fn locate(&self, id: &str) -> Option<(String, Span)> {
        self.containers
            .iter()
            .find_map(|(name, html)| find_element(html, id).map(|span| (name.clone(), span)))
    }
}

impl Document for InMemoryDocument {
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        if let Some(container) = self.containers.get_mut(id) {
            *container = html.to_string();
            return true;
        }
        match self.locate(id) {
            Some((name, span)) => {
                if let Some(container) = self.containers.get_mut(&name) {
                    container.replace_range(span.inner_start..span.inner_end, html);
                }
                true
            }
            None => false,
        }
    }

    fn remove_element(&mut self, id: &str) -> bool {
        if self.containers.remove(id).is_some() {
            return true;
        }
        match self.locate(id) {
            Some((name, span)) => {
                if let Some(container) = self.containers.get_mut(&name) {
                    container.replace_range(span.outer_start..span.outer_end, "");
                }
                true
            }
            None => false,
        }
    }

    fn reset_form(&mut self, id: &str) -> bool {
        self.resets.push(id.to_string());
        true
    }
}
