use crate::display::Node;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Anything the handler can write its output into
///
/// The handler only ever replaces the whole content, so this is the single
/// operation a surface must support.
#[cfg_attr(test, mockall::automock)]
pub trait Surface: Send + Sync {
    /// Replace the entire content with `nodes`; an empty vector clears it
    fn replace(&self, nodes: Vec<Node>);
}

/// Shared display region
///
/// Cloning yields another handle to the same region, so every clone
/// observes the latest write. Content is fully replaced on every cycle.
#[derive(Debug, Clone, Default)]
pub struct DisplayRegion {
    nodes: Arc<Mutex<Vec<Node>>>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current content
    pub fn nodes(&self) -> Vec<Node> {
        self.lock().clone()
    }

    /// Concatenated text of all nodes
    pub fn text_content(&self) -> String {
        self.lock().iter().map(Node::text_content).collect()
    }

    /// HTML fragment of the current content
    pub fn to_html(&self) -> String {
        self.lock().iter().map(Node::to_html).collect()
    }

    /// Terminal rendering of the current content
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for node in self.lock().iter() {
            node.write_text(&mut out);
        }
        out
    }
}

impl Surface for DisplayRegion {
    fn replace(&self, nodes: Vec<Node>) {
        *self.lock() = nodes;
    }
}

/// Shared text input the handler reads queries from
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: Arc<Mutex<String>>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn value(&self) -> String {
        self.lock().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.lock() = value.into();
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
