//! Views.

use serde::{Deserialize, Serialize};

/// A view: its defining query as native SQL text plus the exposed
/// column names in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// View name.
    pub name: String,
    /// Defining query text, as stored by the backend.
    pub definition: Option<String>,
    /// Exposed columns in ordinal order.
    pub columns: Vec<String>,
}

impl View {
    /// Creates a view with no columns yet.
    #[must_use]
    pub fn new(name: impl Into<String>, definition: Option<String>) -> Self {
        Self {
            name: name.into(),
            definition,
            columns: Vec::new(),
        }
    }
}
