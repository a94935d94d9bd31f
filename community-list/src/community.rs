use serde::{Deserialize, Serialize};

/// A top-level organizational entity of the repository.
///
/// The list component treats communities as opaque list elements, only the
/// in-memory data service looks at `name` to sort them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// The community's uuid.
    pub id: String,
    /// The `dc.title` of the community.
    pub name: String,
    /// The persistent handle, if one has been minted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl Community {
    /// Create a new [`Community`] without a handle.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handle: None,
        }
    }

    /// Attach a persistent handle.
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }
}
