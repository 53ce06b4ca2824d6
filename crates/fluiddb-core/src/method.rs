//! HTTP methods understood by the FluidDB REST API.

use std::fmt;

/// The verbs FluidDB accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Update a resource or set a tag value.
    Put,
    /// Create a resource.
    Post,
    /// Remove a resource or tag value.
    Delete,
    /// Test for existence without transferring a body.
    Head,
}

impl Method {
    /// The upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
