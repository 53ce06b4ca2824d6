//! FluidDB tags.

use serde::Deserialize;
use serde_json::json;

use fluiddb_core::{Method, Result, name_from_path, query_args};

use crate::connector::Connector;
use crate::resource::{Lazy, Resource, TAGS, parse_json, status};

#[derive(Debug, Deserialize)]
struct TagInfo {
    id: String,
    description: Option<String>,
    #[serde(default)]
    indexed: bool,
}

/// A tag definition below `/tags`, e.g. `alice/rating`.
#[derive(Debug, Clone)]
pub struct Tag<'c> {
    resource: Resource<'c>,
    name: String,
    description: Lazy<String>,
    indexed: Lazy<bool>,
}

impl<'c> Tag<'c> {
    /// Reference the tag at `path` without fetching it.
    pub fn new(connector: &'c Connector, id: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let name = name_from_path(&path)?;
        Ok(Self {
            resource: Resource::new(connector, id, TAGS, path),
            name,
            description: Lazy::Unfetched,
            indexed: Lazy::Unfetched,
        })
    }

    /// A tag whose fields are already known, e.g. right after creation.
    pub fn with_fields(
        connector: &'c Connector,
        id: impl Into<String>,
        indexed: bool,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self> {
        let mut tag = Self::new(connector, id, path)?;
        tag.indexed.set(indexed);
        tag.description.set(description.into());
        Ok(tag)
    }

    /// Server-assigned id; empty until fetched.
    pub fn id(&self) -> &str {
        self.resource.id()
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path, e.g. `/tags/alice/rating`.
    pub fn path(&self) -> String {
        self.resource.path()
    }

    /// Path below `/tags`; this is what objects are tagged with.
    pub fn tag_path(&self) -> &str {
        self.resource.relative_path()
    }

    /// Fetch id, description and the indexed flag.
    pub async fn get_item(&mut self) -> Result<()> {
        let args = query_args(&[("returnDescription", "True")]);
        let response = self.resource.call(Method::Get, status::OK, None, &args).await?;
        let info: TagInfo = parse_json(&response)?;
        self.resource.set_id(info.id);
        self.description.set(info.description.unwrap_or_default());
        self.indexed.set(info.indexed);
        Ok(())
    }

    /// The description, fetched on first access.
    pub async fn description(&mut self) -> Result<&str> {
        if !self.description.is_fetched() {
            self.get_item().await?;
        }
        self.description.require("description").map(String::as_str)
    }

    /// Whether the tag's values are indexed, fetched on first access.
    pub async fn is_indexed(&mut self) -> Result<bool> {
        if !self.indexed.is_fetched() {
            self.get_item().await?;
        }
        self.indexed.require("indexed").copied()
    }

    /// Replace the description on the server and in the cache.
    pub async fn set_description(&mut self, description: &str) -> Result<()> {
        let body = json!({ "description": description }).to_string();
        self.resource
            .call(Method::Put, status::NO_CONTENT, Some(&body), &Default::default())
            .await?;
        self.description.set(description.to_string());
        Ok(())
    }

    /// Delete the tag definition, and with it every value stored under it.
    pub async fn delete(&self) -> Result<()> {
        self.resource
            .call(Method::Delete, status::NO_CONTENT, None, &Default::default())
            .await?;
        Ok(())
    }
}
