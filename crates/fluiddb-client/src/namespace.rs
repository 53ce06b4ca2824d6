//! FluidDB namespaces.
//!
//! Namespaces organize names hierarchically: tag names and the names of
//! sub-namespaces. Every user gets a top-level namespace named after them.

use serde::Deserialize;
use serde_json::json;

use fluiddb_core::{Method, Result, name_from_path, query_args, uri_join};

use crate::connector::Connector;
use crate::resource::{Created, Lazy, NAMESPACES, Resource, TAGS, parse_json, status};
use crate::tag::Tag;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamespaceInfo {
    id: String,
    description: Option<String>,
    namespace_names: Option<Vec<String>>,
    tag_names: Option<Vec<String>>,
}

/// A namespace below `/namespaces`.
#[derive(Debug, Clone)]
pub struct Namespace<'c> {
    resource: Resource<'c>,
    name: String,
    description: Lazy<String>,
    namespace_names: Lazy<Vec<String>>,
    tag_names: Lazy<Vec<String>>,
}

impl<'c> Namespace<'c> {
    /// Reference the namespace at `path` (e.g. `alice/books`).
    ///
    /// Nothing is fetched; `id` may be empty. Fails when no name can be
    /// taken from `path`.
    pub fn new(connector: &'c Connector, id: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let name = name_from_path(&path)?;
        Ok(Self {
            resource: Resource::new(connector, id, NAMESPACES, path),
            name,
            description: Lazy::Unfetched,
            namespace_names: Lazy::Unfetched,
            tag_names: Lazy::Unfetched,
        })
    }

    /// Server-assigned id; empty until fetched.
    pub fn id(&self) -> &str {
        self.resource.id()
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path, e.g. `/namespaces/alice/books`.
    pub fn path(&self) -> String {
        self.resource.path()
    }

    /// Path below `/namespaces`, e.g. `alice/books`.
    pub fn relative_path(&self) -> &str {
        self.resource.relative_path()
    }

    /// Fetch id, description and child names, replacing the cache.
    pub async fn get_item(&mut self) -> Result<()> {
        let args = query_args(&[
            ("returnDescription", "True"),
            ("returnNamespaces", "True"),
            ("returnTags", "True"),
        ]);
        let response = self.resource.call(Method::Get, status::OK, None, &args).await?;
        let info: NamespaceInfo = parse_json(&response)?;
        self.resource.set_id(info.id);
        self.description.set(info.description.unwrap_or_default());
        self.namespace_names.set(info.namespace_names.unwrap_or_default());
        self.tag_names.set(info.tag_names.unwrap_or_default());
        Ok(())
    }

    /// The description, fetched on first access.
    pub async fn description(&mut self) -> Result<&str> {
        if !self.description.is_fetched() {
            self.get_item().await?;
        }
        self.description.require("description").map(String::as_str)
    }

    /// Names of the namespaces directly below this one, fetched on first
    /// access.
    pub async fn namespace_names(&mut self) -> Result<&[String]> {
        if !self.namespace_names.is_fetched() {
            self.get_item().await?;
        }
        self.namespace_names
            .require("namespaceNames")
            .map(Vec::as_slice)
    }

    /// Names of the tags in this namespace, fetched on first access.
    pub async fn tag_names(&mut self) -> Result<&[String]> {
        if !self.tag_names.is_fetched() {
            self.get_item().await?;
        }
        self.tag_names.require("tagNames").map(Vec::as_slice)
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

    /// Create a namespace directly below this one.
    ///
    /// This instance's cached child names are left untouched.
    pub async fn create_namespace(&self, name: &str, description: &str) -> Result<Namespace<'c>> {
        let body = json!({ "name": name, "description": description }).to_string();
        let response = self
            .resource
            .call(Method::Post, status::CREATED, Some(&body), &Default::default())
            .await?;
        let created: Created = parse_json(&response)?;

        let mut child = Namespace::new(
            self.resource.connector(),
            created.id,
            self.child_path(name),
        )?;
        child.description.set(description.to_string());
        child.namespace_names.set(Vec::new());
        child.tag_names.set(Vec::new());
        Ok(child)
    }

    /// Create a tag in this namespace.
    pub async fn create_tag(&self, name: &str, description: &str, indexed: bool) -> Result<Tag<'c>> {
        let body = json!({
            "name": name,
            "description": description,
            "indexed": indexed,
        })
        .to_string();
        let tags_path = uri_join(&[TAGS, self.relative_path()]);
        let response = self
            .resource
            .call_at(
                Method::Post,
                status::CREATED,
                Some(&body),
                &Default::default(),
                &tags_path,
            )
            .await?;
        let created: Created = parse_json(&response)?;

        Tag::with_fields(
            self.resource.connector(),
            created.id,
            indexed,
            description,
            self.child_path(name),
        )
    }

    /// Fetch the namespace called `name` below this one.
    pub async fn namespace(&self, name: &str) -> Result<Namespace<'c>> {
        let mut child = Namespace::new(self.resource.connector(), "", self.child_path(name))?;
        child.get_item().await?;
        Ok(child)
    }

    /// Fetch the tag called `name` in this namespace.
    pub async fn tag(&self, name: &str) -> Result<Tag<'c>> {
        let mut tag = Tag::new(self.resource.connector(), "", self.child_path(name))?;
        tag.get_item().await?;
        Ok(tag)
    }

    /// Delete this namespace on the server.
    ///
    /// The local cache is kept as it was.
    pub async fn delete(&self) -> Result<()> {
        self.resource
            .call(Method::Delete, status::NO_CONTENT, None, &Default::default())
            .await?;
        Ok(())
    }

    fn child_path(&self, name: &str) -> String {
        uri_join(&[self.relative_path(), name])
    }
}
