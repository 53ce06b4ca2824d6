//! FluidDB objects and the tag values stored on them.

use serde::Deserialize;
use serde_json::Value;

use fluiddb_core::{
    Error, Method, QueryArgs, Response, Result, TagValue, VALUE_CONTENT_TYPE, name_from_path,
    query_args, uri_join,
};

use crate::connector::Connector;
use crate::resource::{Lazy, OBJECTS, Resource, parse_json, parse_json_str, status};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectInfo {
    about: Option<String>,
    #[serde(default)]
    tag_paths: Vec<String>,
}

/// An object below `/objects`, identified by its id.
#[derive(Debug, Clone)]
pub struct Object<'c> {
    resource: Resource<'c>,
    about: Lazy<Option<String>>,
    tag_paths: Lazy<Vec<String>>,
}

impl<'c> Object<'c> {
    /// Reference an object without fetching it.
    ///
    /// An empty `path` defaults to the id; an empty `id` is taken from the
    /// last segment of `path`.
    pub fn new(connector: &'c Connector, id: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let mut id = id.into();
        let mut path = path.into();
        if path.is_empty() {
            path.clone_from(&id);
        }
        if id.is_empty() {
            id = name_from_path(&path)?;
        }
        Ok(Self {
            resource: Resource::new(connector, id, OBJECTS, path),
            about: Lazy::Unfetched,
            tag_paths: Lazy::Unfetched,
        })
    }

    pub(crate) fn with_about(mut self, about: Option<String>) -> Self {
        self.about.set(about);
        self
    }

    /// The object's id.
    pub fn id(&self) -> &str {
        self.resource.id()
    }

    /// Full path, e.g. `/objects/5a4823a4-...`.
    pub fn path(&self) -> String {
        self.resource.path()
    }

    /// Fetch the about value and the paths of all tags on the object.
    pub async fn get_item(&mut self) -> Result<()> {
        let args = query_args(&[("showAbout", "True")]);
        let response = self.resource.call(Method::Get, status::OK, None, &args).await?;
        let info: ObjectInfo = parse_json(&response)?;
        self.about.set(info.about);
        self.tag_paths.set(info.tag_paths);
        Ok(())
    }

    /// The value of the object's about tag, fetched on first access.
    ///
    /// Objects created without an about value report `None`.
    pub async fn about(&mut self) -> Result<Option<&str>> {
        if !self.about.is_fetched() {
            self.get_item().await?;
        }
        self.about.require("about").map(Option::as_deref)
    }

    /// Paths of the tags on the object, fetched on first access.
    pub async fn tag_paths(&mut self) -> Result<&[String]> {
        if !self.tag_paths.is_fetched() {
            self.get_item().await?;
        }
        self.tag_paths.require("tagPaths").map(Vec::as_slice)
    }

    /// Whether the tag at `tag_path` is present, without fetching its
    /// value.
    pub async fn has_tag(&self, tag_path: &str) -> Result<bool> {
        let path = self.value_path(tag_path);
        let response = self
            .resource
            .connector()
            .call(Method::Head, &path, None, &QueryArgs::new())
            .await?;
        Ok(response.status() == status::OK)
    }

    /// Store `value` on this object under `tag_path`.
    ///
    /// Values JSON cannot carry (NaN, infinities) fail with
    /// [`Error::Format`] before any request is made.
    pub async fn tag(&self, tag_path: &str, value: impl Into<TagValue>) -> Result<()> {
        let body = value.into().to_json()?;
        let path = self.value_path(tag_path);
        log::debug!("tagging {} with {tag_path} = {body}", self.id());
        self.resource
            .call_with_content_type(Method::Put, status::NO_CONTENT, &body, VALUE_CONTENT_TYPE, &path)
            .await?;
        Ok(())
    }

    /// Read the raw envelope for the value stored under `tag_path`.
    pub async fn tag_value(&self, tag_path: &str) -> Result<Response> {
        let path = self.value_path(tag_path);
        self.resource
            .call_at(Method::Get, status::OK, None, &QueryArgs::new(), &path)
            .await
    }

    /// Read and decode the value stored under `tag_path`.
    ///
    /// Fails with [`Error::Format`] for opaque (non-JSON) values.
    pub async fn typed_tag_value(&self, tag_path: &str) -> Result<TagValue> {
        let response = self.tag_value(tag_path).await?;
        decode_value(&response)
    }

    /// Remove the tag at `tag_path` from this object.
    pub async fn delete_tag(&self, tag_path: &str) -> Result<()> {
        let path = self.value_path(tag_path);
        self.resource
            .call_at(Method::Delete, status::NO_CONTENT, None, &QueryArgs::new(), &path)
            .await?;
        Ok(())
    }

    fn value_path(&self, tag_path: &str) -> String {
        uri_join(&[self.path().as_str(), tag_path])
    }
}

/// Decode a tag-value envelope.
///
/// Values come back either under their own media type or, when
/// `format=json` is forced, wrapped as `{"value": ...}`.
fn decode_value(response: &Response) -> Result<TagValue> {
    if !response.is_json() {
        return Err(Error::format(format!(
            "tag value has opaque content type '{}'",
            response.content_type()
        )));
    }
    match parse_json_str::<Value>(response.body())? {
        Value::Object(mut map) => match map.remove("value") {
            Some(value) => TagValue::from_value(value),
            None => Err(Error::format("JSON tag value wrapper has no 'value' field")),
        },
        other => TagValue::from_value(other),
    }
}
