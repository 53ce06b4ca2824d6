//! Shared machinery for resource-backed entities.
//!
//! Every wrapper ([`Namespace`](crate::Namespace), [`Tag`](crate::Tag),
//! [`Object`](crate::Object), [`User`](crate::User)) holds one
//! [`Resource`]: a borrowed connector plus the entity's id and path. The
//! resource issues calls with an expected status and turns any other
//! status into [`Error::Api`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use fluiddb_core::{Error, Method, QueryArgs, Response, Result, uri_join};

use crate::connector::Connector;

/// Root path of namespace resources.
pub const NAMESPACES: &str = "/namespaces";
/// Root path of tag resources.
pub const TAGS: &str = "/tags";
/// Root path of object resources.
pub const OBJECTS: &str = "/objects";
/// Root path of user resources.
pub const USERS: &str = "/users";

/// HTTP statuses the resource wrappers expect.
pub mod status {
    /// Read succeeded.
    pub const OK: u16 = 200;
    /// Resource created.
    pub const CREATED: u16 = 201;
    /// Update or delete succeeded, no body.
    pub const NO_CONTENT: u16 = 204;
}

/// A field that is either not yet fetched from the server or known.
///
/// Distinguishes "never asked" from values the server legitimately
/// reports as empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Lazy<T> {
    /// Not fetched yet; reading it triggers a fetch.
    #[default]
    Unfetched,
    /// Cached value, returned until the next explicit fetch.
    Fetched(T),
}

impl<T> Lazy<T> {
    /// The cached value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Unfetched => None,
            Self::Fetched(value) => Some(value),
        }
    }

    /// Returns `true` once a value is cached.
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Cache a value.
    pub fn set(&mut self, value: T) {
        *self = Self::Fetched(value);
    }

    /// The cached value, or a format error naming the missing field.
    pub fn require(&self, field: &str) -> Result<&T> {
        self.get()
            .ok_or_else(|| Error::format(format!("'{field}' was not populated by the server")))
    }
}

/// Body of a `201 Created` reply. Only the id is kept; the `URI` field is
/// derivable from it.
#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    pub(crate) id: String,
}

/// Connector reference plus identity of one remote entity.
#[derive(Debug, Clone)]
pub struct Resource<'c> {
    connector: &'c Connector,
    id: String,
    root_path: &'static str,
    path: String,
}

impl<'c> Resource<'c> {
    /// Describe the entity at `root_path` + `path`.
    pub fn new(
        connector: &'c Connector,
        id: impl Into<String>,
        root_path: &'static str,
        path: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            id: id.into(),
            root_path,
            path: path.into(),
        }
    }

    /// The connector this entity talks through.
    pub fn connector(&self) -> &'c Connector {
        self.connector
    }

    /// Server-assigned id; empty until fetched.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Resource-type prefix such as `/namespaces`.
    pub fn root_path(&self) -> &'static str {
        self.root_path
    }

    /// Hierarchical name below the root path (e.g. `alice/books`).
    pub fn relative_path(&self) -> &str {
        &self.path
    }

    /// Full, normalized path (e.g. `/namespaces/alice/books`).
    pub fn path(&self) -> String {
        if self.path.is_empty() {
            self.root_path.to_string()
        } else {
            uri_join(&[self.root_path, self.path.as_str()])
        }
    }

    /// Call this resource's own path, expecting `expected`.
    pub async fn call(
        &self,
        method: Method,
        expected: u16,
        body: Option<&str>,
        args: &QueryArgs,
    ) -> Result<Response> {
        self.call_at(method, expected, body, args, &self.path()).await
    }

    /// Call an explicit path, expecting `expected`.
    pub async fn call_at(
        &self,
        method: Method,
        expected: u16,
        body: Option<&str>,
        args: &QueryArgs,
        path: &str,
    ) -> Result<Response> {
        let response = self.connector.call(method, path, body, args).await?;
        check_status(method, path, expected, response)
    }

    /// Send a body with an explicit media type to `path`, expecting
    /// `expected`.
    pub async fn call_with_content_type(
        &self,
        method: Method,
        expected: u16,
        body: &str,
        content_type: &str,
        path: &str,
    ) -> Result<Response> {
        let response = self
            .connector
            .call_with_content_type(method, path, body, content_type, &QueryArgs::new())
            .await?;
        check_status(method, path, expected, response)
    }
}

fn check_status(method: Method, path: &str, expected: u16, response: Response) -> Result<Response> {
    if response.status() == expected {
        return Ok(response);
    }
    log::debug!(
        "{method} {path}: expected {expected}, got {} {}",
        response.status(),
        response.message()
    );
    Err(Error::api_from_response(&response))
}

/// Decode a response body as JSON.
///
/// Fails with [`Error::Format`] when the envelope's content type is not
/// JSON-compatible.
pub fn parse_json<T: DeserializeOwned>(response: &Response) -> Result<T> {
    if !response.is_json() {
        return Err(Error::format(format!(
            "expected a JSON response, got content type '{}'",
            response.content_type()
        )));
    }
    parse_json_str(response.body())
}

/// Decode JSON text.
pub fn parse_json_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Read `key` from a JSON object as an array of strings.
pub fn string_array(value: &Value, key: &str) -> Result<Vec<String>> {
    let items = value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::format(format!("'{key}' is not an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::format(format!("'{key}' contains a non-string item")))
        })
        .collect()
}
