//! The `FluidDb` facade.
//!
//! Owns the [`Connector`] and hands out resource wrappers that borrow it.

use serde_json::{Value, json};

use fluiddb_core::{Error, Method, Result, query_args};

use crate::config::{ClientConfig, FLUIDDB_URL};
use crate::connector::Connector;
use crate::namespace::Namespace;
use crate::object::Object;
use crate::resource::{Created, OBJECTS, Resource, parse_json, status, string_array};
use crate::tag::Tag;
use crate::user::User;

/// Entry point for talking to one FluidDB instance.
///
/// ```no_run
/// # async fn demo() -> fluiddb_core::Result<()> {
/// use fluiddb_client::FluidDb;
///
/// let mut db = FluidDb::with_url(fluiddb_client::SANDBOX_URL)?;
/// db.login("alice", "secret");
/// let ids = db.search_objects("has fluiddb/users/username").await?;
/// println!("{} users", ids.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FluidDb {
    connector: Connector,
}

impl FluidDb {
    /// Anonymous client for the production instance.
    pub fn new() -> Result<Self> {
        Self::with_url(FLUIDDB_URL)
    }

    /// Anonymous client for the instance at `url`.
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::default().with_base_url(url))
    }

    /// Client for an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            connector: Connector::new(config)?,
        })
    }

    /// Base URL of the instance.
    pub fn url(&self) -> &str {
        self.connector.base_url()
    }

    /// Authenticate subsequent calls. Credentials are not checked until
    /// the next call.
    pub fn login(&mut self, username: impl Into<String>, password: impl Into<String>) {
        let username = username.into();
        log::debug!("logging in as {username}");
        self.connector.set_credentials(username, password);
    }

    /// Make subsequent calls anonymously.
    pub fn logout(&mut self) {
        self.connector.clear_credentials();
    }

    /// The underlying connector, for raw calls.
    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Mutable access to the connector's runtime settings.
    pub fn connector_mut(&mut self) -> &mut Connector {
        &mut self.connector
    }

    /// Fetch the namespace at `path`, or `None` if it does not exist.
    pub async fn namespace(&self, path: &str) -> Result<Option<Namespace<'_>>> {
        let mut namespace = Namespace::new(&self.connector, "", path)?;
        found(namespace.get_item().await).map(|found| found.then_some(namespace))
    }

    /// Create a namespace called `name` below the namespace at `parent`.
    pub async fn create_namespace(
        &self,
        parent: &str,
        name: &str,
        description: &str,
    ) -> Result<Namespace<'_>> {
        Namespace::new(&self.connector, "", parent)?
            .create_namespace(name, description)
            .await
    }

    /// Fetch the tag at `path`, or `None` if it does not exist.
    pub async fn tag(&self, path: &str) -> Result<Option<Tag<'_>>> {
        let mut tag = Tag::new(&self.connector, "", path)?;
        found(tag.get_item().await).map(|found| found.then_some(tag))
    }

    /// Create a tag called `name` in the namespace at `namespace`.
    pub async fn create_tag(
        &self,
        namespace: &str,
        name: &str,
        description: &str,
        indexed: bool,
    ) -> Result<Tag<'_>> {
        Namespace::new(&self.connector, "", namespace)?
            .create_tag(name, description, indexed)
            .await
    }

    /// Reference the object with `id`. Its fields load on first access.
    pub fn object(&self, id: &str) -> Result<Object<'_>> {
        Object::new(&self.connector, id, "")
    }

    /// Create a new object, optionally about something.
    ///
    /// Creating an object with an about value that already exists returns
    /// the existing object.
    pub async fn create_object(&self, about: Option<&str>) -> Result<Object<'_>> {
        let body = match about {
            Some(about) => json!({ "about": about }),
            None => json!({}),
        }
        .to_string();
        let objects = Resource::new(&self.connector, "", OBJECTS, "");
        let response = objects
            .call(Method::Post, status::CREATED, Some(&body), &Default::default())
            .await?;
        let created: Created = parse_json(&response)?;
        Ok(Object::new(&self.connector, created.id, "")?.with_about(about.map(str::to_string)))
    }

    /// Fetch the user called `name`, or `None` if there is no such user.
    pub async fn user(&self, name: &str) -> Result<Option<User<'_>>> {
        let mut user = User::new(&self.connector, "", name)?;
        found(user.get_item().await).map(|found| found.then_some(user))
    }

    /// Fetch the user the client is logged in as.
    ///
    /// Fails with [`Error::Config`] when the client is anonymous.
    pub async fn logged_in_user(&self) -> Result<User<'_>> {
        if !self.connector.config().has_credentials() {
            return Err(Error::config("not logged in"));
        }
        let mut user = User::new(&self.connector, "", self.connector.username())?;
        user.get_item().await?;
        Ok(user)
    }

    /// Ids of the objects matching a query, e.g. `has alice/rating`.
    pub async fn search_objects(&self, query: &str) -> Result<Vec<String>> {
        let args = query_args(&[("query", query)]);
        let response = self.connector.call(Method::Get, OBJECTS, None, &args).await?;
        if response.status() != status::OK {
            return Err(Error::api_from_response(&response));
        }
        let result: Value = parse_json(&response)?;
        string_array(&result, "ids")
    }
}

/// `Ok(false)` for a 404, so lookups can report absence without an error.
fn found(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
