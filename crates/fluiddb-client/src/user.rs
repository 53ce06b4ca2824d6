//! FluidDB users.

use serde::Deserialize;

use fluiddb_core::{Method, QueryArgs, Result, name_from_path};

use crate::connector::Connector;
use crate::namespace::Namespace;
use crate::resource::{Resource, USERS, parse_json, status};

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    name: String,
}

/// A user below `/users`.
#[derive(Debug, Clone)]
pub struct User<'c> {
    resource: Resource<'c>,
    name: String,
}

impl<'c> User<'c> {
    /// Reference the user at `path` (their username) without fetching.
    pub fn new(connector: &'c Connector, id: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let name = name_from_path(&path)?;
        Ok(Self {
            resource: Resource::new(connector, id, USERS, path),
            name,
        })
    }

    /// Server-assigned id; empty until fetched.
    pub fn id(&self) -> &str {
        self.resource.id()
    }

    /// The user's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path, e.g. `/users/alice`.
    pub fn path(&self) -> String {
        self.resource.path()
    }

    /// Fetch id and display name.
    pub async fn get_item(&mut self) -> Result<()> {
        let response = self
            .resource
            .call(Method::Get, status::OK, None, &QueryArgs::new())
            .await?;
        let info: UserInfo = parse_json(&response)?;
        self.resource.set_id(info.id);
        self.name = info.name;
        Ok(())
    }

    /// The namespace named after the user, populated.
    pub async fn root_namespace(&self) -> Result<Namespace<'c>> {
        let mut namespace = Namespace::new(self.resource.connector(), "", self.name.as_str())?;
        namespace.get_item().await?;
        Ok(namespace)
    }
}
