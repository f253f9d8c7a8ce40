use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "postgres")]
pub use postgres::PgCatalog;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The port Postgres listens on unless the URL says otherwise.
pub const DEFAULT_PORT: u16 = 5432;

/// Everything that can go wrong talking to the database.
///
/// The `Display` impls of `Connect` and `Query` are just the underlying driver error,
/// since that's what the operator needs to see.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Connect(#[source] BoxError),

    #[error("{0}")]
    Query(#[source] BoxError),

    #[error("error closing connection: {0}")]
    Close(#[source] BoxError),
}

/// A column as described by `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Column {
    pub name: String,
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// The pieces of a `DATABASE_URL` we actually connect with.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    /// The URL path without its leading `/`. May be empty, in which case the server
    /// picks its default database for the user.
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionTarget {
    pub fn parse(database_url: &str) -> Result<Self, CatalogError> {
        let url = url::Url::parse(database_url)
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        // `host_str()` would keep the brackets around IPv6 literals, which no resolver accepts.
        let host = match url.host() {
            Some(url::Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
            Some(url::Host::Ipv4(addr)) => addr.to_string(),
            Some(url::Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(CatalogError::InvalidUrl("no host in URL".into())),
        };

        let path = url.path();

        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PORT),
            database: path.strip_prefix('/').unwrap_or(path).to_string(),
            // `Url` hands these back still percent-encoded; they're passed through unchanged.
            username: Some(url.username())
                .filter(|username| !username.is_empty())
                .map(str::to_string),
            password: url.password().map(str::to_string),
        })
    }
}

impl FromStr for ConnectionTarget {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Hand-written so the password never ends up in a log line.
impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A database client that can open a connection for inspecting the catalog.
///
/// The database check takes an `Option` of this; `None` means this build has no client
/// at all and the check is skipped rather than failed.
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn CatalogConnection>, CatalogError>;
}

/// An open connection. Callers must [`close()`][CatalogConnection::close] it once done.
#[async_trait]
pub trait CatalogConnection: Send {
    async fn table_exists(&mut self, table: &str) -> Result<bool, CatalogError>;

    /// Columns of `table` in ordinal order.
    async fn columns(&mut self, table: &str) -> Result<Vec<Column>, CatalogError>;

    /// Close the connection. Any further calls on `self` fail.
    async fn close(&mut self) -> Result<(), CatalogError>;
}

/// The client compiled into this build, if any.
pub fn default_connector() -> Option<Box<dyn CatalogConnector>> {
    #[cfg(feature = "postgres")]
    {
        Some(Box::new(PgCatalog))
    }

    #[cfg(not(feature = "postgres"))]
    {
        None
    }
}
