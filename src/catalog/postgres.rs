use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use crate::catalog::{CatalogConnection, CatalogConnector, CatalogError, Column, ConnectionTarget};

/// Inspects a Postgres catalog through a single, unpooled `sqlx` connection.
///
/// A pool would be pointless for two queries, and a plain connection lets us close it
/// explicitly instead of waiting for a pool to wind down.
pub struct PgCatalog;

struct PgCatalogConnection {
    // `None` once closed.
    conn: Option<PgConnection>,
}

#[async_trait]
impl CatalogConnector for PgCatalog {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn CatalogConnection>, CatalogError> {
        let mut options = PgConnectOptions::new()
            .host(&target.host)
            .port(target.port);

        if !target.database.is_empty() {
            options = options.database(&target.database);
        }

        if let Some(username) = &target.username {
            options = options.username(username);
        }

        if let Some(password) = &target.password {
            options = options.password(password);
        }

        // SQLx logs every statement at `info` by default, which would interleave with our own
        // report whenever someone sets `RUST_LOG=info`.
        options.disable_statement_logging();

        log::debug!("connecting to {:?}", target);

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| CatalogError::Connect(e.into()))?;

        Ok(Box::new(PgCatalogConnection { conn: Some(conn) }))
    }
}

impl PgCatalogConnection {
    fn conn(&mut self) -> Result<&mut PgConnection, CatalogError> {
        self.conn
            .as_mut()
            .ok_or_else(|| CatalogError::Query("connection already closed".into()))
    }
}

#[async_trait]
impl CatalogConnection for PgCatalogConnection {
    async fn table_exists(&mut self, table: &str) -> Result<bool, CatalogError> {
        // `select from` with no target list is valid Postgres, and all `exists` needs.
        sqlx::query_scalar::<_, bool>(
            r#"
                select exists (
                    select from information_schema.tables
                    where table_name = $1
                )
            "#,
        )
        .bind(table)
        .fetch_one(self.conn()?)
        .await
        .map_err(|e| CatalogError::Query(e.into()))
    }

    async fn columns(&mut self, table: &str) -> Result<Vec<Column>, CatalogError> {
        // The `information_schema` columns are domain types (`sql_identifier`,
        // `character_data`); casting to `text` keeps SQLx from having to know about them.
        sqlx::query_as::<_, Column>(
            r#"
                select column_name::text "name", data_type::text "data_type"
                from information_schema.columns
                where table_name = $1
                order by ordinal_position
            "#,
        )
        .bind(table)
        .fetch_all(self.conn()?)
        .await
        .map_err(|e| CatalogError::Query(e.into()))
    }

    async fn close(&mut self) -> Result<(), CatalogError> {
        match self.conn.take() {
            Some(conn) => conn.close().await.map_err(|e| CatalogError::Close(e.into())),
            None => Ok(()),
        }
    }
}
