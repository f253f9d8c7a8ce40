//! An in-memory catalog for tests, which counts connects and closes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::catalog::{CatalogConnection, CatalogConnector, CatalogError, Column, ConnectionTarget};

#[derive(Clone, Default)]
pub struct MockCatalog {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    tables: HashMap<String, Vec<Column>>,
    refuse_connect: Option<String>,
    fail_queries: Option<String>,
    connects: usize,
    closes: usize,
    last_target: Option<ConnectionTarget>,
}

struct MockConnection {
    state: Arc<Mutex<MockState>>,
    closed: bool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, name: &str, columns: Vec<Column>) -> Self {
        self.lock().tables.insert(name.to_string(), columns);
        self
    }

    pub fn refusing_connections(self, message: &str) -> Self {
        self.lock().refuse_connect = Some(message.to_string());
        self
    }

    pub fn failing_queries(self, message: &str) -> Self {
        self.lock().fail_queries = Some(message.to_string());
        self
    }

    pub fn connects(&self) -> usize {
        self.lock().connects
    }

    pub fn closes(&self) -> usize {
        self.lock().closes
    }

    pub fn last_target(&self) -> Option<ConnectionTarget> {
        self.lock().last_target.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl CatalogConnector for MockCatalog {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn CatalogConnection>, CatalogError> {
        let mut state = self.lock();
        state.last_target = Some(target.clone());

        if let Some(message) = &state.refuse_connect {
            return Err(CatalogError::Connect(message.clone().into()));
        }

        state.connects += 1;

        Ok(Box::new(MockConnection {
            state: self.state.clone(),
            closed: false,
        }))
    }
}

impl MockConnection {
    fn check_open(&self) -> Result<MutexGuard<'_, MockState>, CatalogError> {
        let state = self.state.lock().unwrap();

        if self.closed {
            return Err(CatalogError::Query("connection already closed".into()));
        }

        if let Some(message) = &state.fail_queries {
            return Err(CatalogError::Query(message.clone().into()));
        }

        Ok(state)
    }
}

#[async_trait]
impl CatalogConnection for MockConnection {
    async fn table_exists(&mut self, table: &str) -> Result<bool, CatalogError> {
        Ok(self.check_open()?.tables.contains_key(table))
    }

    async fn columns(&mut self, table: &str) -> Result<Vec<Column>, CatalogError> {
        Ok(self
            .check_open()?
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), CatalogError> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().closes += 1;
        }
        Ok(())
    }
}
