//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and mock
/// HTTP endpoints. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_lead_tables: bool,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // (expected_requests)
    auth_endpoints: Vec<usize>,
    // (status, expected_requests)
    email_endpoints: Vec<(usize, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_lead_tables: false,
            mock_builders: Vec::new(),
            auth_endpoints: Vec::new(),
            email_endpoints: Vec::new(),
        }
    }

    /// Add the lead, lead email and lead phone tables to the test database.
    pub fn with_lead_tables(mut self) -> Self {
        self.include_lead_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use intake_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), intake_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(Lead).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add a successful CRM authentication endpoint expected `expected_requests` times.
    pub fn with_crm_auth_endpoint(mut self, expected_requests: usize) -> Self {
        self.auth_endpoints.push(expected_requests);
        self
    }

    /// Add an email trigger endpoint answering with `status`.
    pub fn with_email_endpoint(mut self, status: usize, expected_requests: usize) -> Self {
        self.email_endpoints.push((status, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context by creating all configured tables and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_lead_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Lead),
                schema.create_table_from_entity(entity::prelude::LeadEmail),
                schema.create_table_from_entity(entity::prelude::LeadPhone),
            ]);
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        // Custom endpoints first so they take precedence over the shortcuts below
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut context.server));
        }

        for expected in self.auth_endpoints {
            mocks.push(context.crm().create_auth_endpoint(expected));
        }

        for (status, expected) in self.email_endpoints {
            mocks.push(context.email().create_email_endpoint(status, expected));
        }

        context.mocks = mocks;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
