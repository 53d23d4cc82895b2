//! State and compensation stack of a lead registration.
//!
//! Every step that changes an external system records how to undo it. When a later step fails
//! the local transaction is rolled back and the recorded compensations run in reverse order.
//! Compensation failures are logged and never replace the error that triggered them.

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde_json::Value;

use crate::server::{client::crm::CrmClient, error::Error, model::crm::CrmToken};

/// Undo action for a completed step
#[derive(Debug, Clone)]
pub enum Compensation {
    /// Delete the item described by a CRM create response
    DeleteCrmItem { item: Value },
}

/// Progress of a single registration
pub struct RegistrationSaga<'a> {
    crm_client: &'a CrmClient,
    crm_token: CrmToken,
    /// Raw CRM create response
    crm_item: Option<Value>,
    /// CRM id the lead is stored under
    crm_item_id: Option<i64>,
    /// Open transaction holding the uncommitted lead
    transaction: Option<DatabaseTransaction>,
    compensations: Vec<Compensation>,
}

impl<'a> RegistrationSaga<'a> {
    pub fn new(crm_client: &'a CrmClient, crm_token: CrmToken) -> Self {
        Self {
            crm_client,
            crm_token,
            crm_item: None,
            crm_item_id: None,
            transaction: None,
            compensations: Vec::new(),
        }
    }

    pub fn crm_token(&self) -> &CrmToken {
        &self.crm_token
    }

    /// Records the created CRM item and schedules its deletion as compensation
    pub fn record_crm_item(&mut self, item: Value, crm_item_id: i64) {
        self.compensations
            .push(Compensation::DeleteCrmItem { item: item.clone() });
        self.crm_item = Some(item);
        self.crm_item_id = Some(crm_item_id);
    }

    pub fn crm_item(&self) -> Result<&Value, Error> {
        self.crm_item.as_ref().ok_or_else(|| {
            Error::InternalError("CRM item requested before it was created".to_string())
        })
    }

    /// Opens the local transaction the lead is written in
    pub async fn begin(&mut self, db: &DatabaseConnection) -> Result<(), Error> {
        let txn = db.begin().await?;
        self.transaction = Some(txn);

        Ok(())
    }

    pub fn transaction(&self) -> Result<&DatabaseTransaction, Error> {
        self.transaction.as_ref().ok_or_else(|| {
            Error::InternalError("Local transaction used before it was opened".to_string())
        })
    }

    pub fn compensations(&self) -> &[Compensation] {
        &self.compensations
    }

    /// Commits the local transaction, after which nothing is compensated anymore
    ///
    /// When the commit fails the transaction has already been consumed and is rolled back by
    /// the database, the CRM compensations stay scheduled.
    pub async fn commit(&mut self) -> Result<(), Error> {
        if let Some(txn) = self.transaction.take() {
            txn.commit().await?;
        }

        self.compensations.clear();

        Ok(())
    }

    /// Rolls back the local transaction and runs compensations in reverse order
    pub async fn compensate(mut self) {
        if let Some(txn) = self.transaction.take() {
            if let Err(e) = txn.rollback().await {
                tracing::error!("Failed to roll back lead transaction: {}", e);
            }
        }

        while let Some(compensation) = self.compensations.pop() {
            match compensation {
                Compensation::DeleteCrmItem { item } => self.delete_crm_item(&item).await,
            }
        }
    }

    async fn delete_crm_item(&self, item: &Value) {
        let crm_item_id = self.crm_item_id;

        match self.crm_client.delete_item(&self.crm_token, item).await {
            Ok(true) => {
                tracing::warn!(crm_id = ?crm_item_id, "Deleted CRM item of failed registration");
            }
            Ok(false) => {
                tracing::error!(
                    crm_id = ?crm_item_id,
                    "CRM did not confirm deletion of item from failed registration, manual cleanup required"
                );
            }
            Err(e) => {
                tracing::error!(
                    crm_id = ?crm_item_id,
                    "Failed to delete CRM item of failed registration, manual cleanup required: {}",
                    e
                );
            }
        }
    }
}
