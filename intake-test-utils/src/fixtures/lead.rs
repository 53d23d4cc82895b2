use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn lead<'a>(&'a mut self) -> LeadFixtures<'a> {
        LeadFixtures { context: self }
    }
}

pub struct LeadFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> LeadFixtures<'a> {
    /// Insert a lead whose token expires at `expires_at`.
    pub async fn insert_lead(
        &self,
        crm_id: i64,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<entity::lead::Model, TestError> {
        insert(&self.context.db, crm_id, token, expires_at).await
    }

    /// Insert a lead expiring in 72 hours through `db`, such as an open transaction.
    pub async fn insert_lead_in<C: ConnectionTrait>(
        &self,
        db: &C,
        crm_id: i64,
        token: &str,
    ) -> Result<entity::lead::Model, TestError> {
        let expires_at = Utc::now().naive_utc() + Duration::hours(72);

        insert(db, crm_id, token, expires_at).await
    }
}

async fn insert<C: ConnectionTrait>(
    db: &C,
    crm_id: i64,
    token: &str,
    expires_at: NaiveDateTime,
) -> Result<entity::lead::Model, TestError> {
    Ok(entity::prelude::Lead::insert(entity::lead::ActiveModel {
        crm_id: ActiveValue::Set(crm_id),
        name: ActiveValue::Set("Maria Silva".to_string()),
        committee: ActiveValue::Set("Sao Paulo".to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        expires_at: ActiveValue::Set(expires_at),
        token: ActiveValue::Set(token.to_string()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await?)
}
