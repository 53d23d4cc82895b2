use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QuerySelect,
};

use crate::server::model::{
    db::LeadModel,
    lead::{LeadRecord, NewLead},
};

pub struct LeadRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeadRepository<'a, C> {
    /// Creates a new instance of [`LeadRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a lead with its email and phone rows
    ///
    /// Nothing is committed here, pass a transaction to keep the rows uncommitted.
    pub async fn create(&self, new_lead: NewLead) -> Result<LeadRecord, DbErr> {
        let lead = entity::lead::ActiveModel {
            crm_id: ActiveValue::Set(new_lead.crm_id),
            name: ActiveValue::Set(new_lead.name),
            committee: ActiveValue::Set(new_lead.committee),
            created_at: ActiveValue::Set(new_lead.created_at),
            expires_at: ActiveValue::Set(new_lead.expires_at),
            token: ActiveValue::Set(new_lead.token),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut emails = Vec::with_capacity(new_lead.emails.len());
        for address in new_lead.emails {
            let email = entity::lead_email::ActiveModel {
                lead_id: ActiveValue::Set(lead.id),
                address: ActiveValue::Set(address),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            emails.push(email);
        }

        let mut phones = Vec::with_capacity(new_lead.phones.len());
        for number in new_lead.phones {
            let phone = entity::lead_phone::ActiveModel {
                lead_id: ActiveValue::Set(lead.id),
                number: ActiveValue::Set(number),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            phones.push(phone);
        }

        Ok(LeadRecord {
            lead,
            emails,
            phones,
        })
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<LeadModel>, DbErr> {
        entity::prelude::Lead::find()
            .filter(entity::lead::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    pub async fn find_by_crm_id_and_token(
        &self,
        crm_id: i64,
        token: &str,
    ) -> Result<Option<LeadModel>, DbErr> {
        entity::prelude::Lead::find()
            .filter(entity::lead::Column::CrmId.eq(crm_id))
            .filter(entity::lead::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    /// Gets the token expiration of the lead with `crm_id`
    ///
    /// Returns `Ok(None)` when no lead has that CRM id.
    pub async fn find_expiration(&self, crm_id: i64) -> Result<Option<NaiveDateTime>, DbErr> {
        entity::prelude::Lead::find()
            .select_only()
            .column(entity::lead::Column::ExpiresAt)
            .filter(entity::lead::Column::CrmId.eq(crm_id))
            .into_tuple::<NaiveDateTime>()
            .one(self.db)
            .await
    }
}
