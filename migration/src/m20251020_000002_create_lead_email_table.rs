use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000001_create_lead_table::Lead;

static IDX_LEAD_EMAIL_LEAD_ID: &str = "idx_lead_email_lead_id";
static FK_LEAD_EMAIL_LEAD_ID: &str = "fk_lead_email_lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeadEmail::Table)
                    .if_not_exists()
                    .col(pk_auto(LeadEmail::Id))
                    .col(integer(LeadEmail::LeadId))
                    .col(string(LeadEmail::Address))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LEAD_EMAIL_LEAD_ID)
                            .from(LeadEmail::Table, LeadEmail::LeadId)
                            .to(Lead::Table, Lead::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAD_EMAIL_LEAD_ID)
                    .table(LeadEmail::Table)
                    .col(LeadEmail::LeadId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAD_EMAIL_LEAD_ID)
                    .table(LeadEmail::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeadEmail::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LeadEmail {
    Table,
    Id,
    LeadId,
    Address,
}
