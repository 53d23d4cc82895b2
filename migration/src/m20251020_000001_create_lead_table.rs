use sea_orm_migration::{prelude::*, schema::*};

static IDX_LEAD_CRM_ID_TOKEN: &str = "idx_lead_crm_id_token";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(pk_auto(Lead::Id))
                    .col(big_integer_uniq(Lead::CrmId))
                    .col(string(Lead::Name))
                    .col(string(Lead::Committee))
                    .col(timestamp(Lead::CreatedAt))
                    .col(timestamp(Lead::ExpiresAt))
                    .col(string_uniq(Lead::Token))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAD_CRM_ID_TOKEN)
                    .table(Lead::Table)
                    .col(Lead::CrmId)
                    .col(Lead::Token)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAD_CRM_ID_TOKEN)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Lead {
    Table,
    Id,
    CrmId,
    Name,
    Committee,
    CreatedAt,
    ExpiresAt,
    Token,
}
