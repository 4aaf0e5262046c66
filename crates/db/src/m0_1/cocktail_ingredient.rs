use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{Cocktail, CocktailIngredient};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(CocktailIngredient::Table)
        .col(
            ColumnDef::new(CocktailIngredient::CocktailId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(CocktailIngredient::IngredientId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(CocktailIngredient::Position)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(CocktailIngredient::IsOptional)
                .boolean()
                .not_null()
                .default(false),
        )
        .primary_key(
            Index::create()
                .col(CocktailIngredient::CocktailId)
                .col(CocktailIngredient::Position),
        )
        .foreign_key(
            ForeignKey::create()
                .from(CocktailIngredient::Table, CocktailIngredient::CocktailId)
                .to(Cocktail::Table, Cocktail::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(CocktailIngredient::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
