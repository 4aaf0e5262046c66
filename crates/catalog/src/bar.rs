use mixwise_db::table::BarIngredient;
use sea_query::{Expr, ExprTrait, OnConflict, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

impl crate::Command {
    /// Saves one raw identifier in the user's bar. Returns `false` when it was
    /// already there or blank.
    pub async fn add_bar_ingredient(
        &self,
        user_id: impl Into<String>,
        raw_id: impl Into<String>,
    ) -> anyhow::Result<bool> {
        let user_id = user_id.into();
        let raw_id = raw_id.into().trim().to_owned();

        if raw_id.is_empty() {
            return Ok(false);
        }

        let statement = sea_query::Query::insert()
            .into_table(BarIngredient::Table)
            .columns([
                BarIngredient::UserId,
                BarIngredient::IngredientId,
                BarIngredient::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                raw_id.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([BarIngredient::UserId, BarIngredient::IngredientId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_bar_ingredient(
        &self,
        user_id: impl Into<String>,
        raw_id: impl Into<String>,
    ) -> anyhow::Result<bool> {
        let user_id = user_id.into();
        let raw_id = raw_id.into();

        let statement = sea_query::Query::delete()
            .from_table(BarIngredient::Table)
            .and_where(Expr::col(BarIngredient::UserId).eq(&user_id))
            .and_where(Expr::col(BarIngredient::IngredientId).eq(raw_id.trim()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Swaps the whole bar for `raw_ids`. Blank entries are skipped and
    /// duplicates are stored once.
    pub async fn replace_bar<I, S>(&self, user_id: impl Into<String>, raw_ids: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let user_id = user_id.into();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let mut tx = self.0.begin().await?;

        let statement = sea_query::Query::delete()
            .from_table(BarIngredient::Table)
            .and_where(Expr::col(BarIngredient::UserId).eq(&user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let mut statement = sea_query::Query::insert()
            .into_table(BarIngredient::Table)
            .columns([
                BarIngredient::UserId,
                BarIngredient::IngredientId,
                BarIngredient::CreatedAt,
            ])
            .on_conflict(
                OnConflict::columns([BarIngredient::UserId, BarIngredient::IngredientId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let mut count = 0;
        for raw_id in raw_ids {
            let raw_id = raw_id.as_ref().trim();
            if raw_id.is_empty() {
                continue;
            }

            statement.values_panic([user_id.as_str().into(), raw_id.into(), now.into()]);
            count += 1;
        }

        if count > 0 {
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(user_id = %user_id, count, "Bar replaced");

        Ok(())
    }
}
