mod bar_ingredient;
mod cocktail;
mod cocktail_ingredient;
mod ingredient;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mixwise",
    "m0_1",
    vec_box![],
    vec_box![
        ingredient::CreateTable,
        cocktail::CreateTable,
        cocktail::CreateSlugIdx,
        cocktail_ingredient::CreateTable,
        bar_ingredient::CreateTable
    ]
);
