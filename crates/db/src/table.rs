use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    Category,
    LegacyId,
}

#[derive(Iden, Clone)]
pub enum Cocktail {
    Table,
    Id,
    Slug,
    Name,
}

#[derive(Iden, Clone)]
pub enum CocktailIngredient {
    Table,
    CocktailId,
    IngredientId,
    Position,
    IsOptional,
}

#[derive(Iden, Clone)]
pub enum BarIngredient {
    Table,
    UserId,
    IngredientId,
    CreatedAt,
}
