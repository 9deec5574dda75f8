use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Password,
    Role,
    Img,
    PreviewImg,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    Img,
    PreviewImg,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    UserId,
    Name,
    CookTimeSec,
    PrepTimeSec,
    NonBlockingTimeSec,
    Servings,
    Description,
    Img,
    PreviewImg,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ingredients {
    Table,
    Id,
    Name,
    Description,
    RecipeId,
    Img,
    PreviewImg,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RecipeIngredients {
    Table,
    RecipeId,
    IngredientId,
    AmountGrams,
    AmountReadable,
}

#[derive(Iden)]
enum RecipeCategories {
    Table,
    RecipeId,
    CategoryId,
}

#[derive(Iden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    Longitude,
    Latitude,
    Phone,
    Website,
    Description,
    Img,
    PreviewImg,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Shelves {
    Table,
    StoreId,
    IngredientId,
    Quantity,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Users::Img).string().null())
                    .col(ColumnDef::new(Users::PreviewImg).string().null())
                    .col(timestamp_col(Users::CreatedAt))
                    .col(timestamp_col(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // categories
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_col(Categories::Id))
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .col(ColumnDef::new(Categories::Img).string().null())
                    .col(ColumnDef::new(Categories::PreviewImg).string().null())
                    .col(timestamp_col(Categories::CreatedAt))
                    .col(timestamp_col(Categories::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // recipes
        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(id_col(Recipes::Id))
                    .col(ColumnDef::new(Recipes::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Recipes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Recipes::CookTimeSec)
                            .integer()
                            .null()
                            .check(Expr::col(Recipes::CookTimeSec).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Recipes::PrepTimeSec)
                            .integer()
                            .null()
                            .check(Expr::col(Recipes::PrepTimeSec).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Recipes::NonBlockingTimeSec)
                            .integer()
                            .null()
                            .check(Expr::col(Recipes::NonBlockingTimeSec).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Recipes::Servings)
                            .integer()
                            .null()
                            .check(Expr::col(Recipes::Servings).gte(0)),
                    )
                    .col(ColumnDef::new(Recipes::Description).text().null())
                    .col(ColumnDef::new(Recipes::Img).string().null())
                    .col(ColumnDef::new(Recipes::PreviewImg).string().null())
                    .col(timestamp_col(Recipes::CreatedAt))
                    .col(timestamp_col(Recipes::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipes_user_id")
                            .from(Recipes::Table, Recipes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_recipes_user_id")
                    .table(Recipes::Table)
                    .col(Recipes::UserId)
                    .to_owned(),
            )
            .await?;

        // ingredients
        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(id_col(Ingredients::Id))
                    .col(
                        ColumnDef::new(Ingredients::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Ingredients::Description).text().null())
                    .col(ColumnDef::new(Ingredients::RecipeId).big_integer().null())
                    .col(ColumnDef::new(Ingredients::Img).string().null())
                    .col(ColumnDef::new(Ingredients::PreviewImg).string().null())
                    .col(timestamp_col(Ingredients::CreatedAt))
                    .col(timestamp_col(Ingredients::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ingredients_recipe_id")
                            .from(Ingredients::Table, Ingredients::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // recipe_ingredients
        manager
            .create_table(
                Table::create()
                    .table(RecipeIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeIngredients::RecipeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipeIngredients::IngredientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipeIngredients::AmountGrams)
                            .double()
                            .null()
                            .check(Expr::col(RecipeIngredients::AmountGrams).gte(0)),
                    )
                    .col(
                        ColumnDef::new(RecipeIngredients::AmountReadable)
                            .string()
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_recipe_ingredients")
                            .col(RecipeIngredients::RecipeId)
                            .col(RecipeIngredients::IngredientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_ingredients_recipe_id")
                            .from(RecipeIngredients::Table, RecipeIngredients::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_ingredients_ingredient_id")
                            .from(RecipeIngredients::Table, RecipeIngredients::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // recipe_categories
        manager
            .create_table(
                Table::create()
                    .table(RecipeCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeCategories::RecipeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipeCategories::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_recipe_categories")
                            .col(RecipeCategories::RecipeId)
                            .col(RecipeCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_categories_recipe_id")
                            .from(RecipeCategories::Table, RecipeCategories::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_categories_category_id")
                            .from(RecipeCategories::Table, RecipeCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // stores
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(id_col(Stores::Id))
                    .col(
                        ColumnDef::new(Stores::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Stores::Address).string().not_null())
                    .col(
                        ColumnDef::new(Stores::Longitude)
                            .double()
                            .null()
                            .check(Expr::col(Stores::Longitude).between(-180.0, 180.0)),
                    )
                    .col(
                        ColumnDef::new(Stores::Latitude)
                            .double()
                            .null()
                            .check(Expr::col(Stores::Latitude).between(-90.0, 90.0)),
                    )
                    .col(ColumnDef::new(Stores::Phone).string().null())
                    .col(ColumnDef::new(Stores::Website).string().null())
                    .col(ColumnDef::new(Stores::Description).text().null())
                    .col(ColumnDef::new(Stores::Img).string().null())
                    .col(ColumnDef::new(Stores::PreviewImg).string().null())
                    .col(timestamp_col(Stores::CreatedAt))
                    .col(timestamp_col(Stores::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // shelves
        manager
            .create_table(
                Table::create()
                    .table(Shelves::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Shelves::StoreId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Shelves::IngredientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Shelves::Quantity)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Shelves::Quantity).gte(0)),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_shelves")
                            .col(Shelves::StoreId)
                            .col(Shelves::IngredientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shelves_store_id")
                            .from(Shelves::Table, Shelves::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shelves_ingredient_id")
                            .from(Shelves::Table, Shelves::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order
        manager
            .drop_table(Table::drop().table(Shelves::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stores::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RecipeCategories::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RecipeIngredients::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Ingredients::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_recipes_user_id")
                    .table(Recipes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Recipes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
