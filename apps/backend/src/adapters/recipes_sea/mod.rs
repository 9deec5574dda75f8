//! SeaORM adapter for recipes and their ingredient / category links.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::InsertOutcome;
use crate::entities::{categories, ingredients, recipe_categories, recipe_ingredients, recipes};

pub mod dto;

pub use dto::{IngredientAmount, RecipeCreate, RecipeUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<recipes::Model>, sea_orm::DbErr> {
    recipes::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<recipes::Model>, sea_orm::DbErr> {
    recipes::Entity::find()
        .filter(recipes::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn find_name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    id: i64,
) -> Result<Option<recipes::Model>, sea_orm::DbErr> {
    recipes::Entity::find()
        .filter(recipes::Column::Name.eq(name))
        .filter(recipes::Column::Id.ne(id))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<recipes::Model>, sea_orm::DbErr> {
    recipes::Entity::find()
        .order_by_asc(recipes::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<recipes::Model>, sea_orm::DbErr> {
    recipes::Entity::find()
        .filter(recipes::Column::UserId.eq(user_id))
        .order_by_asc(recipes::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_recipe<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RecipeCreate,
) -> Result<InsertOutcome<recipes::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let name = dto.name.clone();
    let active = recipes::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        name: Set(dto.name),
        cook_time_sec: Set(dto.cook_time_sec),
        prep_time_sec: Set(dto.prep_time_sec),
        non_blocking_time_sec: Set(dto.non_blocking_time_sec),
        servings: Set(dto.servings),
        description: Set(dto.description),
        img: Set(dto.img),
        preview_img: Set(dto.preview_img),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = recipes::Entity::insert(active)
        .on_conflict(
            OnConflict::column(recipes::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if rows != 1 {
        return Ok(InsertOutcome::Conflict);
    }
    let recipe = find_by_name(conn, &name)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("recipes.name not found".to_string()))?;
    Ok(InsertOutcome::Created(recipe))
}

pub async fn update_recipe<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: recipes::Model,
    dto: RecipeUpdate,
) -> Result<recipes::Model, sea_orm::DbErr> {
    let mut recipe: recipes::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        recipe.name = Set(name);
    }
    if let Some(v) = dto.cook_time_sec {
        recipe.cook_time_sec = Set(Some(v));
    }
    if let Some(v) = dto.prep_time_sec {
        recipe.prep_time_sec = Set(Some(v));
    }
    if let Some(v) = dto.non_blocking_time_sec {
        recipe.non_blocking_time_sec = Set(Some(v));
    }
    if let Some(v) = dto.servings {
        recipe.servings = Set(Some(v));
    }
    if let Some(description) = dto.description {
        recipe.description = Set(Some(description));
    }
    if let Some(img) = dto.img {
        recipe.img = Set(Some(img));
    }
    if let Some(preview) = dto.preview_img {
        recipe.preview_img = Set(Some(preview));
    }
    recipe.updated_at = Set(time::OffsetDateTime::now_utc());
    recipe.update(conn).await
}

pub async fn delete_recipe<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = recipes::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Insert or overwrite the amount of `ingredient_id` used by `recipe_id`.
pub async fn upsert_recipe_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    ingredient_id: i64,
    amount: IngredientAmount,
) -> Result<recipe_ingredients::Model, sea_orm::DbErr> {
    let active = recipe_ingredients::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(ingredient_id),
        amount_grams: Set(amount.amount_grams),
        amount_readable: Set(amount.amount_readable),
    };

    recipe_ingredients::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                recipe_ingredients::Column::RecipeId,
                recipe_ingredients::Column::IngredientId,
            ])
            .update_columns([
                recipe_ingredients::Column::AmountGrams,
                recipe_ingredients::Column::AmountReadable,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    recipe_ingredients::Entity::find_by_id((recipe_id, ingredient_id))
        .one(conn)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound("recipe_ingredients row not found".to_string())
        })
}

pub async fn delete_recipe_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    ingredient_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = recipe_ingredients::Entity::delete_by_id((recipe_id, ingredient_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn list_recipe_ingredients<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
) -> Result<Vec<(recipe_ingredients::Model, Option<ingredients::Model>)>, sea_orm::DbErr> {
    recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_ingredients::Column::IngredientId)
        .find_also_related(ingredients::Entity)
        .all(conn)
        .await
}

/// Link a category; `false` when the link already existed.
pub async fn insert_recipe_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    category_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let active = recipe_categories::ActiveModel {
        recipe_id: Set(recipe_id),
        category_id: Set(category_id),
    };

    let rows = recipe_categories::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                recipe_categories::Column::RecipeId,
                recipe_categories::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(rows == 1)
}

pub async fn delete_recipe_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    category_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = recipe_categories::Entity::delete_by_id((recipe_id, category_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn list_recipe_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
) -> Result<Vec<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .inner_join(recipe_categories::Entity)
        .filter(recipe_categories::Column::RecipeId.eq(recipe_id))
        .order_by_asc(categories::Column::Id)
        .all(conn)
        .await
}
