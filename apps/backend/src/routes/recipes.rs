//! Recipe CRUD plus the ingredient-amount and category link subresources.
//! Mutations are limited to the recipe's owner and admins.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::{deleted, detail};
use crate::auth::roles::AllowSet;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::EntityKind;
use crate::extractors::{Caller, ValidatedJson};
use crate::repos::recipes::{self, IngredientAmount, RecipeCreate, RecipeUpdate};
use crate::state::app_state::AppState;

const WRITE: AllowSet = AllowSet::AdminOrUser;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub cook_time_sec: Option<i32>,
    #[serde(default)]
    pub prep_time_sec: Option<i32>,
    #[serde(default)]
    pub non_blocking_time_sec: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub preview_img: Option<String>,
}

impl CreateRecipeRequest {
    fn owned_by(self, user_id: i64) -> RecipeCreate {
        RecipeCreate {
            user_id,
            name: self.name,
            cook_time_sec: self.cook_time_sec,
            prep_time_sec: self.prep_time_sec,
            non_blocking_time_sec: self.non_blocking_time_sec,
            servings: self.servings,
            description: self.description,
            img: self.img,
            preview_img: self.preview_img,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub cook_time_sec: Option<i32>,
    pub prep_time_sec: Option<i32>,
    pub non_blocking_time_sec: Option<i32>,
    pub servings: Option<i32>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

impl From<UpdateRecipeRequest> for RecipeUpdate {
    fn from(r: UpdateRecipeRequest) -> Self {
        Self {
            name: r.name,
            cook_time_sec: r.cook_time_sec,
            prep_time_sec: r.prep_time_sec,
            non_blocking_time_sec: r.non_blocking_time_sec,
            servings: r.servings,
            description: r.description,
            img: r.img,
            preview_img: r.preview_img,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IngredientAmountRequest {
    pub amount_grams: Option<f64>,
    pub amount_readable: Option<String>,
}

/// Role gate, then load the recipe and check ownership.
async fn authorize_owner(
    caller: &Caller,
    state: &AppState,
    recipe_id: i64,
) -> Result<(), AppError> {
    caller.require(WRITE)?;
    let db = require_db(state)?;
    let recipe = recipes::get(db, recipe_id.into()).await?;
    caller.require_owner(WRITE, recipe.user_id)?;
    Ok(())
}

async fn list_recipes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(recipes::list_all(db).await?))
}

async fn list_user_recipes(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(recipes::list_by_user(db, path.into_inner()).await?))
}

async fn get_recipe(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let recipe = recipes::get(db, path.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

async fn create_recipe(
    caller: Caller,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateRecipeRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = caller.require(WRITE)?.id;
    let dto = body.into_inner().owned_by(owner);

    let recipe = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(recipes::create(txn, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(recipe))
}

async fn update_recipe(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
    body: ValidatedJson<UpdateRecipeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    authorize_owner(&caller, &state, id).await?;
    let dto = RecipeUpdate::from(body.into_inner());

    let recipe = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(recipes::update(txn, id, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(recipe))
}

async fn delete_recipe(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    authorize_owner(&caller, &state, id).await?;

    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(recipes::delete(txn, id).await?) })
    })
    .await?;

    Ok(deleted(EntityKind::Recipe, id))
}

async fn list_recipe_ingredients(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(recipes::list_ingredients(db, path.into_inner()).await?))
}

async fn set_recipe_ingredient(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
    body: ValidatedJson<IngredientAmountRequest>,
) -> Result<HttpResponse, AppError> {
    let (recipe_id, ingredient_id) = path.into_inner();
    authorize_owner(&caller, &state, recipe_id).await?;
    let body = body.into_inner();
    let amount = IngredientAmount {
        amount_grams: body.amount_grams,
        amount_readable: body.amount_readable,
    };

    let link = with_txn(&state, move |txn| {
        Box::pin(async move {
            Ok(recipes::set_ingredient(txn, recipe_id, ingredient_id, amount).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(link))
}

async fn remove_recipe_ingredient(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (recipe_id, ingredient_id) = path.into_inner();
    authorize_owner(&caller, &state, recipe_id).await?;

    with_txn(&state, move |txn| {
        Box::pin(async move {
            Ok(recipes::remove_ingredient(txn, recipe_id, ingredient_id).await?)
        })
    })
    .await?;

    Ok(detail(format!(
        "Ingredient with ID {ingredient_id} has been removed from recipe with ID {recipe_id}."
    )))
}

async fn list_recipe_categories(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(recipes::list_categories(db, path.into_inner()).await?))
}

async fn add_recipe_category(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (recipe_id, category_id) = path.into_inner();
    authorize_owner(&caller, &state, recipe_id).await?;

    let category = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(recipes::add_category(txn, recipe_id, category_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(category))
}

async fn remove_recipe_category(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (recipe_id, category_id) = path.into_inner();
    authorize_owner(&caller, &state, recipe_id).await?;

    with_txn(&state, move |txn| {
        Box::pin(async move {
            Ok(recipes::remove_category(txn, recipe_id, category_id).await?)
        })
    })
    .await?;

    Ok(detail(format!(
        "Category with ID {category_id} has been removed from recipe with ID {recipe_id}."
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/recipes")
            .route(web::get().to(list_recipes))
            .route(web::post().to(create_recipe)),
    )
    .service(web::resource("/recipes/user/{user_id}").route(web::get().to(list_user_recipes)))
    .service(
        web::resource("/recipes/{id}")
            .route(web::get().to(get_recipe))
            .route(web::put().to(update_recipe))
            .route(web::delete().to(delete_recipe)),
    )
    .service(
        web::resource("/recipes/{id}/ingredients").route(web::get().to(list_recipe_ingredients)),
    )
    .service(
        web::resource("/recipes/{id}/ingredients/{ingredient_id}")
            .route(web::put().to(set_recipe_ingredient))
            .route(web::delete().to(remove_recipe_ingredient)),
    )
    .service(
        web::resource("/recipes/{id}/categories").route(web::get().to(list_recipe_categories)),
    )
    .service(
        web::resource("/recipes/{id}/categories/{category_id}")
            .route(web::put().to(add_recipe_category))
            .route(web::delete().to(remove_recipe_category)),
    );
}
