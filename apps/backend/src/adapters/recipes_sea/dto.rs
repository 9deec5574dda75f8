//! DTOs for recipes_sea adapter.

#[derive(Debug, Clone)]
pub struct RecipeCreate {
    pub user_id: i64,
    pub name: String,
    pub cook_time_sec: Option<i32>,
    pub prep_time_sec: Option<i32>,
    pub non_blocking_time_sec: Option<i32>,
    pub servings: Option<i32>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub cook_time_sec: Option<i32>,
    pub prep_time_sec: Option<i32>,
    pub non_blocking_time_sec: Option<i32>,
    pub servings: Option<i32>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

/// Amount of an ingredient used by a recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientAmount {
    pub amount_grams: Option<f64>,
    pub amount_readable: Option<String>,
}
