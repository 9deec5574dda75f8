//! DTOs for ingredients_sea adapter.

#[derive(Debug, Clone)]
pub struct IngredientCreate {
    pub name: String,
    pub description: Option<String>,
    pub recipe_id: Option<i64>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub recipe_id: Option<i64>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}
