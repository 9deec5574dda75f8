//! DTOs for categories_sea adapter.

#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}
