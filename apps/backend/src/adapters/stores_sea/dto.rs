//! DTOs for stores_sea adapter.

#[derive(Debug, Clone)]
pub struct StoreCreate {
    pub name: String,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

/// `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}
