use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contribution standard of one city, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct City {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "佛山")]
    pub city_name: String,

    #[schema(example = "2024")]
    pub year: String,

    #[schema(example = 1900.0)]
    pub base_min: f64,

    #[schema(example = 26421.0)]
    pub base_max: f64,

    #[schema(example = 0.15)]
    pub rate: f64,
}

/// City row parsed from a spreadsheet, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewCity {
    pub city_name: String,
    pub year: String,
    pub base_min: f64,
    pub base_max: f64,
    pub rate: f64,
}

impl NewCity {
    pub fn with_id(self, id: u64) -> City {
        City {
            id,
            city_name: self.city_name,
            year: self.year,
            base_min: self.base_min,
            base_max: self.base_max,
            rate: self.rate,
        }
    }
}
