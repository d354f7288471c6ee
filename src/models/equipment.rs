//! Equipment (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};

/// Equipment categories. Serialized with the slugs the storefront uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Tractors,
    TillageEquipment,
    SeedingEquipment,
    LandscapeEquipment,
    CropProtection,
    HarvestEquipment,
    PostHarvest,
    Haulage,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tractors => "tractors",
            Category::TillageEquipment => "tillageEquipment",
            Category::SeedingEquipment => "seedingEquipment",
            Category::LandscapeEquipment => "landscapeEquipment",
            Category::CropProtection => "cropProtection",
            Category::HarvestEquipment => "harvestEquipment",
            Category::PostHarvest => "postHarvest",
            Category::Haulage => "haulage",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tractors" => Ok(Category::Tractors),
            "tillageEquipment" => Ok(Category::TillageEquipment),
            "seedingEquipment" => Ok(Category::SeedingEquipment),
            "landscapeEquipment" => Ok(Category::LandscapeEquipment),
            "cropProtection" => Ok(Category::CropProtection),
            "harvestEquipment" => Ok(Category::HarvestEquipment),
            "postHarvest" => Ok(Category::PostHarvest),
            "haulage" => Ok(Category::Haulage),
            _ => Err(format!("Invalid equipment category: {}", s)),
        }
    }
}

// SQLx conversion: categories are stored as their slug text
impl sqlx::Type<Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Category {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Equipment record. Read-only for clients: the catalog is browsed and
/// booked against, never mutated through this API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Purchase price, whole rupees
    pub price: i64,
    /// Rental price per day, whole rupees
    pub rental_price: i64,
    pub category: Category,
    /// Image path served by the storefront
    pub image: String,
    pub in_stock: bool,
    /// Promotional placement on the home page
    #[serde(default)]
    pub featured: bool,
}

/// Catalog search parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentQuery {
    /// Free-text search over name and description, case-insensitive
    pub q: Option<String>,
    /// Category slug; absent or "all" means no category filter
    pub category: Option<String>,
}

impl EquipmentQuery {
    /// Resolve the category filter, treating "all" the same as absent.
    /// An unknown slug is a validation error rather than an empty result.
    pub fn parsed_category(&self) -> Result<Option<Category>, String> {
        match self.category.as_deref() {
            None | Some("all") | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}
