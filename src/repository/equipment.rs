//! Equipment store: read-only catalog access.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::equipment::{Category, Equipment},
};

/// Read accessors over the equipment catalog. The front end never mutates
/// the catalog, so there is no write side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Equipment>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;
    async fn list_by_category(&self, category: Category) -> AppResult<Vec<Equipment>>;
    async fn list_featured(&self) -> AppResult<Vec<Equipment>>;
}

// ---------------------------------------------------------------------------
// Fixture implementation
// ---------------------------------------------------------------------------

/// The built-in catalog, also used as the degraded-mode fallback when the
/// primary store is unreachable.
static FIXTURE_EQUIPMENT: Lazy<Vec<Equipment>> = Lazy::new(|| {
    fn record(
        id: i32,
        name: &str,
        description: &str,
        price: i64,
        rental_price: i64,
        category: Category,
        image: &str,
        featured: bool,
    ) -> Equipment {
        Equipment {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            rental_price,
            category,
            image: image.to_string(),
            in_stock: true,
            featured,
        }
    }

    vec![
        record(
            1,
            "John Deere 5050D Tractor",
            "A powerful 50 HP tractor perfect for medium to large farms. Features a durable design and excellent fuel efficiency.",
            780_000,
            1_200,
            Category::Tractors,
            "/images/tractor.png",
            true,
        ),
        record(
            2,
            "Mahindra 475 DI Tractor",
            "42 HP tractor with excellent performance for various farming applications. Comes with power steering and adjustable seat.",
            650_000,
            1_000,
            Category::Tractors,
            "/images/tractor.png",
            false,
        ),
        record(
            3,
            "Sonalika Disc Harrow",
            "16-disc heavy-duty harrow for effective soil preparation. Adjustable angle for different soil conditions.",
            85_000,
            500,
            Category::TillageEquipment,
            "/images/tillage.png",
            true,
        ),
        record(
            4,
            "VST Shakti Power Weeder",
            "Efficient power weeder for weed control in row crops. Reduces labor costs and improves crop yield.",
            45_000,
            300,
            Category::TillageEquipment,
            "/images/tillage.png",
            false,
        ),
        record(
            5,
            "Kubota Rice Transplanter",
            "4-row rice transplanter with high accuracy and speed. Perfect for small to medium rice farms.",
            250_000,
            1_500,
            Category::SeedingEquipment,
            "/images/seeding.png",
            true,
        ),
        record(
            6,
            "Kisan Kraft Seed Drill",
            "Multi-crop seed drill suitable for various seeds. Ensures uniform seed placement and optimal germination.",
            70_000,
            600,
            Category::SeedingEquipment,
            "/images/seeding.png",
            false,
        ),
        record(
            7,
            "TAFE Riding Lawn Mower",
            "Efficient riding mower for landscape maintenance. Features adjustable cutting height and comfortable seat.",
            120_000,
            800,
            Category::LandscapeEquipment,
            "/images/landscape.png",
            false,
        ),
        record(
            8,
            "Honda Brush Cutter",
            "Powerful brush cutter for clearing tough vegetation. Comes with multiple attachments for versatile use.",
            18_000,
            200,
            Category::LandscapeEquipment,
            "/images/landscape.png",
            true,
        ),
        record(
            9,
            "Aspee Tractor Sprayer",
            "High-capacity tractor-mounted sprayer for efficient pest control. Features adjustable nozzles and pressure control.",
            45_000,
            400,
            Category::CropProtection,
            "/images/seeding.png",
            false,
        ),
        record(
            10,
            "Tirth Agro Rotavator",
            "Heavy-duty rotavator for effective soil preparation. Suitable for various soil types and conditions.",
            95_000,
            700,
            Category::TillageEquipment,
            "/images/tillage.png",
            false,
        ),
        record(
            11,
            "Claas Crop Tiger Harvester",
            "Compact and efficient combine harvester for wheat, rice, and other crops. Reduces harvest time significantly.",
            1_500_000,
            3_000,
            Category::HarvestEquipment,
            "/images/seeding.png",
            true,
        ),
        record(
            12,
            "Kartar Tractor Trailer",
            "Durable hydraulic trailer for efficient transport of farm produce. Features tipping mechanism for easy unloading.",
            120_000,
            500,
            Category::Haulage,
            "/images/tillage.png",
            false,
        ),
    ]
});

/// In-memory catalog serving the built-in dataset
#[derive(Clone, Default)]
pub struct FixtureEquipmentRepository;

impl FixtureEquipmentRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EquipmentRepository for FixtureEquipmentRepository {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        Ok(FIXTURE_EQUIPMENT.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        Ok(FIXTURE_EQUIPMENT.iter().find(|e| e.id == id).cloned())
    }

    async fn list_by_category(&self, category: Category) -> AppResult<Vec<Equipment>> {
        Ok(FIXTURE_EQUIPMENT
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect())
    }

    async fn list_featured(&self) -> AppResult<Vec<Equipment>> {
        Ok(FIXTURE_EQUIPMENT
            .iter()
            .filter(|e| e.featured)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgEquipmentRepository {
    pool: Pool<Postgres>,
}

impl PgEquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_category(&self, category: Category) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE category = $1 ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_featured(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE featured = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
