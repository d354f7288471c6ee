//! Catalog service: equipment browsing, filtering, and the degraded-mode
//! fallback to the built-in dataset.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Category, Equipment},
    repository::equipment::{EquipmentRepository, FixtureEquipmentRepository},
};

#[derive(Clone)]
pub struct CatalogService {
    primary: Arc<dyn EquipmentRepository>,
    fixture: FixtureEquipmentRepository,
    fallback_to_fixture: bool,
}

impl CatalogService {
    pub fn new(primary: Arc<dyn EquipmentRepository>, fallback_to_fixture: bool) -> Self {
        Self {
            primary,
            fixture: FixtureEquipmentRepository::new(),
            fallback_to_fixture,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        match self.primary.list().await {
            Ok(equipment) => Ok(equipment),
            Err(e) => self.fall_back(e, "list").await?.list().await,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let found = match self.primary.get_by_id(id).await {
            Ok(found) => found,
            Err(e) => self.fall_back(e, "get_by_id").await?.get_by_id(id).await?,
        };
        found.ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn list_by_category(&self, category: Category) -> AppResult<Vec<Equipment>> {
        match self.primary.list_by_category(category).await {
            Ok(equipment) => Ok(equipment),
            Err(e) => {
                self.fall_back(e, "list_by_category")
                    .await?
                    .list_by_category(category)
                    .await
            }
        }
    }

    pub async fn list_featured(&self) -> AppResult<Vec<Equipment>> {
        match self.primary.list_featured().await {
            Ok(equipment) => Ok(equipment),
            Err(e) => self.fall_back(e, "list_featured").await?.list_featured().await,
        }
    }

    /// Filter the catalog by free text and category. The text match is a
    /// case-insensitive substring test against name or description; a
    /// category restricts results to exact matches. No ranking is applied,
    /// so results stay in catalog order.
    pub async fn search(
        &self,
        query: Option<&str>,
        category: Option<Category>,
    ) -> AppResult<Vec<Equipment>> {
        let base = match category {
            Some(c) => self.list_by_category(c).await?,
            None => self.list().await?,
        };

        let needle = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return Ok(base),
        };

        Ok(base
            .into_iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Degraded mode: when the primary store errors and fallback is enabled,
    /// serve the built-in dataset so the catalog is never empty. The failure
    /// is logged, not surfaced.
    async fn fall_back(
        &self,
        error: AppError,
        operation: &str,
    ) -> AppResult<&FixtureEquipmentRepository> {
        if !self.fallback_to_fixture {
            return Err(error);
        }
        tracing::warn!(
            operation,
            error = %error,
            "Primary equipment store failed, serving built-in catalog"
        );
        Ok(&self.fixture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::equipment::MockEquipmentRepository;

    fn fixture_catalog() -> CatalogService {
        CatalogService::new(Arc::new(FixtureEquipmentRepository::new()), true)
    }

    fn failing_repository() -> MockEquipmentRepository {
        let mut mock = MockEquipmentRepository::new();
        mock.expect_list()
            .returning(|| Err(AppError::Internal("store unreachable".to_string())));
        mock.expect_get_by_id()
            .returning(|_| Err(AppError::Internal("store unreachable".to_string())));
        mock.expect_list_by_category()
            .returning(|_| Err(AppError::Internal("store unreachable".to_string())));
        mock.expect_list_featured()
            .returning(|| Err(AppError::Internal("store unreachable".to_string())));
        mock
    }

    #[tokio::test]
    async fn search_without_filters_returns_whole_catalog() {
        let catalog = fixture_catalog();
        let all = catalog.list().await.unwrap();
        let searched = catalog.search(None, None).await.unwrap();
        assert_eq!(searched.len(), all.len());
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let catalog = fixture_catalog();
        let upper = catalog.search(Some("TRACTOR"), None).await.unwrap();
        let lower = catalog.search(Some("tractor"), None).await.unwrap();
        assert!(!upper.is_empty());
        let upper_ids: Vec<i32> = upper.iter().map(|e| e.id).collect();
        let lower_ids: Vec<i32> = lower.iter().map(|e| e.id).collect();
        assert_eq!(upper_ids, lower_ids);
    }

    #[tokio::test]
    async fn search_matches_description_too() {
        let catalog = fixture_catalog();
        // "germination" only appears in the seed drill description
        let results = catalog.search(Some("germination"), None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Kisan Kraft Seed Drill");
    }

    #[tokio::test]
    async fn category_filter_returns_only_that_category() {
        let catalog = fixture_catalog();
        let results = catalog
            .search(None, Some(Category::Tractors))
            .await
            .unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|e| e.category == Category::Tractors));
    }

    #[tokio::test]
    async fn text_and_category_filters_intersect() {
        let catalog = fixture_catalog();
        // "soil" matches tillage descriptions but not the tractor records
        let results = catalog
            .search(Some("soil"), Some(Category::Tractors))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn featured_returns_flagged_records_only() {
        let catalog = fixture_catalog();
        let featured = catalog.list_featured().await.unwrap();
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|e| e.featured));
    }

    #[tokio::test]
    async fn failing_primary_falls_back_to_fixture() {
        let catalog = CatalogService::new(Arc::new(failing_repository()), true);
        let list = catalog.list().await.unwrap();
        assert!(!list.is_empty());
        let one = catalog.get_by_id(1).await.unwrap();
        assert_eq!(one.id, 1);
    }

    #[tokio::test]
    async fn fallback_disabled_surfaces_the_error() {
        let catalog = CatalogService::new(Arc::new(failing_repository()), false);
        assert!(catalog.list().await.is_err());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let catalog = fixture_catalog();
        let err = catalog.get_by_id(9999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
