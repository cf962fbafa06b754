//! Cached read accessors for public pages.
//!
//! Every public page renders through these accessors. Each one memoizes its
//! result in the tagged store under the tags that the matching mutations
//! invalidate, and recovers from a backend read failure by returning an
//! empty list: public pages render with whatever data is available and never
//! surface errors.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::cache::{CacheKey, CachedValue, TaggedStore};
use crate::cache::tags::ResourceKind;
use crate::domain::entities::{
    CategoryRecord, JobOpeningRecord, ProductRecord, StatisticRecord, TestimonialRecord,
};

use super::repos::{
    CategoriesRepo, JobsRepo, ProductsRepo, StatisticsRepo, TestimonialsRepo,
};

#[derive(Clone)]
pub struct CachedReads {
    store: Arc<TaggedStore>,
    enabled: bool,
    categories: Arc<dyn CategoriesRepo>,
    products: Arc<dyn ProductsRepo>,
    jobs: Arc<dyn JobsRepo>,
    testimonials: Arc<dyn TestimonialsRepo>,
    statistics: Arc<dyn StatisticsRepo>,
}

impl CachedReads {
    pub fn new(
        store: Arc<TaggedStore>,
        enabled: bool,
        categories: Arc<dyn CategoriesRepo>,
        products: Arc<dyn ProductsRepo>,
        jobs: Arc<dyn JobsRepo>,
        testimonials: Arc<dyn TestimonialsRepo>,
        statistics: Arc<dyn StatisticsRepo>,
    ) -> Self {
        Self {
            store,
            enabled,
            categories,
            products,
            jobs,
            testimonials,
            statistics,
        }
    }

    /// Active categories in display order.
    pub async fn active_categories(&self) -> Vec<CategoryRecord> {
        if self.enabled
            && let Some(CachedValue::Categories(rows)) = self.store.get(&CacheKey::ActiveCategories)
        {
            return rows;
        }

        let rows = match self.categories.list_categories(true).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, accessor = "active_categories", "read failed; rendering empty");
                return Vec::new();
            }
        };

        if self.enabled {
            self.store.set(
                CacheKey::ActiveCategories,
                CachedValue::Categories(rows.clone()),
                ResourceKind::Categories.tags(None),
            );
        }
        rows
    }

    /// Active products of one category in display order.
    pub async fn products_for_category(&self, category_id: Uuid) -> Vec<ProductRecord> {
        let key = CacheKey::ProductsForCategory(category_id);
        if self.enabled
            && let Some(CachedValue::Products(rows)) = self.store.get(&key)
        {
            return rows;
        }

        let rows = match self.products.list_products(Some(category_id), true).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(
                    %error,
                    %category_id,
                    accessor = "products_for_category",
                    "read failed; rendering empty"
                );
                return Vec::new();
            }
        };

        if self.enabled {
            self.store.set(
                key,
                CachedValue::Products(rows.clone()),
                ResourceKind::Products.tags(Some(category_id)),
            );
        }
        rows
    }

    /// Open job openings in display order.
    pub async fn open_jobs(&self) -> Vec<JobOpeningRecord> {
        if self.enabled
            && let Some(CachedValue::Jobs(rows)) = self.store.get(&CacheKey::OpenJobs)
        {
            return rows;
        }

        let rows = match self.jobs.list_jobs(true).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, accessor = "open_jobs", "read failed; rendering empty");
                return Vec::new();
            }
        };

        if self.enabled {
            self.store.set(
                CacheKey::OpenJobs,
                CachedValue::Jobs(rows.clone()),
                ResourceKind::Jobs.tags(None),
            );
        }
        rows
    }

    /// Published testimonials in display order.
    pub async fn published_testimonials(&self) -> Vec<TestimonialRecord> {
        if self.enabled
            && let Some(CachedValue::Testimonials(rows)) =
                self.store.get(&CacheKey::PublishedTestimonials)
        {
            return rows;
        }

        let rows = match self.testimonials.list_testimonials(true).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, accessor = "published_testimonials", "read failed; rendering empty");
                return Vec::new();
            }
        };

        if self.enabled {
            self.store.set(
                CacheKey::PublishedTestimonials,
                CachedValue::Testimonials(rows.clone()),
                ResourceKind::Testimonials.tags(None),
            );
        }
        rows
    }

    /// Headline statistics for the home and about pages.
    pub async fn statistics(&self) -> Vec<StatisticRecord> {
        if self.enabled
            && let Some(CachedValue::Statistics(rows)) = self.store.get(&CacheKey::Statistics)
        {
            return rows;
        }

        let rows = match self.statistics.list_statistics().await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, accessor = "statistics", "read failed; rendering empty");
                return Vec::new();
            }
        };

        if self.enabled {
            self.store.set(
                CacheKey::Statistics,
                CachedValue::Statistics(rows.clone()),
                ResourceKind::Statistics.tags(None),
            );
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::application::repos::RepoError;
    use crate::cache::tags::CacheTag;

    struct CountingCategories {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingCategories {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CategoriesRepo for CountingCategories {
        async fn list_categories(
            &self,
            _active_only: bool,
        ) -> Result<Vec<CategoryRecord>, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepoError::Persistence("connection refused".to_string()));
            }
            Ok(vec![CategoryRecord {
                id: Uuid::new_v4(),
                slug: "pumps".to_string(),
                name: "Pumps".to_string(),
                description: None,
                sort_order: 0,
                active: true,
                created_at: OffsetDateTime::now_utc(),
                updated_at: OffsetDateTime::now_utc(),
            }])
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
            Ok(None)
        }
    }

    struct EmptyProducts;

    #[async_trait]
    impl ProductsRepo for EmptyProducts {
        async fn list_products(
            &self,
            _category_id: Option<Uuid>,
            _active_only: bool,
        ) -> Result<Vec<ProductRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<ProductRecord>, RepoError> {
            Ok(None)
        }
    }

    struct EmptyJobs;

    #[async_trait]
    impl JobsRepo for EmptyJobs {
        async fn list_jobs(&self, _open_only: bool) -> Result<Vec<JobOpeningRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<JobOpeningRecord>, RepoError> {
            Ok(None)
        }
    }

    struct EmptyTestimonials;

    #[async_trait]
    impl TestimonialsRepo for EmptyTestimonials {
        async fn list_testimonials(
            &self,
            _published_only: bool,
        ) -> Result<Vec<TestimonialRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<TestimonialRecord>, RepoError> {
            Ok(None)
        }
    }

    struct EmptyStatistics;

    #[async_trait]
    impl StatisticsRepo for EmptyStatistics {
        async fn list_statistics(&self) -> Result<Vec<StatisticRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<StatisticRecord>, RepoError> {
            Ok(None)
        }
    }

    fn reads_with_categories(categories: Arc<CountingCategories>) -> (CachedReads, Arc<TaggedStore>) {
        let store = Arc::new(TaggedStore::new());
        let reads = CachedReads::new(
            store.clone(),
            true,
            categories,
            Arc::new(EmptyProducts),
            Arc::new(EmptyJobs),
            Arc::new(EmptyTestimonials),
            Arc::new(EmptyStatistics),
        );
        (reads, store)
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let categories = Arc::new(CountingCategories::new(false));
        let (reads, _store) = reads_with_categories(categories.clone());

        let first = reads.active_categories().await;
        let second = reads.active_categories().await;

        assert_eq!(first, second);
        assert_eq!(categories.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidation_forces_a_fresh_read() {
        let categories = Arc::new(CountingCategories::new(false));
        let (reads, store) = reads_with_categories(categories.clone());

        reads.active_categories().await;
        store.invalidate_tag(&CacheTag::Categories);
        reads.active_categories().await;

        assert_eq!(categories.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn read_failure_renders_empty_and_is_not_cached() {
        let categories = Arc::new(CountingCategories::new(true));
        let (reads, store) = reads_with_categories(categories.clone());

        assert!(reads.active_categories().await.is_empty());
        assert!(!store.contains(&CacheKey::ActiveCategories));

        // Next read hits the backend again rather than a cached empty result.
        reads.active_categories().await;
        assert_eq!(categories.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_reads_through() {
        let categories = Arc::new(CountingCategories::new(false));
        let store = Arc::new(TaggedStore::new());
        let reads = CachedReads::new(
            store.clone(),
            false,
            categories.clone(),
            Arc::new(EmptyProducts),
            Arc::new(EmptyJobs),
            Arc::new(EmptyTestimonials),
            Arc::new(EmptyStatistics),
        );

        reads.active_categories().await;
        reads.active_categories().await;

        assert_eq!(categories.calls.load(Ordering::SeqCst), 2);
        assert!(store.is_empty());
    }
}
