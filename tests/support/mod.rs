//! In-memory repository doubles shared by the integration tests.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use vetrina::application::repos::{
    ApplicationsRepo, CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, CreateJobParams,
    CreateProductParams, CreateTestimonialParams, JobsRepo, JobsWriteRepo, MessagesRepo,
    NewApplicationParams, NewMessageParams, ProductsRepo, ProductsWriteRepo, RepoError,
    StatisticsRepo, StatisticsWriteRepo, TestimonialsRepo, TestimonialsWriteRepo,
    UpdateCategoryParams, UpdateJobParams, UpdateProductParams, UpdateStatisticParams,
    UpdateTestimonialParams,
};
use vetrina::domain::entities::{
    ApplicationRecord, CategoryRecord, JobOpeningRecord, MessageRecord, ProductRecord,
    StatisticRecord, TestimonialRecord,
};
use vetrina::domain::types::ApplicationStatus;

/// In-memory stand-in for the Postgres repositories.
///
/// Read calls are counted so tests can tell a cache hit from a fresh fetch,
/// and `fail_writes` turns every write into a persistence error.
#[derive(Default)]
pub struct InMemoryRepos {
    pub categories: Mutex<Vec<CategoryRecord>>,
    pub products: Mutex<Vec<ProductRecord>>,
    pub jobs: Mutex<Vec<JobOpeningRecord>>,
    pub testimonials: Mutex<Vec<TestimonialRecord>>,
    pub statistics: Mutex<Vec<StatisticRecord>>,
    pub messages: Mutex<Vec<MessageRecord>>,
    pub applications: Mutex<Vec<ApplicationRecord>>,
    pub category_reads: AtomicUsize,
    pub product_reads: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl InMemoryRepos {
    pub fn seed_category(&self, slug: &str) -> CategoryRecord {
        let mut rows = self.categories.lock().expect("categories lock");
        let record = CategoryRecord {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            name: slug.to_string(),
            description: None,
            sort_order: rows.len() as i32,
            active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        record
    }

    pub fn seed_product(&self, category_id: Uuid, slug: &str) -> ProductRecord {
        let mut rows = self.products.lock().expect("products lock");
        let in_category = rows
            .iter()
            .filter(|p| p.category_id == category_id)
            .count();
        let record = ProductRecord {
            id: Uuid::new_v4(),
            category_id,
            slug: slug.to_string(),
            name: slug.to_string(),
            summary: "summary".to_string(),
            description: None,
            image_url: None,
            sort_order: in_category as i32,
            active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        record
    }

    pub fn category_reads(&self) -> usize {
        self.category_reads.load(Ordering::SeqCst)
    }

    pub fn product_reads(&self) -> usize {
        self.product_reads.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoriesRepo for InMemoryRepos {
    async fn list_categories(&self, active_only: bool) -> Result<Vec<CategoryRecord>, RepoError> {
        self.category_reads.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<CategoryRecord> = self
            .categories
            .lock()
            .expect("categories lock")
            .iter()
            .filter(|c| !active_only || c.active)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.sort_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        Ok(self
            .categories
            .lock()
            .expect("categories lock")
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl CategoriesWriteRepo for InMemoryRepos {
    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.categories.lock().expect("categories lock");
        let record = CategoryRecord {
            id: Uuid::new_v4(),
            slug: params.slug,
            name: params.name,
            description: params.description,
            sort_order: rows.len() as i32,
            active: params.active,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update_category(
        &self,
        params: UpdateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.categories.lock().expect("categories lock");
        let row = rows
            .iter_mut()
            .find(|c| c.id == params.id)
            .ok_or(RepoError::NotFound)?;
        row.slug = params.slug;
        row.name = params.name;
        row.description = params.description;
        row.active = params.active;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn set_category_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<CategoryRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.categories.lock().expect("categories lock");
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepoError::NotFound)?;
        row.active = active;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.categories.lock().expect("categories lock");
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_categories(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.categories.lock().expect("categories lock");
        for (position, id) in ordered_ids.iter().enumerate() {
            let row = rows
                .iter_mut()
                .find(|c| c.id == *id)
                .ok_or_else(|| RepoError::Integrity {
                    message: format!("unknown category id {id}"),
                })?;
            row.sort_order = position as i32;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductsRepo for InMemoryRepos {
    async fn list_products(
        &self,
        category_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<ProductRecord> = self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .filter(|p| !active_only || p.active)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.sort_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError> {
        Ok(self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

#[async_trait]
impl ProductsWriteRepo for InMemoryRepos {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.products.lock().expect("products lock");
        let in_category = rows
            .iter()
            .filter(|p| p.category_id == params.category_id)
            .count();
        let record = ProductRecord {
            id: Uuid::new_v4(),
            category_id: params.category_id,
            slug: params.slug,
            name: params.name,
            summary: params.summary,
            description: params.description,
            image_url: params.image_url,
            sort_order: in_category as i32,
            active: params.active,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.products.lock().expect("products lock");
        let row = rows
            .iter_mut()
            .find(|p| p.id == params.id)
            .ok_or(RepoError::NotFound)?;
        row.category_id = params.category_id;
        row.slug = params.slug;
        row.name = params.name;
        row.summary = params.summary;
        row.description = params.description;
        row.image_url = params.image_url;
        row.active = params.active;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn set_product_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<ProductRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.products.lock().expect("products lock");
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        row.active = active;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.products.lock().expect("products lock");
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_products(
        &self,
        category_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.products.lock().expect("products lock");
        for (position, id) in ordered_ids.iter().enumerate() {
            // Mirrors the scoped UPDATE: an id outside the category is an
            // integrity error, not a silent cross-partition write.
            let row = rows
                .iter_mut()
                .find(|p| p.id == *id && p.category_id == category_id)
                .ok_or_else(|| RepoError::Integrity {
                    message: format!("product {id} is not in category {category_id}"),
                })?;
            row.sort_order = position as i32;
        }
        Ok(())
    }
}

#[async_trait]
impl JobsRepo for InMemoryRepos {
    async fn list_jobs(&self, open_only: bool) -> Result<Vec<JobOpeningRecord>, RepoError> {
        let mut rows: Vec<JobOpeningRecord> = self
            .jobs
            .lock()
            .expect("jobs lock")
            .iter()
            .filter(|j| !open_only || j.open)
            .cloned()
            .collect();
        rows.sort_by_key(|j| j.sort_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobOpeningRecord>, RepoError> {
        Ok(self
            .jobs
            .lock()
            .expect("jobs lock")
            .iter()
            .find(|j| j.id == id)
            .cloned())
    }
}

#[async_trait]
impl JobsWriteRepo for InMemoryRepos {
    async fn create_job(&self, params: CreateJobParams) -> Result<JobOpeningRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.jobs.lock().expect("jobs lock");
        let record = JobOpeningRecord {
            id: Uuid::new_v4(),
            title: params.title,
            department: params.department,
            location: params.location,
            employment_type: params.employment_type,
            description: params.description,
            sort_order: rows.len() as i32,
            open: params.open,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update_job(&self, params: UpdateJobParams) -> Result<JobOpeningRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.jobs.lock().expect("jobs lock");
        let row = rows
            .iter_mut()
            .find(|j| j.id == params.id)
            .ok_or(RepoError::NotFound)?;
        row.title = params.title;
        row.department = params.department;
        row.location = params.location;
        row.employment_type = params.employment_type;
        row.description = params.description;
        row.open = params.open;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn set_job_open(&self, id: Uuid, open: bool) -> Result<JobOpeningRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.jobs.lock().expect("jobs lock");
        let row = rows
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(RepoError::NotFound)?;
        row.open = open;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.jobs.lock().expect("jobs lock");
        let before = rows.len();
        rows.retain(|j| j.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_jobs(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.jobs.lock().expect("jobs lock");
        for (position, id) in ordered_ids.iter().enumerate() {
            let row = rows
                .iter_mut()
                .find(|j| j.id == *id)
                .ok_or_else(|| RepoError::Integrity {
                    message: format!("unknown job id {id}"),
                })?;
            row.sort_order = position as i32;
        }
        Ok(())
    }
}

#[async_trait]
impl TestimonialsRepo for InMemoryRepos {
    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        let mut rows: Vec<TestimonialRecord> = self
            .testimonials
            .lock()
            .expect("testimonials lock")
            .iter()
            .filter(|t| !published_only || t.published)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.sort_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TestimonialRecord>, RepoError> {
        Ok(self
            .testimonials
            .lock()
            .expect("testimonials lock")
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }
}

#[async_trait]
impl TestimonialsWriteRepo for InMemoryRepos {
    async fn create_testimonial(
        &self,
        params: CreateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.testimonials.lock().expect("testimonials lock");
        let record = TestimonialRecord {
            id: Uuid::new_v4(),
            author: params.author,
            company: params.company,
            quote: params.quote,
            sort_order: rows.len() as i32,
            published: params.published,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update_testimonial(
        &self,
        params: UpdateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.testimonials.lock().expect("testimonials lock");
        let row = rows
            .iter_mut()
            .find(|t| t.id == params.id)
            .ok_or(RepoError::NotFound)?;
        row.author = params.author;
        row.company = params.company;
        row.quote = params.quote;
        row.published = params.published;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn set_testimonial_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<TestimonialRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.testimonials.lock().expect("testimonials lock");
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepoError::NotFound)?;
        row.published = published;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.testimonials.lock().expect("testimonials lock");
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_testimonials(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.testimonials.lock().expect("testimonials lock");
        for (position, id) in ordered_ids.iter().enumerate() {
            let row = rows
                .iter_mut()
                .find(|t| t.id == *id)
                .ok_or_else(|| RepoError::Integrity {
                    message: format!("unknown testimonial id {id}"),
                })?;
            row.sort_order = position as i32;
        }
        Ok(())
    }
}

#[async_trait]
impl StatisticsRepo for InMemoryRepos {
    async fn list_statistics(&self) -> Result<Vec<StatisticRecord>, RepoError> {
        let mut rows: Vec<StatisticRecord> = self
            .statistics
            .lock()
            .expect("statistics lock")
            .clone();
        rows.sort_by_key(|s| s.sort_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StatisticRecord>, RepoError> {
        Ok(self
            .statistics
            .lock()
            .expect("statistics lock")
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }
}

#[async_trait]
impl StatisticsWriteRepo for InMemoryRepos {
    async fn update_statistic(
        &self,
        params: UpdateStatisticParams,
    ) -> Result<StatisticRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.statistics.lock().expect("statistics lock");
        let row = rows
            .iter_mut()
            .find(|s| s.id == params.id)
            .ok_or(RepoError::NotFound)?;
        row.label = params.label;
        row.value = params.value;
        row.suffix = params.suffix;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }
}

#[async_trait]
impl MessagesRepo for InMemoryRepos {
    async fn insert_message(&self, params: NewMessageParams) -> Result<MessageRecord, RepoError> {
        self.check_writable()?;
        let record = MessageRecord {
            id: Uuid::new_v4(),
            name: params.name,
            email: params.email,
            subject: params.subject,
            body: params.body,
            read: false,
            created_at: OffsetDateTime::now_utc(),
        };
        self.messages
            .lock()
            .expect("messages lock")
            .push(record.clone());
        Ok(record)
    }

    async fn list_messages(&self) -> Result<Vec<MessageRecord>, RepoError> {
        let mut rows = self.messages.lock().expect("messages lock").clone();
        rows.sort_by_key(|m| std::cmp::Reverse(m.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MessageRecord>, RepoError> {
        Ok(self
            .messages
            .lock()
            .expect("messages lock")
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn set_message_read(&self, id: Uuid, read: bool) -> Result<MessageRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.messages.lock().expect("messages lock");
        let row = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepoError::NotFound)?;
        row.read = read;
        Ok(row.clone())
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.messages.lock().expect("messages lock");
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ApplicationsRepo for InMemoryRepos {
    async fn insert_application(
        &self,
        params: NewApplicationParams,
    ) -> Result<ApplicationRecord, RepoError> {
        self.check_writable()?;
        let record = ApplicationRecord {
            id: Uuid::new_v4(),
            job_id: params.job_id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            cover_letter: params.cover_letter,
            resume_url: params.resume_url,
            status: ApplicationStatus::Received,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        self.applications
            .lock()
            .expect("applications lock")
            .push(record.clone());
        Ok(record)
    }

    async fn list_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationRecord>, RepoError> {
        let mut rows: Vec<ApplicationRecord> = self
            .applications
            .lock()
            .expect("applications lock")
            .iter()
            .filter(|a| job_id.is_none_or(|id| a.job_id == id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| std::cmp::Reverse(a.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, RepoError> {
        Ok(self
            .applications
            .lock()
            .expect("applications lock")
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepoError> {
        self.check_writable()?;
        let mut rows = self.applications.lock().expect("applications lock");
        let row = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepoError::NotFound)?;
        row.status = status;
        row.updated_at = OffsetDateTime::now_utc();
        Ok(row.clone())
    }

    async fn delete_application(&self, id: Uuid) -> Result<(), RepoError> {
        self.check_writable()?;
        let mut rows = self.applications.lock().expect("applications lock");
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
