use uuid::Uuid;

use crate::domain::entities::{
    CategoryRecord, JobOpeningRecord, ProductRecord, TestimonialRecord,
};

/// A record that participates in drag-and-drop ordering.
///
/// `partition_key` scopes the ordering: products order within their category,
/// jobs and testimonials order globally. A reorder submission only ever
/// covers entities sharing one partition key, so the persistence layer never
/// has to reason about cross-partition consistency.
pub trait OrderedEntity {
    fn entity_id(&self) -> Uuid;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, sort_order: i32);
    fn partition_key(&self) -> Option<Uuid> {
        None
    }
}

impl OrderedEntity for ProductRecord {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    fn partition_key(&self) -> Option<Uuid> {
        Some(self.category_id)
    }
}

impl OrderedEntity for CategoryRecord {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}

impl OrderedEntity for JobOpeningRecord {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}

impl OrderedEntity for TestimonialRecord {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}
