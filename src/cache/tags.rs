//! Tag registry: the static mapping from resource kinds to invalidation sets.
//!
//! Every mutation names a [`ResourceKind`]; the registry answers three
//! questions about it: which [`CacheTag`]s group the affected cached reads,
//! which admin paths render the affected grids, and which public paths render
//! the affected content. All three are exhaustive matches over closed enums,
//! so adding a resource kind is a compile-time obligation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed enumeration of content classes managed by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Products,
    Categories,
    Jobs,
    Testimonials,
    Statistics,
    Messages,
    Applications,
}

/// Invalidation-group key for memoized read results.
///
/// Scalar variants cover a whole resource kind; parametric variants narrow
/// the group to one category. A per-category listing registers under both,
/// so a resource-wide invalidation sweeps every listing of that kind while
/// a parametric tag on its own can target a single category. A parametric
/// tag is derivable from the entity id alone, so the write side can compute
/// exactly the tags the read side registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Products,
    ProductsInCategory(Uuid),
    Categories,
    Category(Uuid),
    Jobs,
    Testimonials,
    Statistics,
    Messages,
    Applications,
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheTag::Products => write!(f, "products"),
            CacheTag::ProductsInCategory(id) => write!(f, "products-{id}"),
            CacheTag::Categories => write!(f, "categories"),
            CacheTag::Category(id) => write!(f, "category-{id}"),
            CacheTag::Jobs => write!(f, "jobs"),
            CacheTag::Testimonials => write!(f, "testimonials"),
            CacheTag::Statistics => write!(f, "statistics"),
            CacheTag::Messages => write!(f, "messages"),
            CacheTag::Applications => write!(f, "applications"),
        }
    }
}

impl ResourceKind {
    /// Tags to invalidate when a resource of this kind changes.
    ///
    /// For `Products` the dynamic id is the owning category; for `Categories`
    /// it is the category itself (a category edit also touches the product
    /// listing rendered under it). Other kinds have a resource-wide effect
    /// and ignore the id.
    ///
    /// Invariant: `tags(Some(id))` is always a superset of `tags(None)`.
    pub fn tags(self, dynamic_id: Option<Uuid>) -> HashSet<CacheTag> {
        let mut tags = HashSet::new();
        match self {
            ResourceKind::Products => {
                tags.insert(CacheTag::Products);
                if let Some(category_id) = dynamic_id {
                    tags.insert(CacheTag::ProductsInCategory(category_id));
                }
            }
            ResourceKind::Categories => {
                tags.insert(CacheTag::Categories);
                tags.insert(CacheTag::Products);
                if let Some(category_id) = dynamic_id {
                    tags.insert(CacheTag::Category(category_id));
                    tags.insert(CacheTag::ProductsInCategory(category_id));
                }
            }
            ResourceKind::Jobs => {
                tags.insert(CacheTag::Jobs);
            }
            ResourceKind::Testimonials => {
                tags.insert(CacheTag::Testimonials);
            }
            ResourceKind::Statistics => {
                tags.insert(CacheTag::Statistics);
            }
            ResourceKind::Messages => {
                tags.insert(CacheTag::Messages);
            }
            ResourceKind::Applications => {
                tags.insert(CacheTag::Applications);
            }
        }
        tags
    }

    /// Admin paths whose rendered grids depend on this kind.
    pub fn admin_paths(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Products => &["/admin/products"],
            // A category edit can rename the grouping header on the products grid.
            ResourceKind::Categories => &["/admin/categories", "/admin/products"],
            ResourceKind::Jobs => &["/admin/jobs"],
            ResourceKind::Testimonials => &["/admin/testimonials"],
            ResourceKind::Statistics => &["/admin/statistics"],
            ResourceKind::Messages => &["/admin/messages"],
            ResourceKind::Applications => &["/admin/applications"],
        }
    }

    /// Public paths whose rendered responses depend on this kind.
    ///
    /// Kinds with a dynamic id add the id-specific category listing page.
    /// Messages and applications are admin-only; they render nowhere public.
    pub fn public_paths(self, dynamic_id: Option<Uuid>) -> Vec<String> {
        match self {
            ResourceKind::Products | ResourceKind::Categories => {
                let mut paths = vec!["/".to_string(), "/products".to_string()];
                if let Some(category_id) = dynamic_id {
                    paths.push(format!("/products/{category_id}"));
                }
                paths
            }
            ResourceKind::Jobs => vec!["/".to_string(), "/careers".to_string()],
            ResourceKind::Testimonials | ResourceKind::Statistics => {
                vec!["/".to_string(), "/about".to_string()]
            }
            ResourceKind::Messages | ResourceKind::Applications => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ResourceKind; 7] = [
        ResourceKind::Products,
        ResourceKind::Categories,
        ResourceKind::Jobs,
        ResourceKind::Testimonials,
        ResourceKind::Statistics,
        ResourceKind::Messages,
        ResourceKind::Applications,
    ];

    #[test]
    fn product_tags_with_category() {
        let category = Uuid::new_v4();
        let tags = ResourceKind::Products.tags(Some(category));
        assert!(tags.contains(&CacheTag::Products));
        assert!(tags.contains(&CacheTag::ProductsInCategory(category)));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn category_tags_cascade_to_products() {
        let category = Uuid::new_v4();
        let tags = ResourceKind::Categories.tags(Some(category));
        assert!(tags.contains(&CacheTag::Categories));
        assert!(tags.contains(&CacheTag::Category(category)));
        assert!(tags.contains(&CacheTag::Products));
        assert!(tags.contains(&CacheTag::ProductsInCategory(category)));
    }

    #[test]
    fn entity_tags_are_superset_of_resource_tags() {
        let id = Uuid::new_v4();
        for kind in ALL_KINDS {
            let wide = kind.tags(None);
            let narrow = kind.tags(Some(id));
            assert!(
                wide.is_subset(&narrow),
                "{kind:?}: tags(Some(id)) must cover tags(None)"
            );
        }
    }

    #[test]
    fn scalar_kinds_ignore_dynamic_id() {
        let id = Uuid::new_v4();
        for kind in [
            ResourceKind::Jobs,
            ResourceKind::Testimonials,
            ResourceKind::Statistics,
            ResourceKind::Messages,
            ResourceKind::Applications,
        ] {
            assert_eq!(kind.tags(Some(id)), kind.tags(None));
        }
    }

    #[test]
    fn parametric_tags_render_entity_id() {
        let id = Uuid::nil();
        assert_eq!(
            CacheTag::ProductsInCategory(id).to_string(),
            format!("products-{id}")
        );
        assert_eq!(CacheTag::Category(id).to_string(), format!("category-{id}"));
        assert_eq!(CacheTag::Jobs.to_string(), "jobs");
    }

    #[test]
    fn category_public_paths_include_listing_page() {
        let category = Uuid::new_v4();
        let paths = ResourceKind::Products.public_paths(Some(category));
        assert!(paths.contains(&"/".to_string()));
        assert!(paths.contains(&"/products".to_string()));
        assert!(paths.contains(&format!("/products/{category}")));
    }

    #[test]
    fn inbox_kinds_have_no_public_paths() {
        assert!(ResourceKind::Messages.public_paths(None).is_empty());
        assert!(
            ResourceKind::Applications
                .public_paths(Some(Uuid::new_v4()))
                .is_empty()
        );
    }

    #[test]
    fn every_kind_has_an_admin_path() {
        for kind in ALL_KINDS {
            assert!(!kind.admin_paths().is_empty(), "{kind:?}");
        }
    }
}
