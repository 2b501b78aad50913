use std::fmt;

use crate::storage::{Page, VacationFilter};

/// Where a cached value lives and how it is invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheScope {
    /// Standalone key with its own TTL, invalidated by deleting the key.
    Entity,
    /// Member of a named bucket sharing one TTL, invalidated by dropping the
    /// whole bucket.
    Collection { bucket: String },
}

/// A derived cache key together with its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    key: String,
    scope: CacheScope,
}

impl CacheKey {
    fn entity(key: String) -> Self {
        Self {
            key,
            scope: CacheScope::Entity,
        }
    }

    fn collection(key: String, bucket: String) -> Self {
        Self {
            key,
            scope: CacheScope::Collection { bucket },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn scope(&self) -> &CacheScope {
        &self.scope
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// A single step of write invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Delete one scalar key.
    Key(String),
    /// Delete a bucket and every member in it.
    Bucket(String),
}

/// Derives cache keys for every cacheable query shape.
///
/// Every key is prefixed with the configured namespace so several
/// deployments can share one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    namespace: String,
}

impl CacheKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `{ns}:employee_cache:{id}`
    pub fn employee(&self, id: i64) -> CacheKey {
        CacheKey::entity(format!("{}:employee_cache:{}", self.namespace, id))
    }

    /// `{ns}:employees:{offset}:{limit}`
    ///
    /// Employee pages are scalar keys and only ever expire through TTL.
    pub fn employee_page(&self, page: Page) -> CacheKey {
        CacheKey::entity(format!(
            "{}:employees:{}:{}",
            self.namespace, page.offset, page.limit
        ))
    }

    /// `{ns}:vacation_cache:{id}`
    pub fn vacation(&self, id: i64) -> CacheKey {
        CacheKey::entity(format!("{}:vacation_cache:{}", self.namespace, id))
    }

    /// `{ns}:vacations:{approved}:{offset}:{limit}`, stored in the vacation
    /// bucket. An unset filter renders as `any`.
    pub fn vacation_page(&self, filter: VacationFilter, page: Page) -> CacheKey {
        let approved = match filter.approved {
            Some(true) => "true",
            Some(false) => "false",
            None => "any",
        };
        CacheKey::collection(
            format!(
                "{}:vacations:{}:{}:{}",
                self.namespace, approved, page.offset, page.limit
            ),
            self.vacation_bucket(),
        )
    }

    /// `{ns}:pending:vacations:{offset}:{limit}`, stored in the vacation bucket.
    pub fn pending_vacation_page(&self, page: Page) -> CacheKey {
        CacheKey::collection(
            format!(
                "{}:pending:vacations:{}:{}",
                self.namespace, page.offset, page.limit
            ),
            self.vacation_bucket(),
        )
    }

    /// Bucket holding every cached vacation list.
    pub fn vacation_bucket(&self) -> String {
        format!("{}:vacations", self.namespace)
    }

    /// Invalidations after an employee update or delete.
    pub fn employee_changed(&self, id: i64) -> Vec<Invalidation> {
        vec![Invalidation::Key(self.employee(id).key)]
    }

    /// Invalidations after any vacation mutation.
    pub fn vacation_changed(&self, id: i64) -> Vec<Invalidation> {
        vec![
            Invalidation::Key(self.vacation(id).key),
            Invalidation::Bucket(self.vacation_bucket()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn keys() -> CacheKeys {
        CacheKeys::new("ns")
    }

    #[test]
    fn test_employee_key() {
        let key = keys().employee(42);
        assert_eq!(key.as_str(), "ns:employee_cache:42");
        assert_eq!(key.scope(), &CacheScope::Entity);
    }

    #[test]
    fn test_employee_page_key() {
        let key = keys().employee_page(Page::new(20, 10));
        assert_eq!(key.as_str(), "ns:employees:20:10");
        assert_eq!(key.scope(), &CacheScope::Entity);
    }

    #[test]
    fn test_vacation_key() {
        let key = keys().vacation(7);
        assert_eq!(key.as_str(), "ns:vacation_cache:7");
        assert_eq!(key.scope(), &CacheScope::Entity);
    }

    #[test]
    fn test_vacation_page_key_renders_filter() {
        let page = Page::new(0, 10);

        assert_eq!(
            keys()
                .vacation_page(VacationFilter::approved(true), page)
                .as_str(),
            "ns:vacations:true:0:10"
        );
        assert_eq!(
            keys()
                .vacation_page(VacationFilter::approved(false), page)
                .as_str(),
            "ns:vacations:false:0:10"
        );
        assert_eq!(
            keys()
                .vacation_page(VacationFilter::default(), page)
                .as_str(),
            "ns:vacations:any:0:10"
        );
    }

    #[test]
    fn test_list_keys_belong_to_vacation_bucket() {
        let expected = CacheScope::Collection {
            bucket: "ns:vacations".to_string(),
        };

        assert_eq!(
            keys()
                .vacation_page(VacationFilter::default(), Page::default())
                .scope(),
            &expected
        );
        assert_eq!(
            keys().pending_vacation_page(Page::new(5, 5)).scope(),
            &expected
        );
        assert_eq!(
            keys().pending_vacation_page(Page::new(5, 5)).as_str(),
            "ns:pending:vacations:5:5"
        );
    }

    #[test]
    fn test_keys_are_deterministic() {
        assert_eq!(keys().employee(1), keys().employee(1));
        assert_eq!(
            keys().vacation_page(VacationFilter::approved(true), Page::new(3, 4)),
            keys().vacation_page(VacationFilter::approved(true), Page::new(3, 4))
        );
    }

    #[test]
    fn test_distinct_queries_never_collide() {
        let k = keys();
        let filters = [
            VacationFilter::default(),
            VacationFilter::approved(true),
            VacationFilter::approved(false),
        ];
        let pages = [Page::new(0, 10), Page::new(10, 0), Page::new(1, 1)];

        let mut derived = Vec::new();
        for id in [0, 1, 10, 42] {
            derived.push(k.employee(id).to_string());
            derived.push(k.vacation(id).to_string());
        }
        for page in pages {
            derived.push(k.employee_page(page).to_string());
            derived.push(k.pending_vacation_page(page).to_string());
            for filter in filters {
                derived.push(k.vacation_page(filter, page).to_string());
            }
        }

        let unique: HashSet<_> = derived.iter().collect();
        assert_eq!(unique.len(), derived.len());
    }

    #[test]
    fn test_namespace_separates_deployments() {
        assert_ne!(
            CacheKeys::new("a").employee(1),
            CacheKeys::new("b").employee(1)
        );
    }

    #[test]
    fn test_employee_changed_targets_scalar_key_only() {
        assert_eq!(
            keys().employee_changed(42),
            vec![Invalidation::Key("ns:employee_cache:42".to_string())]
        );
    }

    #[test]
    fn test_vacation_changed_targets_key_and_bucket() {
        assert_eq!(
            keys().vacation_changed(3),
            vec![
                Invalidation::Key("ns:vacation_cache:3".to_string()),
                Invalidation::Bucket("ns:vacations".to_string()),
            ]
        );
    }
}
