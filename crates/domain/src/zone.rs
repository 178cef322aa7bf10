use crate::names;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: i64,
    /// Origin without the trailing dot, as NetBox stores it.
    pub name: Arc<str>,
    pub view_id: i64,
    pub default_ttl: Option<u32>,
}

impl Zone {
    pub fn new(id: i64, name: &str, view_id: i64) -> Self {
        Self {
            id,
            name: Arc::from(names::normalize(name)),
            view_id,
            default_ttl: None,
        }
    }

    pub fn with_default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    pub fn is_origin(&self, qname: &str) -> bool {
        names::normalize(qname) == self.name.as_ref()
    }

    /// True when `qname` is the origin or any name below it.
    pub fn contains_name(&self, qname: &str) -> bool {
        names::is_subdomain(qname, &self.name)
    }
}
