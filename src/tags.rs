//! Company tags.
//!
//! Tags are assigned to VMs and used as filters on groups. A group's filters
//! limit its members to VMs carrying a matching tag: within one category any
//! of the group's tags will do, and every category the group filters on must
//! be matched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A tag within a category, e.g. `department/finance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub category: String,
    pub name: String,
}

impl Tag {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Whether `tags` pass the tag `filters` of a group.
///
/// No filters means no restriction.
pub fn matches_filters(filters: &[Tag], tags: &[Tag]) -> bool {
    let mut by_category: BTreeMap<&str, Vec<&Tag>> = BTreeMap::new();
    for filter in filters {
        by_category
            .entry(filter.category.as_str())
            .or_default()
            .push(filter);
    }
    by_category
        .values()
        .all(|wanted| wanted.iter().any(|filter| tags.contains(filter)))
}
