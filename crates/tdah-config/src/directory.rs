//! Student directory limits.

use serde::{Deserialize, Serialize};
use tdah_core::paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PagingLimits};

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

const fn default_search_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Page size when the caller omits `page_size`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest accepted `page_size`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Maximum rows returned by the global email search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            search_limit: default_search_limit(),
        }
    }
}

impl DirectoryConfig {
    #[must_use]
    pub const fn paging_limits(&self) -> PagingLimits {
        PagingLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}
