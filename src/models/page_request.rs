use serde::{Deserialize, Serialize};

use crate::config::PAGE_SIZE;

/// A 1-based page of a user listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Page numbers below 1 are clamped to the first page.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            size: PAGE_SIZE,
        }
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}
