//! # Configuration
//!
//! Settings are loaded with [`confique`] from, in priority order:
//! 1. **Environment variables**: `MEDCENTER_PAGE_SIZE`, `MEDCENTER_SEED_COUNT`, `MEDCENTER_LOG`.
//! 2. **Config file**: a `medcenter.toml` passed explicitly (a missing file is fine).
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `10` | Page length used when a listing does not ask for one |
//! | `seed_count` | `20` | Sample appointments loaded when no data file is given |
//! | `log_filter` | `warn` | Fallback tracing filter when `RUST_LOG` is unset |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::DEFAULT_TOP;

/// Configuration for medcenter, stored in `medcenter.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MedcenterConfig {
    /// Default number of appointments per listed page
    #[config(env = "MEDCENTER_PAGE_SIZE", default = 10)]
    pub page_size: usize,

    /// How many sample appointments to seed the store with
    #[config(env = "MEDCENTER_SEED_COUNT", default = 20)]
    pub seed_count: usize,

    /// Tracing filter directive used when RUST_LOG is not set
    #[config(env = "MEDCENTER_LOG", default = "warn")]
    pub log_filter: String,
}

impl Default for MedcenterConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_TOP,
            seed_count: 20,
            log_filter: "warn".to_string(),
        }
    }
}

impl MedcenterConfig {
    /// Resolve settings from the environment, then `path` if given, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_TOP
        } else {
            self.page_size
        }
    }
}
