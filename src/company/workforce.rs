//! Production workforce. Workers are hired as needed and never laid off.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Workforce {
    workers: u32,
}

impl Workforce {
    pub fn new(workers: u32) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> u32 {
        self.workers
    }

    /// Workforce after hiring `hires` additional workers
    pub fn with_hires(&self, hires: u32) -> Self {
        Self {
            workers: self.workers.saturating_add(hires),
        }
    }
}
