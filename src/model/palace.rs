use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ordered slot in a memory palace: a place and what the user anchored
/// to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locus {
    pub label: String,
    pub note: String,
}

/// A user-created memory palace: a named, ordered walk of loci. Pure data;
/// no unlock logic attaches to palaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryPalace {
    pub id: Uuid,
    pub name: String,
    pub created_at: i64,
    pub loci: Vec<Locus>,
}

impl MemoryPalace {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now().timestamp(),
            loci: Vec::new(),
        }
    }
}
