//! Domain entities. Pure data structures for the core business.
//!
//! No UI or storage types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persistable record type. `id` absent means "not yet persisted";
/// once the store assigns one it is stable and unique within the type.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Entity kind, for log and prompt labels.
    const KIND: &'static str;

    fn id(&self) -> Option<i32>;

    fn set_id(&mut self, id: i32);
}

/// An organizational department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<i32>,
    pub name: String,
}

impl Department {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
        }
    }
}

impl Default for Department {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Department {
    const KIND: &'static str = "department";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// A seller. Holds its department by value (identity, not ownership):
/// the referenced department must already exist in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub base_salary: f64,
    pub department: Department,
}

impl Seller {
    /// A fresh, unsaved seller with all fields at defaults.
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            birth_date: None,
            base_salary: 0.0,
            department: Department::new(),
        }
    }
}

impl Default for Seller {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Seller {
    const KIND: &'static str = "seller";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}
