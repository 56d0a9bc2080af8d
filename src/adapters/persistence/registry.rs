//! Implements EntityStore for both record types over one registry.
//!
//! Records live in id-ordered maps, mirrored to a JSON file after every
//! mutation. A department still referenced by a seller refuses deletion
//! with the integrity signal.

use crate::domain::{Department, Entity, Seller};
use crate::ports::{EntityStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryData {
    departments: BTreeMap<i32, Department>,
    sellers: BTreeMap<i32, Seller>,
}

struct Shared {
    path: Option<PathBuf>,
    data: Mutex<RegistryData>,
}

/// Registry of departments and sellers. Hand out typed store handles
/// with `departments()` / `sellers()`; all handles share this state.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

impl Registry {
    /// Volatile registry. Nothing is written to disk.
    pub fn in_memory() -> Self {
        Self {
            shared: Arc::new(Shared {
                path: None,
                data: Mutex::new(RegistryData::default()),
            }),
        }
    }

    /// Open (or start) a registry backed by the JSON file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s)
                .map_err(|e| StoreError::Backend(format!("parse {}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RegistryData::default(),
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "read {}: {e}",
                    path.display()
                )));
            }
        };
        info!(
            path = %path.display(),
            departments = data.departments.len(),
            sellers = data.sellers.len(),
            "registry opened"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                path: Some(path),
                data: Mutex::new(data),
            }),
        })
    }

    pub fn departments(&self) -> Arc<dyn EntityStore<Department>> {
        Arc::new(DepartmentStore(Arc::clone(&self.shared)))
    }

    pub fn sellers(&self) -> Arc<dyn EntityStore<Seller>> {
        Arc::new(SellerStore(Arc::clone(&self.shared)))
    }
}

impl Shared {
    /// Write-replace: temp file, flush, atomic rename. A crash mid-write
    /// leaves the previous file intact.
    fn save(&self, data: &RegistryData) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| StoreError::Backend(format!("create {}: {e}", dir.display())))?;
            }
        }
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StoreError::Backend(format!("serialize registry: {e}")))?;

        let temp_path = path.with_extension("json.tmp");
        let mut f = std::fs::File::create(&temp_path)
            .map_err(|e| StoreError::Backend(format!("create temp file: {e}")))?;
        f.write_all(json.as_bytes())
            .map_err(|e| StoreError::Backend(format!("write temp file: {e}")))?;
        f.sync_all()
            .map_err(|e| StoreError::Backend(format!("sync temp file: {e}")))?;
        drop(f);

        std::fs::rename(&temp_path, path)
            .map_err(|e| StoreError::Backend(format!("atomic rename failed: {e}")))?;
        Ok(())
    }

    fn with_data<R>(
        &self,
        f: impl FnOnce(&mut RegistryData) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut data)
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut RegistryData) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut data)?;
        self.save(&data)?;
        Ok(result)
    }
}

fn next_key<V>(map: &BTreeMap<i32, V>) -> i32 {
    map.keys().next_back().copied().unwrap_or(0) + 1
}

fn require_id<T: Entity>(entity: &T) -> Result<i32, StoreError> {
    entity
        .id()
        .ok_or_else(|| StoreError::Backend(format!("unsaved {} has no id", T::KIND)))
}

struct DepartmentStore(Arc<Shared>);

impl EntityStore<Department> for DepartmentStore {
    fn find_all(&self) -> Result<Vec<Department>, StoreError> {
        self.0
            .with_data(|data| Ok(data.departments.values().cloned().collect()))
    }

    fn insert(&self, entity: &Department) -> Result<Department, StoreError> {
        self.0.mutate(|data| {
            let id = next_key(&data.departments);
            let mut saved = entity.clone();
            saved.set_id(id);
            data.departments.insert(id, saved.clone());
            Ok(saved)
        })
    }

    fn update(&self, entity: &Department) -> Result<(), StoreError> {
        let id = require_id(entity)?;
        self.0.mutate(|data| {
            if !data.departments.contains_key(&id) {
                return Err(StoreError::NotFound {
                    kind: Department::KIND,
                    id,
                });
            }
            data.departments.insert(id, entity.clone());
            Ok(())
        })
    }

    fn delete(&self, entity: &Department) -> Result<(), StoreError> {
        let id = require_id(entity)?;
        self.0.mutate(|data| {
            if !data.departments.contains_key(&id) {
                return Err(StoreError::NotFound {
                    kind: Department::KIND,
                    id,
                });
            }
            if data
                .sellers
                .values()
                .any(|s| s.department.id == Some(id))
            {
                return Err(StoreError::Integrity(format!(
                    "department {id} is still referenced by a seller"
                )));
            }
            data.departments.remove(&id);
            Ok(())
        })
    }
}

struct SellerStore(Arc<Shared>);

impl EntityStore<Seller> for SellerStore {
    /// Sellers carry their department by value; re-join against the
    /// department table so a renamed department shows its current name.
    fn find_all(&self) -> Result<Vec<Seller>, StoreError> {
        self.0.with_data(|data| {
            Ok(data
                .sellers
                .values()
                .map(|s| {
                    let mut seller = s.clone();
                    if let Some(dept) = s.department.id.and_then(|id| data.departments.get(&id)) {
                        seller.department = dept.clone();
                    }
                    seller
                })
                .collect())
        })
    }

    fn insert(&self, entity: &Seller) -> Result<Seller, StoreError> {
        self.0.mutate(|data| {
            let id = next_key(&data.sellers);
            let mut saved = entity.clone();
            saved.set_id(id);
            data.sellers.insert(id, saved.clone());
            Ok(saved)
        })
    }

    fn update(&self, entity: &Seller) -> Result<(), StoreError> {
        let id = require_id(entity)?;
        self.0.mutate(|data| {
            if !data.sellers.contains_key(&id) {
                return Err(StoreError::NotFound {
                    kind: Seller::KIND,
                    id,
                });
            }
            data.sellers.insert(id, entity.clone());
            Ok(())
        })
    }

    fn delete(&self, entity: &Seller) -> Result<(), StoreError> {
        let id = require_id(entity)?;
        self.0.mutate(|data| {
            if data.sellers.remove(&id).is_none() {
                return Err(StoreError::NotFound {
                    kind: Seller::KIND,
                    id,
                });
            }
            Ok(())
        })
    }
}
