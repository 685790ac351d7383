use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use uuid::Uuid;

use crate::model::{Locus, MemoryPalace};
use crate::storage::{Repository, StorageError};

/// Repository-backed CRUD over the user's memory palaces. Palaces list in
/// creation order; every mutation persists immediately.
pub struct PalaceDirectory {
    repository: Rc<RefCell<Repository>>,
}

impl PalaceDirectory {
    pub fn new(repository: Rc<RefCell<Repository>>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<MemoryPalace>, StorageError> {
        let mut palaces = self.repository.borrow().palaces()?;
        palaces.sort_by_key(|palace| palace.created_at);
        Ok(palaces)
    }

    pub fn create(&mut self, name: &str) -> Result<MemoryPalace, StorageError> {
        let palace = MemoryPalace::new(name);
        debug!(target: "palaces", "Creating palace '{}' ({})", palace.name, palace.id);
        let mut palaces = self.repository.borrow().palaces()?;
        palaces.push(palace.clone());
        self.repository.borrow_mut().put_palaces(&palaces)?;
        Ok(palace)
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<(), StorageError> {
        self.update(id, |palace| palace.name = name.to_string())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), StorageError> {
        let mut palaces = self.repository.borrow().palaces()?;
        palaces.retain(|palace| palace.id != id);
        self.repository.borrow_mut().put_palaces(&palaces)
    }

    pub fn add_locus(&mut self, id: Uuid, label: &str, note: &str) -> Result<(), StorageError> {
        self.update(id, |palace| {
            palace.loci.push(Locus {
                label: label.to_string(),
                note: note.to_string(),
            })
        })
    }

    pub fn remove_locus(&mut self, id: Uuid, index: usize) -> Result<(), StorageError> {
        self.update(id, |palace| {
            if index < palace.loci.len() {
                palace.loci.remove(index);
            }
        })
    }

    /// Move a locus to a new position in the walk.
    pub fn reorder_locus(&mut self, id: Uuid, from: usize, to: usize) -> Result<(), StorageError> {
        self.update(id, |palace| {
            if from < palace.loci.len() && to < palace.loci.len() {
                let locus = palace.loci.remove(from);
                palace.loci.insert(to, locus);
            }
        })
    }

    fn update<F>(&mut self, id: Uuid, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut MemoryPalace),
    {
        let mut palaces = self.repository.borrow().palaces()?;
        if let Some(palace) = palaces.iter_mut().find(|palace| palace.id == id) {
            mutate(palace);
            self.repository.borrow_mut().put_palaces(&palaces)?;
        }
        Ok(())
    }
}
