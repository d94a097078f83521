//! In-memory contact collection.
//!
//! Records keep insertion order. Ids come from a counter that starts at 1 and
//! only moves forward, so a deleted id is never handed out again for the
//! lifetime of the store. Lookups are linear scans.

use tracing::debug;

use crate::contact::{Contact, ContactFields};

#[derive(Debug)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    next_id: u64,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// All contacts in insertion order.
    pub fn list_all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Case-insensitive substring match on the name, in collection order.
    pub fn find_by_name(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.matches_name(&needle))
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: u64) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn create(&mut self, fields: ContactFields) -> Contact {
        let id = self.next_id;
        let contact = Contact::new(id, fields);
        self.contacts.push(contact.clone());
        self.next_id += 1;
        debug!(id, total = self.contacts.len(), "contact created");
        contact
    }

    /// Replace the record in place, keeping its position and id.
    pub fn update(&mut self, id: u64, fields: ContactFields) -> Option<Contact> {
        let slot = self.contacts.iter_mut().find(|c| c.id == id)?;
        *slot = Contact::new(id, fields);
        debug!(id, "contact replaced");
        Some(slot.clone())
    }

    pub fn delete(&mut self, id: u64) -> bool {
        if self.get_by_id(id).is_none() {
            return false;
        }
        self.contacts.retain(|c| c.id != id);
        debug!(id, total = self.contacts.len(), "contact removed");
        true
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ContactFields {
        ContactFields::new(name, "123", format!("{}@x.com", name.to_lowercase()))
    }

    fn ids(store: &ContactStore) -> Vec<u64> {
        store.list_all().iter().map(|c| c.id).collect()
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut store = ContactStore::new();
        let assigned: Vec<u64> = (0..5)
            .map(|i| store.create(fields(&format!("c{i}"))).id)
            .collect();
        assert_eq!(assigned, vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&store), assigned);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = ContactStore::new();
        store.create(fields("a"));
        let b = store.create(fields("b"));
        assert!(store.delete(b.id));
        let c = store.create(fields("c"));
        assert_eq!(c.id, 3);
        assert!(store.delete(1));
        assert!(store.delete(3));
        assert!(store.is_empty());
        assert_eq!(store.create(fields("d")).id, 4);
    }

    #[test]
    fn find_by_name_is_case_insensitive_substring() {
        let mut store = ContactStore::new();
        for name in ["Ana Silva", "Carlos", "Mariana", "ANA"] {
            store.create(fields(name));
        }
        let names: Vec<String> = store
            .find_by_name("ana")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ana Silva", "Mariana", "ANA"]);
        assert!(store.find_by_name("zé").is_empty());
    }

    #[test]
    fn find_by_name_folds_non_ascii() {
        let mut store = ContactStore::new();
        store.create(fields("JOÃO"));
        assert_eq!(store.find_by_name("joão").len(), 1);
    }

    #[test]
    fn create_then_get_round_trips() {
        let mut store = ContactStore::new();
        let input = ContactFields::new("Ana", "123", "a@x.com");
        let created = store.create(input.clone());
        let fetched = store.get_by_id(created.id).expect("stored");
        assert_eq!(fetched, &created);
        assert_eq!(fetched.fields(), input);
    }

    #[test]
    fn get_missing_is_none() {
        let store = ContactStore::new();
        assert!(store.get_by_id(1).is_none());
    }

    #[test]
    fn update_keeps_position_and_id() {
        let mut store = ContactStore::new();
        store.create(fields("a"));
        store.create(fields("b"));
        store.create(fields("c"));
        let updated = store
            .update(2, ContactFields::new("B2", "999", "b2@x.com"))
            .expect("exists");
        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "B2");
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.list_all()[1], updated);
    }

    #[test]
    fn update_missing_leaves_store_untouched() {
        let mut store = ContactStore::new();
        store.create(fields("a"));
        let before = store.list_all().to_vec();
        assert!(store.update(42, fields("z")).is_none());
        assert_eq!(store.list_all(), before.as_slice());
        assert_eq!(store.create(fields("b")).id, 2);
    }

    #[test]
    fn delete_missing_leaves_store_untouched() {
        let mut store = ContactStore::new();
        store.create(fields("a"));
        let before = store.list_all().to_vec();
        assert!(!store.delete(9));
        assert_eq!(store.list_all(), before.as_slice());
    }

    #[test]
    fn create_delete_update_scenario() {
        let mut store = ContactStore::new();
        let a = store.create(fields("A"));
        let b = store.create(fields("B"));
        assert_eq!((a.id, b.id), (1, 2));
        assert!(store.delete(a.id));
        assert_eq!(store.list_all(), &[b.clone()]);
        assert!(store.get_by_id(1).is_none());
        let b2 = store
            .update(2, ContactFields::new("B2", "000", "b2@x.com"))
            .expect("b exists");
        assert_eq!(store.list_all(), &[b2]);
        assert_eq!(store.list_all()[0].id, 2);
    }
}
