use std::sync::{Arc, RwLock};

use shelflife_calendar::JalaliDate;
use shelflife_core::ItemId;
use shelflife_inventory::{FoodItem, ItemName};

use super::{InventoryStore, StoreError};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    items: Vec<FoodItem>,
}

/// In-memory inventory store for tests/dev.
///
/// Same semantics as the SQLite store: ids start at 1, are never reused, and
/// listing follows insertion order.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<State>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn add_item(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        let mut state = self.inner.write().map_err(poisoned)?;
        if state.items.iter().any(|item| item.name() == name) {
            return Ok(false);
        }
        state.last_id += 1;
        let id = ItemId::new(state.last_id);
        state.items.push(FoodItem::new(id, name.clone(), expiry_date));
        Ok(true)
    }

    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.items.clone())
    }

    async fn get_item(&self, name: &ItemName) -> Result<Option<FoodItem>, StoreError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.items.iter().find(|item| item.name() == name).cloned())
    }

    async fn rename_item(
        &self,
        current: &ItemName,
        new_name: &ItemName,
    ) -> Result<bool, StoreError> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let Some(index) = state.items.iter().position(|item| item.name() == current) else {
            return Ok(false);
        };
        let taken = state
            .items
            .iter()
            .enumerate()
            .any(|(i, item)| i != index && item.name() == new_name);
        if taken {
            return Ok(false);
        }
        state.items[index].set_name(new_name.clone());
        Ok(true)
    }

    async fn update_expiry(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        let mut state = self.inner.write().map_err(poisoned)?;
        match state.items.iter_mut().find(|item| item.name() == name) {
            Some(item) => {
                item.set_expiry_date(expiry_date);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_item(&self, name: &ItemName) -> Result<bool, StoreError> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let before = state.items.len();
        state.items.retain(|item| item.name() != name);
        Ok(state.items.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[tokio::test]
    async fn distinct_inserts_are_all_listed() {
        contract::distinct_inserts_are_all_listed(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn duplicate_insert_is_ignored() {
        contract::duplicate_insert_is_ignored(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn rename_and_update_edit_in_place() {
        contract::rename_and_update_edit_in_place(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn edits_on_missing_names_are_no_ops() {
        contract::edits_on_missing_names_are_no_ops(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn rename_onto_taken_name_is_ignored() {
        contract::rename_onto_taken_name_is_ignored(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        contract::delete_removes_exactly_one_row(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        contract::ids_are_not_reused_after_delete(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let store = InMemoryInventoryStore::arc();
        let handle = store.clone();
        let name = ItemName::new("Milk").unwrap();

        handle.add_item(&name, "1402/5/16".parse().unwrap()).await.unwrap();
        assert!(store.get_item(&name).await.unwrap().is_some());
    }
}
