//! Inventory persistence.
//!
//! One table of food items keyed by name. Mutations never fail on a missing
//! or duplicate name: they report `false` ("nothing changed") and leave the
//! table untouched, so callers decide whether that is worth telling the user.

pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use shelflife_calendar::JalaliDate;
use shelflife_inventory::{FoodItem, ItemName};

pub use in_memory::InMemoryInventoryStore;
pub use sqlite::SqliteInventoryStore;

/// Storage failure (never raised for missing or duplicate names).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A persisted row no longer decodes into a valid item.
    #[error("corrupt row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable mapping from item name to (id, expiry date).
///
/// Every call commits before it returns. Implementations serialise writes, so
/// a read always observes the last completed mutation.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    /// Insert a new item. Returns `false` (and changes nothing) if the name is
    /// already taken.
    async fn add_item(&self, name: &ItemName, expiry_date: JalaliDate)
    -> Result<bool, StoreError>;

    /// All items in id order.
    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError>;

    async fn get_item(&self, name: &ItemName) -> Result<Option<FoodItem>, StoreError>;

    /// Rename `current` to `new_name`. Returns `false` if `current` does not
    /// exist or another item already uses `new_name`.
    async fn rename_item(&self, current: &ItemName, new_name: &ItemName)
    -> Result<bool, StoreError>;

    /// Replace the expiry date. Returns `false` if `name` does not exist.
    async fn update_expiry(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError>;

    /// Remove the item. Returns `false` if `name` does not exist.
    async fn delete_item(&self, name: &ItemName) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn add_item(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        (**self).add_item(name, expiry_date).await
    }

    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError> {
        (**self).list_items().await
    }

    async fn get_item(&self, name: &ItemName) -> Result<Option<FoodItem>, StoreError> {
        (**self).get_item(name).await
    }

    async fn rename_item(
        &self,
        current: &ItemName,
        new_name: &ItemName,
    ) -> Result<bool, StoreError> {
        (**self).rename_item(current, new_name).await
    }

    async fn update_expiry(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        (**self).update_expiry(name, expiry_date).await
    }

    async fn delete_item(&self, name: &ItemName) -> Result<bool, StoreError> {
        (**self).delete_item(name).await
    }
}

/// Behaviour every store implementation must share; run against each backend.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use shelflife_core::Entity;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn date(s: &str) -> JalaliDate {
        s.parse().unwrap()
    }

    pub async fn distinct_inserts_are_all_listed(store: &dyn InventoryStore) {
        assert!(store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap());
        assert!(store.add_item(&name("Eggs"), date("1402/6/1")).await.unwrap());
        assert!(store.add_item(&name("milk"), date("1402/7/2")).await.unwrap());

        let items = store.list_items().await.unwrap();
        let listed: Vec<(String, String)> = items
            .iter()
            .map(|i| (i.name().to_string(), i.expiry_date().to_string()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("Milk".to_string(), "1402/5/16".to_string()),
                ("Eggs".to_string(), "1402/6/1".to_string()),
                ("milk".to_string(), "1402/7/2".to_string()),
            ]
        );

        let ids: Vec<i64> = items.iter().map(|i| i.id().get()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    pub async fn duplicate_insert_is_ignored(store: &dyn InventoryStore) {
        assert!(store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap());
        let before = store.list_items().await.unwrap();

        assert!(!store.add_item(&name("Milk"), date("1403/1/1")).await.unwrap());

        let after = store.list_items().await.unwrap();
        assert_eq!(before, after);
    }

    pub async fn rename_and_update_edit_in_place(store: &dyn InventoryStore) {
        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        let original = store.get_item(&name("Milk")).await.unwrap().unwrap();

        assert!(store.rename_item(&name("Milk"), &name("Oat milk")).await.unwrap());
        assert!(store.get_item(&name("Milk")).await.unwrap().is_none());

        assert!(store.update_expiry(&name("Oat milk"), date("1402/6/10")).await.unwrap());
        let edited = store.get_item(&name("Oat milk")).await.unwrap().unwrap();
        assert_eq!(edited.id(), original.id());
        assert_eq!(edited.expiry_date(), date("1402/6/10"));
    }

    pub async fn edits_on_missing_names_are_no_ops(store: &dyn InventoryStore) {
        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        let before = store.list_items().await.unwrap();

        assert!(!store.rename_item(&name("Bread"), &name("Toast")).await.unwrap());
        assert!(!store.update_expiry(&name("Bread"), date("1402/6/1")).await.unwrap());
        assert!(!store.delete_item(&name("Bread")).await.unwrap());

        assert_eq!(before, store.list_items().await.unwrap());
    }

    pub async fn rename_onto_taken_name_is_ignored(store: &dyn InventoryStore) {
        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        store.add_item(&name("Eggs"), date("1402/6/1")).await.unwrap();
        let before = store.list_items().await.unwrap();

        assert!(!store.rename_item(&name("Milk"), &name("Eggs")).await.unwrap());
        assert_eq!(before, store.list_items().await.unwrap());

        // Renaming to itself touches the row but changes nothing visible.
        assert!(store.rename_item(&name("Milk"), &name("Milk")).await.unwrap());
        assert_eq!(before, store.list_items().await.unwrap());
    }

    pub async fn delete_removes_exactly_one_row(store: &dyn InventoryStore) {
        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        store.add_item(&name("Eggs"), date("1402/6/1")).await.unwrap();
        store.add_item(&name("Bread"), date("1402/5/20")).await.unwrap();

        assert!(store.delete_item(&name("Eggs")).await.unwrap());

        assert!(store.get_item(&name("Eggs")).await.unwrap().is_none());
        let remaining: Vec<String> = store
            .list_items()
            .await
            .unwrap()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(remaining, vec!["Milk".to_string(), "Bread".to_string()]);
    }

    pub async fn ids_are_not_reused_after_delete(store: &dyn InventoryStore) {
        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        let first = store.get_item(&name("Milk")).await.unwrap().unwrap();
        store.delete_item(&name("Milk")).await.unwrap();

        store.add_item(&name("Milk"), date("1402/5/16")).await.unwrap();
        let second = store.get_item(&name("Milk")).await.unwrap().unwrap();
        assert!(second.id() > first.id());
    }
}
