use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{
    ItemStore, NameTotal, SortDirection, SortField, StoreError, StoreResult, UpdateOutcome,
};
use crate::item::{Item, ItemPatch, NewItem};

/// In-memory stand-in for the MongoDB store, used by handler tests.
/// Items are kept in insertion order, matching MongoDB's natural order on a
/// fresh collection.
#[derive(Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
    unreachable: bool,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails as if the server were down
    pub fn unreachable() -> Self {
        Self {
            items: RwLock::default(),
            unreachable: true,
        }
    }

    fn check_reachable(&self) -> StoreResult<()> {
        if self.unreachable {
            return Err(StoreError::Unavailable(
                "server selection timeout: no available servers".to_string(),
            ));
        }
        Ok(())
    }

    async fn filtered(&self, predicate: impl Fn(&Item) -> bool) -> StoreResult<Vec<Item>> {
        self.check_reachable()?;
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| predicate(item)).cloned().collect())
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        self.filtered(|_| true).await
    }

    async fn insert_one(&self, item: NewItem) -> StoreResult<Item> {
        self.check_reachable()?;
        let item = item.into_item()?;
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn insert_many(&self, items: Vec<NewItem>) -> StoreResult<Vec<Item>> {
        self.check_reachable()?;
        let items = items
            .into_iter()
            .map(NewItem::into_item)
            .collect::<Result<Vec<_>, _>>()?;
        self.items.write().await.extend(items.iter().cloned());
        Ok(items)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Item>> {
        self.filtered(|item| item.name == name).await
    }

    async fn find_by_quantity_greater_than(&self, threshold: i64) -> StoreResult<Vec<Item>> {
        self.filtered(|item| item.quantity > threshold).await
    }

    async fn list_sorted(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> StoreResult<Vec<Item>> {
        let mut items = self.list().await?;
        items.sort_by(|a, b| {
            let ordering = match field {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Quantity => a.quantity.cmp(&b.quantity),
                SortField::Id => a.id.bytes().cmp(&b.id.bytes()),
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(items)
    }

    async fn update_by_id(&self, id: ObjectId, patch: ItemPatch) -> StoreResult<Option<Item>> {
        self.check_reachable()?;
        patch.check()?;

        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn set_quantity_by_id(&self, id: ObjectId, quantity: i64) -> StoreResult<UpdateOutcome> {
        self.check_reachable()?;
        let patch = ItemPatch::quantity(quantity);
        patch.check()?;

        let mut items = self.items.write().await;
        Ok(match items.iter_mut().find(|item| item.id == id) {
            Some(item) => UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(patch.apply(item)),
            },
            None => UpdateOutcome::default(),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<Option<Item>> {
        self.check_reachable()?;
        let mut items = self.items.write().await;
        Ok(items
            .iter()
            .position(|item| item.id == id)
            .map(|index| items.remove(index)))
    }

    async fn delete_many_by_quantity_less_than(&self, threshold: i64) -> StoreResult<u64> {
        self.check_reachable()?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.quantity >= threshold);
        Ok((before - items.len()) as u64)
    }

    async fn count_all(&self) -> StoreResult<u64> {
        self.check_reachable()?;
        Ok(self.items.read().await.len() as u64)
    }

    async fn group_by_name_sum(&self) -> StoreResult<Vec<NameTotal>> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for item in self.list().await? {
            *totals.entry(item.name).or_default() += item.quantity;
        }
        Ok(totals
            .into_iter()
            .map(|(name, total_quantity)| NameTotal {
                name,
                total_quantity,
            })
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_reachable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(items: &[(&str, i64)]) -> InMemoryItemStore {
        let store = InMemoryItemStore::new();
        store
            .insert_many(
                items
                    .iter()
                    .map(|(name, quantity)| NewItem::new(*name, *quantity))
                    .collect(),
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_invalid_batch_writes_nothing() {
        let store = seeded(&[("Apple", 2)]).await;

        let result = store
            .insert_many(vec![NewItem::new("Kiwi", 3), NewItem::new("Fig", 0)])
            .await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_quantity_thresholds_are_strict() {
        let store = seeded(&[("Pear", 3), ("Melon", 5), ("Lemon", 7)]).await;

        let above = store.find_by_quantity_greater_than(5).await.unwrap();
        assert_eq!(above.len(), 1);
        assert_eq!(above[0].name, "Lemon");

        assert_eq!(store.delete_many_by_quantity_less_than(5).await.unwrap(), 1);
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Melon", "Lemon"]);
    }

    #[tokio::test]
    async fn test_set_quantity_counts() {
        let store = seeded(&[("Pear", 3)]).await;
        let id = store.list().await.unwrap()[0].id;

        let outcome = store.set_quantity_by_id(id, 20).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 1 });

        let outcome = store.set_quantity_by_id(id, 20).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 0 });

        let outcome = store.set_quantity_by_id(ObjectId::new(), 20).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::default());

        assert!(store.set_quantity_by_id(id, 0).await.is_err());
        assert_eq!(store.list().await.unwrap()[0].quantity, 20);
    }

    #[tokio::test]
    async fn test_sorted_descending_by_quantity() {
        let store = seeded(&[("Pear", 3), ("Melon", 5), ("Lemon", 7)]).await;

        let sorted = store
            .list_sorted(SortField::Quantity, SortDirection::Descending)
            .await
            .unwrap();
        let quantities: Vec<i64> = sorted.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![7, 5, 3]);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_every_call() {
        let store = InMemoryItemStore::unreachable();

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(store.list().await.is_err());
        assert!(store.insert_one(NewItem::new("Apple", 1)).await.is_err());
        assert!(store.group_by_name_sum().await.is_err());
    }
}
