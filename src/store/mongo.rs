use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use tracing::instrument;

use super::{
    ItemStore, NameTotal, SortDirection, SortField, StoreError, StoreResult, UpdateOutcome,
};
use crate::config::{Config, DEFAULT_DATABASE};
use crate::item::{Item, ItemPatch, NewItem};

const APP_NAME: &str = "items-api";

/// MongoDB-backed item store, cheap to clone and share across handlers
#[derive(Clone)]
pub struct MongoItemStore {
    client: Client,
    database: Database,
    collection: Collection<Item>,
}

impl MongoItemStore {
    /// Build the client from configuration and check that the server answers.
    ///
    /// A malformed connection string is an error. An unreachable server is
    /// not: the failure is logged and the store is returned anyway, so the
    /// process keeps serving and requests fail individually until the
    /// database comes back.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
        options.app_name = Some(APP_NAME.to_string());

        let database_name = config
            .mongodb_database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)?;
        let store = Self::new(client, &database_name, &config.mongodb_collection);

        match store.ping().await {
            Ok(()) => tracing::info!(
                "Connected to MongoDB database: {} (collection: {})",
                database_name,
                config.mongodb_collection
            ),
            Err(e) => tracing::error!("Error connecting to the database: {}", e),
        }

        Ok(store)
    }

    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection::<Item>(collection);
        Self {
            client,
            database,
            collection,
        }
    }

    #[cfg(test)]
    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    /// `$set` body holding only the supplied fields
    fn set_document(patch: &ItemPatch) -> Document {
        let mut set = Document::new();
        if let Some(name) = &patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(quantity) = patch.quantity {
            set.insert("quantity", quantity);
        }
        set
    }

    async fn find_all(&self, filter: Document) -> StoreResult<Vec<Item>> {
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = self.find_all(doc! {}).await?;
        tracing::debug!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self, item))]
    async fn insert_one(&self, item: NewItem) -> StoreResult<Item> {
        let item = item.into_item()?;
        self.collection.insert_one(&item).await?;

        tracing::debug!("Inserted item with id: {}", item.id);
        Ok(item)
    }

    #[instrument(skip(self, items), fields(batch = items.len()))]
    async fn insert_many(&self, items: Vec<NewItem>) -> StoreResult<Vec<Item>> {
        let items = items
            .into_iter()
            .map(NewItem::into_item)
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Ok(items);
        }

        self.collection.insert_many(&items).await?;

        tracing::debug!("Inserted {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Item>> {
        self.find_all(doc! { "name": name }).await
    }

    #[instrument(skip(self))]
    async fn find_by_quantity_greater_than(&self, threshold: i64) -> StoreResult<Vec<Item>> {
        self.find_all(doc! { "quantity": { "$gt": threshold } }).await
    }

    #[instrument(skip(self))]
    async fn list_sorted(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> StoreResult<Vec<Item>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { field.key(): direction.as_i32() })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(&self, id: ObjectId, patch: ItemPatch) -> StoreResult<Option<Item>> {
        patch.check()?;

        // An empty $set is rejected by the server
        if patch.is_empty() {
            return Ok(self.collection.find_one(Self::by_id(id)).await?);
        }

        let updated = self
            .collection
            .find_one_and_update(Self::by_id(id), doc! { "$set": Self::set_document(&patch) })
            .return_document(ReturnDocument::After)
            .await?;

        tracing::debug!("Updated item {}: found={}", id, updated.is_some());
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn set_quantity_by_id(&self, id: ObjectId, quantity: i64) -> StoreResult<UpdateOutcome> {
        ItemPatch::quantity(quantity).check()?;

        let result = self
            .collection
            .update_one(Self::by_id(id), doc! { "$set": { "quantity": quantity } })
            .await?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<Option<Item>> {
        Ok(self.collection.find_one_and_delete(Self::by_id(id)).await?)
    }

    #[instrument(skip(self))]
    async fn delete_many_by_quantity_less_than(&self, threshold: i64) -> StoreResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quantity": { "$lt": threshold } })
            .await?;

        tracing::debug!("Deleted {} items with quantity < {}", result.deleted_count, threshold);
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> StoreResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn group_by_name_sum(&self) -> StoreResult<Vec<NameTotal>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$name", "totalQuantity": { "$sum": "$quantity" } } },
            doc! { "$sort": { "_id": 1 } },
        ];

        let cursor = self.collection.aggregate(pipeline).await?;
        Ok(cursor.with_type::<NameTotal>().try_collect().await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
