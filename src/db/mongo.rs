//! MongoDB client and collection wrapper

use bson::{doc, oid::ObjectId, Document};
use mongodb::{
    options::{IndexOptions, UpdateModifications},
    results::UpdateResult,
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::types::AlumnetError;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AlumnetError> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| AlumnetError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        // Verify connection with timeout
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AlumnetError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>, AlumnetError>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Ping the server. Used by the /test diagnostics endpoint.
    pub async fn ping(&self) -> Result<(), AlumnetError> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AlumnetError::Database(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    /// List collection names in the database
    pub async fn list_collection_names(&self) -> Result<Vec<String>, AlumnetError> {
        self.client
            .database(&self.db_name)
            .list_collection_names()
            .await
            .map_err(|e| AlumnetError::Database(format!("List collections failed: {}", e)))
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    /// Create a new collection and apply indexes
    pub async fn new(
        client: &Client,
        db_name: &str,
        collection_name: &str,
    ) -> Result<Self, AlumnetError> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        // Apply indexes
        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<(), AlumnetError> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| AlumnetError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, returning its store-assigned identifier
    pub async fn insert_one(&self, item: T) -> Result<ObjectId, AlumnetError> {
        let result = self
            .inner
            .insert_one(item)
            .await
            .map_err(|e| AlumnetError::Database(format!("Insert failed: {}", e)))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AlumnetError::Database("Failed to get inserted ID".into()))
    }

    /// Insert, distinguishing a unique-index conflict from other failures.
    ///
    /// Returns `Ok(None)` when the insert lost a race against a concurrent
    /// insert of the same unique key; the caller re-reads instead.
    pub async fn insert_one_unique(&self, item: T) -> Result<Option<ObjectId>, AlumnetError> {
        match self.inner.insert_one(item).await {
            Ok(result) => result
                .inserted_id
                .as_object_id()
                .map(Some)
                .ok_or_else(|| AlumnetError::Database("Failed to get inserted ID".into())),
            Err(e) if is_duplicate_key(&e) => Ok(None),
            Err(e) => Err(AlumnetError::Database(format!("Insert failed: {}", e))),
        }
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, AlumnetError> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| AlumnetError::Database(format!("Find failed: {}", e)))
    }

    /// Find up to `limit` documents by filter, in storage order
    pub async fn find_many(
        &self,
        filter: Document,
        limit: Option<i64>,
    ) -> Result<Vec<T>, AlumnetError> {
        use futures_util::StreamExt;

        let mut find = self.inner.find(filter);
        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        let cursor = find
            .await
            .map_err(|e| AlumnetError::Database(format!("Find failed: {}", e)))?;

        let results: Vec<T> = cursor
            .filter_map(|doc| async {
                match doc {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    /// Update one document
    pub async fn update_one(
        &self,
        filter: Document,
        update: impl Into<UpdateModifications>,
    ) -> Result<UpdateResult, AlumnetError> {
        self.inner
            .update_one(filter, update.into())
            .await
            .map_err(|e| AlumnetError::Database(format!("Update failed: {}", e)))
    }

    /// Get the underlying collection for advanced operations
    pub fn inner(&self) -> &Collection<T> {
        &self.inner
    }
}

/// E11000: the insert violated a unique index
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would require a running MongoDB instance;
    // filter and merge-document construction is covered in the services tests.
}
