use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document, Regex},
    options::ReturnDocument,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{AdvertisementStore, StoreResult};
use crate::modules::advertisements::models::{
    Advertisement, AdvertisementId, AdvertisementPatch, NewAdvertisement, SearchFilter,
};

/// Shape of an advertisement inside the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AdvertisementDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    author: String,
    category: String,
    tags: Vec<String>,
    price: Number,
}

impl AdvertisementDocument {
    fn new(id: ObjectId, new: NewAdvertisement) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            author: new.author,
            category: new.category,
            tags: new.tags,
            price: new.price,
        }
    }
}

impl From<AdvertisementDocument> for Advertisement {
    fn from(document: AdvertisementDocument) -> Self {
        Advertisement {
            id: AdvertisementId::Opaque(document.id.to_hex()),
            title: document.title,
            description: document.description,
            author: document.author,
            category: document.category,
            tags: document.tags,
            price: document.price,
        }
    }
}

/// Store backed by a MongoDB collection. Ids are ObjectIds generated on
/// insert and exposed as 24-character hex strings.
#[derive(Debug, Clone)]
pub struct MongoAdvertisementStore {
    collection: Collection<AdvertisementDocument>,
}

impl MongoAdvertisementStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

fn id_filter(id: &str) -> Option<Document> {
    let id = ObjectId::parse_str(id).ok()?;
    Some(doc! { "_id": id })
}

fn insertion_order() -> Document {
    doc! { "_id": 1 }
}

/// Case-insensitive regex matching `needle` anywhere in the field.
fn contains_regex(needle: &str) -> Regex {
    Regex {
        pattern: regex::escape(needle),
        options: "i".to_string(),
    }
}

/// Case-insensitive regex matching exactly `value`.
fn exact_regex(value: &str) -> Regex {
    Regex {
        pattern: format!("^{}$", regex::escape(value)),
        options: "i".to_string(),
    }
}

/// Translate a search filter into a MongoDB query document.
fn search_document(filter: &SearchFilter) -> Document {
    let mut query = Document::new();
    for (field, needle) in filter.text_criteria() {
        query.insert(field, Bson::RegularExpression(contains_regex(needle)));
    }
    if !filter.tags.is_empty() {
        let tags: Vec<Bson> = filter
            .tags
            .iter()
            .map(|tag| Bson::RegularExpression(exact_regex(tag)))
            .collect();
        query.insert("tags", doc! { "$all": tags });
    }
    query
}

#[async_trait]
impl AdvertisementStore for MongoAdvertisementStore {
    fn backend(&self) -> &'static str {
        "mongo"
    }

    async fn create(&self, new: NewAdvertisement) -> StoreResult<Advertisement> {
        let document = AdvertisementDocument::new(ObjectId::new(), new);
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Advertisement>> {
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };
        let document = self.collection.find_one(filter).await?;
        Ok(document.map(Advertisement::from))
    }

    async fn list(&self) -> StoreResult<Vec<Advertisement>> {
        let documents: Vec<AdvertisementDocument> = self
            .collection
            .find(doc! {})
            .sort(insertion_order())
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(Advertisement::from).collect())
    }

    async fn update(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> StoreResult<Option<Advertisement>> {
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            // `$set` with no fields is rejected by the server.
            return self.get(id).await;
        }

        let changes = mongodb::bson::to_document(&patch)?;
        let document = self
            .collection
            .find_one_and_update(filter, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(document.map(Advertisement::from))
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let Some(filter) = id_filter(id) else {
            return Ok(false);
        };
        let deleted = self.collection.find_one_and_delete(filter).await?;
        Ok(deleted.is_some())
    }

    async fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<Advertisement>> {
        let documents: Vec<AdvertisementDocument> = self
            .collection
            .find(search_document(filter))
            .sort(insertion_order())
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(Advertisement::from).collect())
    }
}
