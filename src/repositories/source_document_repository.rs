use async_trait::async_trait;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::SourceDocument,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceDocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceDocument>>;
}

/// Loads a stored document or fails with `NotFound`.
pub async fn require_document(
    repo: &dyn SourceDocumentRepository,
    id: &str,
) -> AppResult<SourceDocument> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reviewer '{}' not found", id)))
}

pub struct MongoSourceDocumentRepository {
    collection: Collection<SourceDocument>,
}

impl MongoSourceDocumentRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl SourceDocumentRepository for MongoSourceDocumentRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceDocument>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document)
    }
}
