pub mod source_document_repository;

pub use source_document_repository::{
    require_document, MongoSourceDocumentRepository, SourceDocumentRepository,
};
