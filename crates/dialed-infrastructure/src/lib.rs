//! Persistence, configuration and identity adapters for Dialed.

pub mod auth;
pub mod config_service;
pub mod draft_repository;
pub mod dto;
pub mod file_document_store;
pub mod in_memory_document_store;
pub mod paths;
mod snapshot_hub;
pub mod storage;

pub use crate::auth::LocalAuthProvider;
pub use crate::config_service::ConfigService;
pub use crate::draft_repository::FileDraftRepository;
pub use crate::file_document_store::FileDocumentStore;
pub use crate::in_memory_document_store::InMemoryDocumentStore;
pub use crate::paths::DialedPaths;
