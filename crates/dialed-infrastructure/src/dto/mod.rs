//! Versioned DTOs for persisted data.
//!
//! The domain types stay version-agnostic; these DTOs carry the schema
//! version and the migrations between versions.
//!
//! ### UserDocument Version History
//! - **1.0.0**: history only
//! - **1.1.0**: added settings, role and release-notes fields
//!
//! ### DialedConfig Version History
//! - **1.0.0**: storage, user and logging sections

mod config;
mod user_document;

pub use config::{ConfigDTO, ConfigV1_0_0, create_config_migrator};
pub use user_document::{
    USER_DOCUMENT_ENTITY, UserDocumentDTO, UserDocumentV1_0_0, UserDocumentV1_1_0,
    create_user_document_migrator,
};
