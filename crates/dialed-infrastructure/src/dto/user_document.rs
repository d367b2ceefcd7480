//! UserDocument DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use dialed_core::error::Result;
use dialed_core::session::History;
use dialed_core::user::{UserDocument, UserRole, UserSettings};

pub const USER_DOCUMENT_ENTITY: &str = "user_document";

/// User document V1.0.0 (session history only).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct UserDocumentV1_0_0 {
    #[serde(default)]
    pub history: History,
}

/// User document V1.1.0 (added settings, role and release-notes bookkeeping).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct UserDocumentV1_1_0 {
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub settings: UserSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_version: Option<String>,
    #[serde(default)]
    pub version_view_count: u32,
}

pub type UserDocumentDTO = UserDocumentV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

impl MigratesTo<UserDocumentV1_1_0> for UserDocumentV1_0_0 {
    fn migrate(self) -> UserDocumentV1_1_0 {
        UserDocumentV1_1_0 {
            history: self.history,
            ..UserDocumentV1_1_0::default()
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<UserDocument> for UserDocumentV1_1_0 {
    fn into_domain(self) -> UserDocument {
        UserDocument {
            history: self.history,
            settings: self.settings,
            role: self.role,
            last_seen_version: self.last_seen_version,
            version_view_count: self.version_view_count,
        }
    }
}

impl FromDomain<UserDocument> for UserDocumentV1_1_0 {
    fn from_domain(document: UserDocument) -> Self {
        UserDocumentV1_1_0 {
            history: document.history,
            settings: document.settings,
            role: document.role,
            last_seen_version: document.last_seen_version,
            version_view_count: document.version_view_count,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Migrator for user documents: V1.0.0 → V1.1.0 → UserDocument.
pub fn create_user_document_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let path = version_migrate::Migrator::define(USER_DOCUMENT_ENTITY)
        .from::<UserDocumentV1_0_0>()
        .step::<UserDocumentV1_1_0>()
        .into_with_save::<UserDocument>();

    migrator.register(path)?;
    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialed_core::scoring::ScoringStyle;

    #[test]
    fn test_v1_document_migrates_with_default_settings() {
        let migrator = create_user_document_migrator().unwrap();
        let json = serde_json::json!({
            "version": "1.0.0",
            "history": [{
                "id": 1709640000000i64,
                "date": "3/5/2024",
                "type": "PRACTICE",
                "summary": {"made": 4, "attempts": 5},
                "rounds": [{"id": 1, "distance": 20, "made": 4, "attempts": 5}]
            }]
        });

        let document: UserDocument = migrator
            .load_flat_from(USER_DOCUMENT_ENTITY, json)
            .unwrap();
        assert_eq!(document.history.len(), 1);
        assert_eq!(document.settings.scoring_style, ScoringStyle::Simple);
        assert!(document.role.is_none());
        assert_eq!(document.version_view_count, 0);
    }

    #[test]
    fn test_save_writes_latest_version() {
        let migrator = create_user_document_migrator().unwrap();
        let document = UserDocument {
            role: Some(UserRole::League),
            ..UserDocument::default()
        };
        let saved = migrator
            .save_domain_flat(USER_DOCUMENT_ENTITY, document)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value["version"], "1.1.0");
        assert_eq!(value["role"], "league");
    }
}
