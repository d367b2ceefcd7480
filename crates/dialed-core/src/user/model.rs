//! Per-user document model.
//!
//! Everything a user owns lives in one document: the session history, the
//! settings, the chosen role and the release-notes bookkeeping.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use version_migrate::DeriveQueryable as Queryable;

use crate::error::{DialedError, Result};
use crate::scoring::ScoringStyle;
use crate::session::History;

/// What the dashboard is tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Practice,
    League,
    Coach,
}

impl FromStr for UserRole {
    type Err = DialedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "practice" => Ok(Self::Practice),
            "league" => Ok(Self::League),
            "coach" => Ok(Self::Coach),
            other => Err(DialedError::validation(format!("unknown role '{}'", other))),
        }
    }
}

/// User preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub scoring_style: ScoringStyle,
    pub has_completed_onboarding: bool,
    pub has_seen_post_session_coach: bool,
}

/// The whole per-user document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "user_document")]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub settings: UserSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Release the user last saw the notes for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_version: Option<String>,
    #[serde(default)]
    pub version_view_count: u32,
}

impl UserDocument {
    /// Whether release notes for `current` are still unread.
    ///
    /// An unparsable stored version counts as unseen.
    pub fn has_unseen_release(&self, current: &semver::Version) -> bool {
        match self
            .last_seen_version
            .as_deref()
            .map(semver::Version::parse)
        {
            Some(Ok(seen)) => seen < *current,
            _ => true,
        }
    }

    /// Patch recording that the notes for `current` were read.
    pub fn acknowledge_release(&self, current: &semver::Version) -> DocumentPatch {
        DocumentPatch {
            last_seen_version: Some(current.to_string()),
            version_view_count: Some(self.version_view_count.saturating_add(1)),
            ..DocumentPatch::default()
        }
    }
}

/// Top-level fields to overwrite in a [`UserDocument`].
///
/// Absent fields are left alone; present fields replace the stored value
/// wholesale (no deep merge).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<History>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_view_count: Option<u32>,
}

impl DocumentPatch {
    pub fn history(history: History) -> Self {
        Self {
            history: Some(history),
            ..Self::default()
        }
    }

    pub fn settings(settings: UserSettings) -> Self {
        Self {
            settings: Some(settings),
            ..Self::default()
        }
    }

    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Shallow-merges the patch into `document`.
    pub fn apply_to(self, document: &mut UserDocument) {
        if let Some(history) = self.history {
            document.history = history;
        }
        if let Some(settings) = self.settings {
            document.settings = settings;
        }
        if let Some(role) = self.role {
            document.role = Some(role);
        }
        if let Some(version) = self.last_seen_version {
            document.last_seen_version = Some(version);
        }
        if let Some(count) = self.version_view_count {
            document.version_view_count = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::SessionDate;
    use crate::session::{Round, Session};

    fn sample_history() -> History {
        History::from_sessions(vec![Session::practice(
            1,
            SessionDate::from_ymd(2024, 1, 1).unwrap(),
            None,
            vec![Round::simple(1, 20, 3).unwrap()],
        )])
    }

    #[test]
    fn test_settings_patch_leaves_history() {
        let mut document = UserDocument {
            history: sample_history(),
            ..UserDocument::default()
        };
        let settings = UserSettings {
            scoring_style: ScoringStyle::Pro,
            ..UserSettings::default()
        };
        DocumentPatch::settings(settings).apply_to(&mut document);

        assert_eq!(document.history.len(), 1);
        assert_eq!(document.settings.scoring_style, ScoringStyle::Pro);
    }

    #[test]
    fn test_history_patch_replaces_wholesale() {
        let mut document = UserDocument {
            history: sample_history(),
            role: Some(UserRole::League),
            ..UserDocument::default()
        };
        DocumentPatch::history(History::new()).apply_to(&mut document);
        assert!(document.history.is_empty());
        assert_eq!(document.role, Some(UserRole::League));
    }

    #[test]
    fn test_release_acknowledgement() {
        let current = semver::Version::new(1, 4, 0);
        let mut document = UserDocument::default();
        assert!(document.has_unseen_release(&current));

        document.acknowledge_release(&current).apply_to(&mut document);
        assert_eq!(document.version_view_count, 1);
        assert!(!document.has_unseen_release(&current));
        assert!(document.has_unseen_release(&semver::Version::new(1, 5, 0)));

        document.last_seen_version = Some("garbage".into());
        assert!(document.has_unseen_release(&current));
    }

    #[test]
    fn test_document_wire_shape() {
        let json = r#"{
            "history": [],
            "settings": {"scoringStyle": "PRO", "hasCompletedOnboarding": true},
            "role": "coach"
        }"#;
        let document: UserDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.role, Some(UserRole::Coach));
        assert!(document.settings.has_completed_onboarding);
        assert!(!document.settings.has_seen_post_session_coach);
        assert_eq!(document.version_view_count, 0);

        let patch = serde_json::to_value(DocumentPatch::role(UserRole::Practice)).unwrap();
        assert_eq!(patch, serde_json::json!({"role": "practice"}));
    }
}
