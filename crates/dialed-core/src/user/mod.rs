//! User document and the collaborators that store it.

mod model;
mod repository;

pub use model::{DocumentPatch, UserDocument, UserRole, UserSettings};
pub use repository::{AuthProvider, AuthUser, DocumentStore, DraftRepository};
