//! Repository trait for the uploads crate

use kernel::id::UserRef;

use crate::document::DocumentType;
use crate::error::UploadsResult;

#[trait_variant::make(DocumentRepository: Send)]
pub trait LocalDocumentRepository {
    /// Persist an account-scoped document path on the user row
    /// (hsc_path or sslc_path).
    async fn set_account_document(
        &self,
        user_ref: UserRef,
        doc_type: DocumentType,
        path: &str,
    ) -> UploadsResult<()>;
}
