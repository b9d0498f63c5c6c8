//! Postgres implementation of the document repository

use kernel::id::UserRef;
use sqlx::PgPool;

use crate::document::DocumentType;
use crate::error::{UploadsError, UploadsResult};
use crate::repository::DocumentRepository;

#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DocumentRepository for PgDocumentRepository {
    async fn set_account_document(
        &self,
        user_ref: UserRef,
        doc_type: DocumentType,
        path: &str,
    ) -> UploadsResult<()> {
        let sql = match doc_type {
            DocumentType::Hsc => {
                "UPDATE users SET hsc_path = $2, updated_at = NOW() \
                 WHERE ref_id = $1 AND is_active = TRUE"
            }
            DocumentType::Sslc => {
                "UPDATE users SET sslc_path = $2, updated_at = NOW() \
                 WHERE ref_id = $1 AND is_active = TRUE"
            }
        };
        let result = sqlx::query(sql)
            .bind(user_ref.as_uuid())
            .bind(path)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UploadsError::UserNotFound);
        }
        Ok(())
    }
}
