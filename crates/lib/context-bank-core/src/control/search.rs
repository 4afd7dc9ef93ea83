use context_bank_store::models::{Document, DocumentSearchRequest, DocumentSearchResponse};

use crate::client::{Endpoint, Transport};

use super::{ControlError, OnyxControlPlane};

impl<T: Transport> OnyxControlPlane<T> {
    /// Runs a semantic document search.
    ///
    /// An answer without `top_documents` is an empty result, not an error.
    ///
    /// # Errors
    /// Returns `ControlError::Client` if the request fails.
    pub async fn search_documents(
        &self,
        request: DocumentSearchRequest,
    ) -> Result<Vec<Document>, ControlError> {
        let response: DocumentSearchResponse =
            self.client.post(Endpoint::DocumentSearch, &request).await?;
        Ok(response.top_documents.unwrap_or_default())
    }
}
