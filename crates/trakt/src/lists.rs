use crate::TraktClient;
use crate::models::ListEntry;

impl TraktClient {
    /// GET /users/{user}/lists/{list}/items
    pub async fn list_items(&self, user: &str, list: &str) -> crate::Result<Vec<ListEntry>> {
        self.get(&format!("/users/{user}/lists/{list}/items"), &[])
            .await
    }
}
