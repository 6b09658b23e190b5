use crate::TmdbClient;
use crate::models::{ListDetails, ListItem};

impl TmdbClient {
    /// GET /list/{list_id}
    ///
    /// Follows result pages when the API reports more than one.
    pub async fn list_items(&self, list_id: &str) -> crate::Result<Vec<ListItem>> {
        let path = format!("/list/{list_id}");
        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let details: ListDetails = self.get(&path, &[("page", page.to_string())]).await?;
            let received = details.items.len();
            items.extend(details.items);
            match details.total_pages {
                Some(total) if received > 0 && page < total.min(crate::client::MAX_PAGES) => {
                    page += 1
                }
                _ => break,
            }
        }
        Ok(items)
    }
}
