//! BrowserManager tab management.

use std::sync::Arc;

use tracing::debug;

use super::{BrowserError, BrowserManager};
use crate::page::CdpPage;

impl BrowserManager {
    /// Open a new tab at `url`, sized to the configured viewport.
    pub async fn new_page(&self, url: &str) -> Result<CdpPage, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = Arc::new(client.new_page(url).await?);
        session
            .set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await?;

        let target_id = session.target_id().to_string();
        self.pages
            .write()
            .await
            .insert(target_id.clone(), session.clone());

        debug!("Created page {}: {}", target_id, url);
        Ok(CdpPage::new(session))
    }

    /// Close a tab previously returned by [`new_page`](Self::new_page).
    pub async fn close_page(&self, page: &CdpPage) -> Result<(), BrowserError> {
        let target_id = page.target_id();
        if self.pages.write().await.remove(target_id).is_none() {
            return Err(BrowserError::PageNotFound(target_id.to_string()));
        }
        let client = self.client().await?;
        client.close_page(target_id).await?;
        debug!("Closed page {}", target_id);
        Ok(())
    }

    /// Target ids of the tabs opened through this manager.
    pub async fn list_pages(&self) -> Vec<String> {
        self.pages.read().await.keys().cloned().collect()
    }
}
