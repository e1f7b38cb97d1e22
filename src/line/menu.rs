//! Rich-menu provisioning
//!
//! Startup-only: delete every existing rich menu, create the fixed 6-cell
//! grid (one message action per supported currency), upload the menu image
//! and set the menu as the account default.

use super::LineClient;
use crate::error::{BotError, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{info, warn};

const MENU_WIDTH: u32 = 2500;
const MENU_HEIGHT: u32 = 1686;

/// The fixed 2500x1686 grid: two rows of three cells, each sending one of
/// the "<名稱>匯率" button texts.
fn rich_menu_request() -> Value {
    json!({
        "size": { "width": MENU_WIDTH, "height": MENU_HEIGHT },
        "selected": true,
        "name": "匯率查詢選單",
        "chatBarText": "點擊查詢匯率",
        "areas": [
            { "bounds": { "x": 0,    "y": 0,   "width": 833, "height": 843 },
              "action": { "type": "message", "text": "人民幣匯率" } },
            { "bounds": { "x": 834,  "y": 0,   "width": 833, "height": 843 },
              "action": { "type": "message", "text": "美金匯率" } },
            { "bounds": { "x": 1663, "y": 0,   "width": 834, "height": 843 },
              "action": { "type": "message", "text": "日幣匯率" } },
            { "bounds": { "x": 0,    "y": 843, "width": 833, "height": 843 },
              "action": { "type": "message", "text": "韓幣匯率" } },
            { "bounds": { "x": 834,  "y": 843, "width": 833, "height": 843 },
              "action": { "type": "message", "text": "泰銖匯率" } },
            { "bounds": { "x": 1662, "y": 843, "width": 838, "height": 843 },
              "action": { "type": "message", "text": "歐元匯率" } },
        ],
    })
}

impl LineClient {
    /// Replace any existing rich menus with the currency grid.
    pub async fn provision_rich_menu(&self, image_path: &Path) -> Result<()> {
        self.delete_existing_menus().await?;

        let rich_menu_id = self.create_menu().await?;
        self.upload_menu_image(&rich_menu_id, image_path).await?;
        self.set_default_menu(&rich_menu_id).await?;

        info!("Rich menu {} provisioned and set as default", rich_menu_id);
        Ok(())
    }

    async fn delete_existing_menus(&self) -> Result<()> {
        let list: Value = self
            .client
            .get(format!("{}/v2/bot/richmenu/list", self.api_base))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .json()
            .await?;

        let Some(menus) = list.get("richmenus").and_then(|v| v.as_array()) else {
            return Ok(());
        };

        for menu in menus {
            let Some(id) = menu.get("richMenuId").and_then(|v| v.as_str()) else {
                continue;
            };

            let response = self
                .client
                .delete(format!("{}/v2/bot/richmenu/{}", self.api_base, id))
                .bearer_auth(&self.access_token)
                .send()
                .await?;

            if response.status().is_success() {
                info!("Deleted rich menu {}", id);
            } else {
                warn!("Failed to delete rich menu {}: {}", id, response.status());
            }
        }

        Ok(())
    }

    async fn create_menu(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v2/bot/richmenu", self.api_base))
            .bearer_auth(&self.access_token)
            .json(&rich_menu_request())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BotError::LineApiError(format!(
                "rich menu creation returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await?;
        body.get("richMenuId")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                BotError::LineApiError("rich menu creation response missing richMenuId".to_string())
            })
    }

    async fn upload_menu_image(&self, rich_menu_id: &str, image_path: &Path) -> Result<()> {
        let image = tokio::fs::read(image_path).await?;

        let response = self
            .client
            .post(format!(
                "{}/v2/bot/richmenu/{}/content",
                self.api_base, rich_menu_id
            ))
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "image/jpeg")
            .body(image)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::LineApiError(format!(
                "rich menu image upload returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn set_default_menu(&self, rich_menu_id: &str) -> Result<()> {
        let response = self
            .client
            .post(format!(
                "{}/v2/bot/user/all/richmenu/{}",
                self.api_base, rich_menu_id
            ))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::LineApiError(format!(
                "setting default rich menu returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
