use serde::{Deserialize, Serialize};

use crate::utils::read_config_file;

pub const DEFAULT_API_URL: &str = "localhost:8080";
pub const DEFAULT_USER: &str = "1";

/// Contents of `~/.item-board/config.json`
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
pub struct BoardConfig {
    pub api_url: Option<String>,
    pub default_user_id: Option<String>,
}

lazy_static::lazy_static! {
    static ref FILE_CONFIG: BoardConfig = read_config_file().unwrap_or_default();

    pub static ref API_URL: String = std::env::var("API_URL")
        .ok()
        .or_else(|| FILE_CONFIG.api_url.clone())
        .unwrap_or_else(|| String::from(DEFAULT_API_URL));

    pub static ref DEFAULT_USER_ID: String = std::env::var("ITEM_BOARD_USER")
        .ok()
        .or_else(|| FILE_CONFIG.default_user_id.clone())
        .unwrap_or_else(|| String::from(DEFAULT_USER));
}
