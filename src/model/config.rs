use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub app_name: String,
    pub developer: String,
    pub tagline: String,

    pub version: String,
    pub size: String,

    pub rating: f64,
    pub review_count: i64,
    pub downloads: String,

    pub logo_url: String,
    pub apk_download_url: String,

    pub telegram: Telegram,

    pub screenshots: Vec<Screenshot>,

    pub last_update: String,
    pub release_date: String,

    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Telegram {
    pub channel_url: String,
    pub support_url: String,
}

// A screenshot and its caption travel together so the two can never
// go out of step when the admin edits one of them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Screenshot {
    pub url: String,
    pub caption: String,
}

pub fn default_document() -> AppConfig {
    AppConfig {
        app_name: "ADR Dubbed".to_string(),
        developer: "ADR Team".to_string(),
        tagline: "Watch Hindi Dubbed Anime".to_string(),

        version: "1.0.0".to_string(),
        size: "24 MB".to_string(),

        rating: 4.6,
        review_count: 2318,
        downloads: "10K+".to_string(),

        logo_url: "/logo.png".to_string(),
        apk_download_url: "#".to_string(),

        telegram: Telegram {
            channel_url: "https://t.me/adrdubbed".to_string(),
            support_url: "https://t.me/adrdubbed_support".to_string(),
        },

        screenshots: Vec::new(),

        last_update: "2025-08-01".to_string(),
        release_date: "2024-11-15".to_string(),

        features: vec![
            "HD Quality".to_string(),
            "Fast Servers".to_string(),
            "Daily Updates".to_string(),
        ],
    }
}
