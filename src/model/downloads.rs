use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DownloadRecord {
    pub timestamp: String,
    pub count: i64,
}
