// Storage abstraction for the image upload backend

pub mod s3;

pub use s3::S3Backend;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppResult;

/// ストレージバックエンド抽象化（アップロード先の共通インタフェース）
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// ファイルをアップロード。公開URLを返す
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String>;

    /// バケット名を取得
    fn bucket(&self) -> &str;
}

/// Object key for an uploaded file: `<unix-millis>_<original-name>`.
///
/// Collision avoidance only. Two identically named files uploaded in the
/// same millisecond would collide.
pub fn object_key(original_name: &str) -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), original_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_original_name() {
        let key = object_key("widget.png");
        assert!(key.ends_with("_widget.png"));
    }

    #[test]
    fn test_object_key_prefix_is_millis_timestamp() {
        let key = object_key("a.jpg");
        let prefix = key.split('_').next().unwrap();
        let millis: i64 = prefix.parse().unwrap();
        // Well after 2020-01-01 in milliseconds.
        assert!(millis > 1_577_836_800_000);
    }
}
