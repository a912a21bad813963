use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::Region;

use crate::error::{AppError, AppResult};

use super::StorageBackend;

pub struct S3Backend {
    bucket: Box<Bucket>,
    bucket_name: String,
    region: String,
}

impl S3Backend {
    pub fn new(
        bucket_name: String,
        region: String,
        access_key: String,
        secret_key: String,
    ) -> AppResult<Self> {
        let credentials = Credentials::new(
            Some(&access_key),
            Some(&secret_key),
            None, // security token
            None, // session token
            None, // profile
        )
        .map_err(|e| AppError::Storage(format!("S3 credentials error: {}", e)))?;

        let s3_region = Region::Custom {
            region: region.clone(),
            endpoint: format!("https://s3.{}.amazonaws.com", region),
        };

        let mut bucket = Bucket::new(&bucket_name, s3_region, credentials)
            .map_err(|e| AppError::Storage(format!("S3 bucket error: {}", e)))?;
        // Uploaded objects are served directly to browsers.
        bucket.add_header("x-amz-acl", "public-read");

        Ok(Self {
            bucket,
            bucket_name,
            region,
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket_name, self.region, key
        )
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String> {
        self.bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {}", e)))?;

        tracing::info!("S3 upload: bucket={}, key={}", self.bucket_name, key);
        Ok(self.public_url(key))
    }

    fn bucket(&self) -> &str {
        &self.bucket_name
    }
}
