use aws_sdk_s3::error::DisplayErrorContext;
use event_pipeline_core::contract::ObjectMetadata;

use crate::adapters::blob_store::BlobStore;
use crate::aws::block_on;

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl BlobStore for S3BlobStore {
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();

        block_on(async move {
            let output = client
                .head_object()
                .bucket(&bucket)
                .key(&key)
                .send()
                .await
                .map_err(|error| {
                    format!(
                        "failed to read metadata for s3://{bucket}/{key}: {}",
                        DisplayErrorContext(&error)
                    )
                })?;

            object_metadata(&bucket, &key, output.content_length(), output.content_type())
        })
    }
}

/// A head response without a content length fails the lookup rather than
/// recording a zero size.
fn object_metadata(
    bucket: &str,
    key: &str,
    content_length: Option<i64>,
    content_type: Option<&str>,
) -> Result<ObjectMetadata, String> {
    let size = content_length.ok_or_else(|| format!("s3://{bucket}/{key} has no content length"))?;
    Ok(ObjectMetadata {
        size,
        content_type: content_type.map(str::to_string),
    })
}
