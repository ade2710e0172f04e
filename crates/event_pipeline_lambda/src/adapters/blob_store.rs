use event_pipeline_core::contract::ObjectMetadata;

pub trait BlobStore {
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String>;
}
