//! S3 facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::s3::{Bucket, ObjectSummary, S3Object};
use crate::types::FromWire;
use crate::wire::{self, WireMap};

const SERVICE: &str = "s3";

const LIST_BUCKETS_TOKENS: TokenSpec = TokenSpec::new("ContinuationToken", "ContinuationToken");
const LIST_OBJECTS_TOKENS: TokenSpec =
    TokenSpec::new("ContinuationToken", "NextContinuationToken");

/// Service for S3 operations.
#[derive(Debug, Clone, Default)]
pub struct S3Service {
    binding: Binding,
}

impl S3Service {
    /// Create a new S3 service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Fetch an object's body and metadata.
    pub async fn get_object(&self, bucket: &str, key: &str) -> FacadeResult<S3Object> {
        guard(crate::operation!("get_object"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("Bucket", Some(bucket.into())), ("Key", Some(key.into()))]);
            let response = client.invoke("GetObject", params).await?;
            Ok::<_, BoxError>(S3Object::from_wire(&response)?)
        })
        .await
    }

    /// Every bucket owned by the caller.
    pub async fn list_buckets(&self) -> FacadeResult<Vec<Bucket>> {
        guard(crate::operation!("list_buckets"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "ListBuckets", WireMap::new(), LIST_BUCKETS_TOKENS)
                .collect("Buckets", Bucket::from_wire)
                .await
        })
        .await
    }

    /// Every object in a bucket.
    pub async fn list_bucket_contents(&self, bucket: &str) -> FacadeResult<Vec<ObjectSummary>> {
        guard(crate::operation!("list_bucket_contents"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("Bucket", Some(bucket.into()))]);
            OperationPaginator::new(&client, "ListObjectsV2", params, LIST_OBJECTS_TOKENS)
                .collect("Contents", ObjectSummary::from_wire)
                .await
        })
        .await
    }
}
