//! Defines the global S3 client and the fetch/store adapters the
//! pipeline depends on.

use crate::error::Error;
use anyhow::{anyhow, Result};
use aws_config::from_env;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use once_cell::sync::OnceCell;
use std::env;

/// Downloads a single object from storage, fully consuming the
/// response stream before returning its bytes.
pub async fn fetch(client: &Client, bucket: &str, key: &str) -> Result<Bytes, Error> {
    let response = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| Error::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: Box::new(e),
        })?;
    let body = response.body.collect().await.map_err(|e| Error::Fetch {
        bucket: bucket.to_string(),
        key: key.to_string(),
        source: Box::new(e),
    })?;
    Ok(body.into_bytes())
}

/// Uploads encoded bytes to storage, with the content length computed
/// up front. The caller keeps ownership of `data`, so a pooled buffer
/// can be released once this returns.
pub async fn store(client: &Client, bucket: &str, key: &str, data: &[u8]) -> Result<(), Error> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("image/jpeg")
        .content_length(data.len() as i64)
        .body(ByteStream::from(Bytes::copy_from_slice(data)))
        .send()
        .await
        .map_err(|e| Error::Store {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: Box::new(e),
        })?;
    Ok(())
}

/// Global S3 client instance.
static CURRENT: OnceCell<Client> = OnceCell::new();

/// Initialize the global S3 client.
pub async fn init() -> Result<()> {
    let endpoint_url_var = env::var("AWS_ENDPOINT_URL");
    let s3_config = if let Ok(endpoint_url) = endpoint_url_var {
        from_env()
            .endpoint_url(
                if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
                    endpoint_url
                } else {
                    format!("https://{}", endpoint_url)
                },
            )
            .region("us-east-1") // should be OK since the endpoint was overridden
            .load()
    } else {
        from_env().load()
    }
    .await;
    let client = Client::new(&s3_config);
    CURRENT
        .set(client)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current S3 client instance, or panic if it hasn't been initialized.
pub fn current() -> &'static Client {
    CURRENT.get().expect("client is not initialized")
}
