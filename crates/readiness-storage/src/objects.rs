use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON: &str = "application/json";

/// Result of a GET operation, including the body and ETag.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// S3 answers a failed conditional write with 412 PreconditionFailed, or with
/// 409 ConditionalRequestConflict when a competing write is in flight.
fn is_condition_failure(message: &str) -> bool {
    message.contains("PreconditionFailed") || message.contains("ConditionalRequestConflict")
}

/// Put a JSON object with an If-Match precondition (ETag optimistic locking).
/// Returns the new ETag on success, or `StorageError::PreconditionFailed` if the
/// ETag doesn't match.
pub async fn put_object_if_match(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(JSON)
        .if_match(expected_etag)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if is_condition_failure(&err.to_string()) {
                StorageError::PreconditionFailed {
                    key: key.to_string(),
                }
            } else {
                StorageError::PutObject(err.to_string())
            }
        })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Put a JSON object only if no object exists under the key (`If-None-Match: *`).
pub async fn put_object_if_absent(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
) -> Result<String, StorageError> {
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(JSON)
        .if_none_match("*")
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if is_condition_failure(&err.to_string()) {
                StorageError::AlreadyExists {
                    key: key.to_string(),
                }
            } else {
                StorageError::PutObject(err.to_string())
            }
        })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Delete an object from S3.
pub async fn delete_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// List objects under a prefix. Returns keys.
pub async fn list_objects(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                keys.push(key.to_string());
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
