//! Defines the error taxonomy for a single invocation. All variants
//! propagate to the runtime boundary; there is no local recovery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The source object is empty, truncated, or not a recognized
    /// image format.
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    /// Both target dimensions are zero, so there is nothing sensible
    /// to resize to.
    #[error("invalid target dimensions: width and height are both zero")]
    InvalidDimensions,

    /// The JPEG encoder failed on a decoded image.
    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),

    /// The source object couldn't be read from storage.
    #[error("failed to fetch object {key:?} from bucket {bucket:?}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The resized object couldn't be written to storage.
    #[error("failed to store object {key:?} in bucket {bucket:?}")]
    Store {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
