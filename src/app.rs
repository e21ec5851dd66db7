//! Defines the read-only application state and the per-invocation
//! handler.

use crate::client;
use crate::conf::Settings;
use crate::job::ImageJob;
use crate::pipeline;
use crate::pool::BufferPool;
use anyhow::{anyhow, Result};
use envy::from_env;
use once_cell::sync::OnceCell;
use tracing::{info, instrument};

/// An App is an initialized application state, derived from
/// settings. It carries the buffer pool shared by every invocation in
/// this process.
pub struct App {
    /// The original settings.
    pub settings: Settings,

    /// Reused encode buffers.
    pool: BufferPool,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> Self {
        App {
            settings,
            pool: BufferPool::new(),
        }
    }

    /// Handle one resize job: fetch the source object, decode it,
    /// resample it to the job's box, encode it as JPEG into a pooled
    /// buffer, and store the result. Any failure is surfaced as
    /// invocation failure; re-running the same job writes the same
    /// destination object.
    #[instrument(skip(self, client))]
    pub async fn handle(&self, job: &ImageJob, client: &aws_sdk_s3::Client) -> Result<()> {
        let bucket = &self.settings.bucket;
        let source = client::fetch(client, bucket, &job.source_key).await?;
        let image = pipeline::decode(&source)?;
        let resized = pipeline::resample(&image, job.target_width, job.target_height)?;
        drop(image);

        let mut buffer = self.pool.acquire();
        let encoded = pipeline::encode(&resized, self.settings.jpeg_quality, &mut buffer);
        let stored = match encoded {
            Ok(_) => client::store(client, bucket, &job.target_key, &buffer).await,
            Err(e) => Err(e),
        };
        // The upload has captured the bytes by now, in both outcomes.
        self.pool.release(buffer);
        stored?;

        info!(
            "Resized {:?} to {}x{} at {:?}",
            job.source_key,
            resized.width(),
            resized.height(),
            job.target_key
        );
        Ok(())
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> Result<()> {
    let settings = from_env()?;
    let app = App::new(settings);
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}
