use anyhow::{anyhow, Context, Result};
use image_resize_bridge::job::{Envelope, ImageJob};
use image_resize_bridge::{app, client};
use lambda_runtime::{run, service_fn, LambdaEvent};

/// Handle one resize event through the transcoding pipeline.
async fn function_handler(event: LambdaEvent<Envelope>) -> Result<()> {
    let job = ImageJob::resolve(event.payload.into_payload(), &app::current().settings);
    app::current()
        .handle(&job, client::current())
        .await
        .with_context(|| format!("Failed to handle resize job {:?}", &job))
}

/// Run a function that listens for new-object events and writes a
/// resized copy of each referenced image back to the bucket.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
