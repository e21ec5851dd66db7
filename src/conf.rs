//! Defines configuration as read from the environment.

use serde::Deserialize;

/// Default `jpeg_quality` value.
fn default_jpeg_quality() -> u8 {
    80
}

/// Default `default_target_width` value.
fn default_target_width() -> u32 {
    200
}

/// Default `target_key_prefix` value.
fn default_target_key_prefix() -> String {
    String::from("resized-")
}

/// The resize bridge is configured to pull an image object from
/// storage, resize it, and push the JPEG result back. The
/// configuration must be given as environment variables.
#[derive(Deserialize)]
pub struct Settings {
    /// The bucket holding both the source objects and the resized
    /// outputs.
    pub bucket: String,

    /// JPEG quality (0-100) used for every encoded output. This is a
    /// process-wide knob, not a per-request one.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Target width applied when the event omits one. Together with
    /// the zero default height this reproduces the legacy
    /// fixed-width, proportional-height behaviour.
    #[serde(default = "default_target_width")]
    pub default_target_width: u32,

    /// Target height applied when the event omits one. Zero derives
    /// the height from the source aspect ratio.
    #[serde(default)]
    pub default_target_height: u32,

    /// Prefix prepended to the source key to build the destination
    /// key when the event doesn't name one.
    #[serde(default = "default_target_key_prefix")]
    pub target_key_prefix: String,
}
