//! Defines the inbound job descriptor and its resolution into an
//! [`ImageJob`], the immutable unit of work for one invocation.

use crate::conf::Settings;
use serde::Deserialize;

/// The job descriptor as found on the wire. Only `objectName` is
/// required; missing fields fall back to the configured defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub object_name: String,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub target_width: Option<u32>,
    #[serde(default)]
    pub target_height: Option<u32>,
}

/// Events arrive either as the bare payload or wrapped in a
/// Pub/Sub-style envelope. Both shapes are resolved here, once, so
/// the handler only ever sees one descriptor type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Nested { message: Message },
    Flat(JobPayload),
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub data: JobPayload,
}

impl Envelope {
    pub fn into_payload(self) -> JobPayload {
        match self {
            Envelope::Nested { message } => message.data,
            Envelope::Flat(payload) => payload,
        }
    }
}

/// A fully resolved unit of work. A zero dimension means "derive
/// proportionally from the other one".
#[derive(Debug)]
pub struct ImageJob {
    pub source_key: String,
    pub target_key: String,
    pub target_width: u32,
    pub target_height: u32,
}

impl ImageJob {
    /// Apply the configured defaults to an inbound payload.
    pub fn resolve(payload: JobPayload, settings: &Settings) -> Self {
        let target_key = payload
            .target_name
            .unwrap_or_else(|| format!("{}{}", settings.target_key_prefix, payload.object_name));
        ImageJob {
            source_key: payload.object_name,
            target_key,
            target_width: payload.target_width.unwrap_or(settings.default_target_width),
            target_height: payload
                .target_height
                .unwrap_or(settings.default_target_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        serde_json::from_str(r#"{"bucket": "images"}"#).unwrap()
    }

    #[test]
    fn flat_payload_deserializes() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"objectName": "cat.png", "targetName": "cat-small.jpg",
                "targetWidth": 200, "targetHeight": 100}"#,
        )
        .unwrap();
        let job = ImageJob::resolve(envelope.into_payload(), &settings());
        assert_eq!(job.source_key, "cat.png");
        assert_eq!(job.target_key, "cat-small.jpg");
        assert_eq!((job.target_width, job.target_height), (200, 100));
    }

    #[test]
    fn nested_envelope_deserializes() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"message": {"data": {"objectName": "dog.jpg", "targetWidth": 640}}}"#,
        )
        .unwrap();
        let job = ImageJob::resolve(envelope.into_payload(), &settings());
        assert_eq!(job.source_key, "dog.jpg");
        assert_eq!((job.target_width, job.target_height), (640, 0));
    }

    #[test]
    fn object_name_alone_gets_documented_defaults() {
        let envelope: Envelope = serde_json::from_str(r#"{"objectName": "photo.jpg"}"#).unwrap();
        let job = ImageJob::resolve(envelope.into_payload(), &settings());
        assert_eq!(job.target_key, "resized-photo.jpg");
        assert_eq!(job.target_width, 200);
        assert_eq!(job.target_height, 0);
    }

    #[test]
    fn missing_object_name_is_rejected() {
        assert!(serde_json::from_str::<Envelope>(r#"{"targetWidth": 200}"#).is_err());
    }
}
