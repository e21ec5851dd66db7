//! Serverless image resize bridge: on notification of a new object in
//! a storage bucket, download it, resize it, and write the JPEG
//! result back under a new key.

pub mod app;
pub mod client;
pub mod conf;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod pool;
