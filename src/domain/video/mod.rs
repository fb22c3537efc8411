pub mod service;

pub use service::{VideoArtifact, VideoService};
