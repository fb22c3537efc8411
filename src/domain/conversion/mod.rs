pub mod dto;
pub mod error;
pub mod job;
pub mod model;
pub mod service;

pub use error::{ConversionError, ConversionServiceError};
pub use job::{ConversionJob, InvalidTransition};
pub use model::{Conversion, ConversionRequest, ConversionStatus, ConversionUpdate};
pub use service::{ArtifactDownload, ConversionService, ConversionServiceApi};
