pub mod use_api_client;
pub mod use_geography;
pub mod use_resource;

pub use use_api_client::{ApiClientContext, use_api_client};
pub use use_geography::{GeographyHandle, use_geography};
pub use use_resource::{ResourceHandle, use_resource};
