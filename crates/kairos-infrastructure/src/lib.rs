pub mod config_service;
pub mod http_client;
pub mod paths;

pub use config_service::ConfigService;
pub use http_client::HttpApiClient;
pub use paths::KairosPaths;
