pub mod http;

pub use http::HttpDirectoryClient;
