pub mod app;

pub use app::BackendConfig;
