pub mod api;
pub mod config;
pub mod retrieve;

pub use api::{create_router, ApiState};
pub use config::RetrieverConfig;
pub use retrieve::RetrievalTool;
