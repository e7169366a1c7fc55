pub mod advisor;
pub mod analytics;
pub mod auth;
pub mod board;
pub mod draft;
pub mod task_ops;
