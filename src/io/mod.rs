pub mod config_io;
pub mod kv;
pub mod lock;
pub mod log;
pub mod state;
pub mod workspace_io;
