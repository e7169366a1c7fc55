pub mod app;
pub mod field;
pub mod input;
pub mod render;
pub mod theme;
pub mod worker;

pub use app::run;
