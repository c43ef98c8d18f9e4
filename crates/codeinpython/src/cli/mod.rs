pub mod app;
pub mod config;
pub mod install;
pub mod lesson;
pub mod path;
pub mod prepare;
