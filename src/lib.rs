pub mod archive;
pub mod commands;
pub mod http;
pub mod install;
pub mod package;
pub mod registry;
pub mod runtime;
