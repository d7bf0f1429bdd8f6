pub mod conf;
pub mod patch;
pub mod server;
