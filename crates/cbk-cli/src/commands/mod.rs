pub mod audit;
pub mod dispatch;
pub mod get;
pub mod init;
pub mod list;
pub mod schema;
pub mod shared;
pub mod stats;
pub mod workflow;
