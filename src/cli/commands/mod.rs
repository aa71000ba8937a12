mod command_result;
pub mod generate;
pub mod helper;
pub mod init;
pub mod show;

pub use command_result::*;
