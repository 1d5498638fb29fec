pub mod init;
pub mod parse;
pub mod update;
