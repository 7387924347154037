pub mod init;
pub mod story;
