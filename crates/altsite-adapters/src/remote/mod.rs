//! Remote file-store adapters.

mod ftp;
mod memory;

pub use ftp::FtpRemote;
pub use memory::MemoryRemote;
