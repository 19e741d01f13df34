//! 文件句柄层
//!
//! 把 `memdev` 的会话包装成文件对象，并提供进程级的文件描述符表：
//!
//! - [`File`] trait - 文件操作接口
//! - [`MemDevFile`] - 内存字符设备文件
//! - [`FDTable`] - 文件描述符表

#![no_std]

extern crate alloc;

pub mod error;

mod fd_table;
mod file;
pub mod impls;

// Re-export error
pub use error::FsError;

// Re-export file
pub use file::File;

// Re-export fd_table
pub use fd_table::{DEFAULT_MAX_FDS, FDTable};

// Re-export impls
pub use impls::MemDevFile;

// Re-export uapi types for convenience
pub use uapi::fcntl::{OpenFlags, SeekWhence};
