//! 文件类型实现

mod memdev_file;

pub use memdev_file::MemDevFile;
