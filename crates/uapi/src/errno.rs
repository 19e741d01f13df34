//! Linux errno 常量（正数形式）
//!
//! 系统调用返回时取负值。

pub const EPERM: i32 = 1;
pub const EBADF: i32 = 9;
pub const ENOMEM: i32 = 12;
pub const EACCES: i32 = 13;
pub const EFAULT: i32 = 14;
pub const EBUSY: i32 = 16;
pub const ENODEV: i32 = 19;
pub const EINVAL: i32 = 22;
pub const EMFILE: i32 = 24;
pub const EOPNOTSUPP: i32 = 95;
