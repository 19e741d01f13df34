//! 多实例内存字符设备驱动
//!
//! 此 crate 实现一组相互独立的逻辑设备，每个设备由固定大小的内存缓冲区承载，
//! 通过统一的 open/read/write/llseek/release 接口访问，并按设备声明的访问模式做权限检查：
//!
//! - [`AccessMode`] 与 [`access::check`] - 访问模式及权限判定
//! - [`DeviceRecord`] / [`DeviceTable`] - 设备元数据与缓冲区
//! - [`seek::resolve`] - llseek 偏移计算
//! - [`io`] - 带边界裁剪的读写
//! - [`Session`] - open 成功后得到的会话句柄，持有独立的偏移量
//! - [`DriverCore`] - 组合以上部件的驱动核心
//! - [`AtomModule`] - 模块加载/卸载：设备号分配、设备节点与驱动登记
//!
//! # 架构解耦
//!
//! 用户空间拷贝通过 [`UserCopyOps`] 抽象，宿主在启动时调用
//! [`register_user_copy_ops`] 注册实现；未注册时使用 [`DirectCopy`]。

#![no_std]

extern crate alloc;

pub mod access;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod io;
pub mod module;
pub mod ops;
pub mod record;
pub mod registry;
pub mod seek;
pub mod session;

pub use access::AccessMode;
pub use config::AtomConfig;
pub use dispatch::{DriverCore, Transfer};
pub use driver::{DRIVERS, DeviceType, Driver, find_driver, register_driver, unregister_driver};
pub use error::MemDevError;
pub use module::{AtomModule, AtomNode};
pub use ops::{DirectCopy, UserCopyOps, register_user_copy_ops, user_copy_ops};
pub use record::{DeviceRecord, DeviceSpec, DeviceTable};
pub use registry::{ChrdevRegion, alloc_chrdev_region, unregister_chrdev_region};
pub use session::Session;

pub use uapi::fcntl::SeekWhence;
