//! 测试支持 crate
//!
//! 提供 Mock 实现和测试初始化工具

#![no_std]

pub mod mock;

pub use mock::arch::init_arch_ops;
