//! 设备驱动登记
//!
//! 包含 Driver trait、DeviceType 枚举与全局驱动列表

use alloc::{string::String, sync::Arc, vec::Vec};
use lazy_static::lazy_static;
use sync::SpinLock;

/// 设备类型枚举
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeviceType {
    /// 字符设备
    Char,
}

/// 已登记设备的公共接口
pub trait Driver: Send + Sync {
    /// 返回对应的设备类型，请参阅 DeviceType
    fn device_type(&self) -> DeviceType;

    /// 获取此设备的唯一标识符（设备节点名）
    fn get_id(&self) -> String;

    /// 设备号
    fn devno(&self) -> u64;
}

lazy_static! {
    /// 全局驱动列表
    pub static ref DRIVERS: SpinLock<Vec<Arc<dyn Driver>>> = SpinLock::new(Vec::new());
}

/// 登记设备驱动
pub fn register_driver(driver: Arc<dyn Driver>) {
    DRIVERS.lock().push(driver);
}

/// 按设备号移除设备驱动，未登记时返回 `false`
pub fn unregister_driver(devno: u64) -> bool {
    let mut drivers = DRIVERS.lock();
    let before = drivers.len();
    drivers.retain(|driver| driver.devno() != devno);
    before != drivers.len()
}

/// 按标识查找设备驱动
pub fn find_driver(id: &str) -> Option<Arc<dyn Driver>> {
    DRIVERS
        .lock()
        .iter()
        .find(|driver| driver.get_id() == id)
        .cloned()
}
