//! 字符设备号区间分配
//!
//! 与 Linux `alloc_chrdev_region` 相同的策略：从动态区间顶端向下寻找未被占用的 major。

use alloc::string::String;
use alloc::vec::Vec;
use lazy_static::lazy_static;
use sync::SpinLock;
use uapi::dev::{major, makedev, minor};

use crate::MemDevError;

/// 动态分配 major 的上界（含）
pub const CHRDEV_MAJOR_DYN_START: u32 = 254;
/// 动态分配 major 的下界（含）
pub const CHRDEV_MAJOR_DYN_END: u32 = 234;
/// 每个 major 下 minor 的上限
pub const MINORMASK: u32 = (1 << 20) - 1;

/// 一段已分配的字符设备号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChrdevRegion {
    major: u32,
    base_minor: u32,
    count: u32,
    name: String,
}

impl ChrdevRegion {
    /// major 号
    pub fn major(&self) -> u32 {
        self.major
    }

    /// 起始 minor 号
    pub fn base_minor(&self) -> u32 {
        self.base_minor
    }

    /// 设备号数量
    pub fn count(&self) -> u32 {
        self.count
    }

    /// 登记名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 第 `index` 个设备的设备号
    pub fn devno(&self, index: u32) -> Option<u64> {
        (index < self.count).then(|| makedev(self.major, self.base_minor + index))
    }

    /// 设备号在区间内的序号
    pub fn index_of(&self, dev: u64) -> Option<usize> {
        if major(dev) != self.major {
            return None;
        }
        let min = minor(dev);
        (self.base_minor..self.base_minor + self.count)
            .contains(&min)
            .then(|| (min - self.base_minor) as usize)
    }
}

lazy_static! {
    /// 已分配的设备号区间
    static ref CHRDEV_REGIONS: SpinLock<Vec<ChrdevRegion>> = SpinLock::new(Vec::new());
}

/// 动态分配一段字符设备号
pub fn alloc_chrdev_region(
    base_minor: u32,
    count: u32,
    name: &str,
) -> Result<ChrdevRegion, MemDevError> {
    if count == 0 {
        return Err(MemDevError::InvalidConfig);
    }
    let fits = base_minor
        .checked_add(count - 1)
        .is_some_and(|last| last <= MINORMASK);
    if !fits {
        return Err(MemDevError::InvalidConfig);
    }

    let mut regions = CHRDEV_REGIONS.lock();
    let major = (CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START)
        .rev()
        .find(|major| regions.iter().all(|region| region.major != *major))
        .ok_or(MemDevError::RegionBusy)?;

    let region = ChrdevRegion {
        major,
        base_minor,
        count,
        name: String::from(name),
    };
    regions.push(region.clone());
    log::info!(
        "memdev: device number <major>:<minor> = {}:{} ({} x{})",
        major,
        base_minor,
        name,
        count
    );
    Ok(region)
}

/// 释放设备号区间，区间未登记时返回 `false`
pub fn unregister_chrdev_region(region: &ChrdevRegion) -> bool {
    let mut regions = CHRDEV_REGIONS.lock();
    match regions.iter().position(|r| r == region) {
        Some(pos) => {
            regions.remove(pos);
            true
        }
        None => false,
    }
}

/// 按 major 查找已分配的区间
pub fn find_region(major: u32) -> Option<ChrdevRegion> {
    CHRDEV_REGIONS
        .lock()
        .iter()
        .find(|region| region.major == major)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_release() {
        test_support::init_arch_ops();
        let region = alloc_chrdev_region(0, 4, "test_region").unwrap();
        assert!((CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START).contains(&region.major()));
        assert_eq!(region.count(), 4);
        assert_eq!(find_region(region.major()), Some(region.clone()));

        let dev = region.devno(3).unwrap();
        assert_eq!(minor(dev), 3);
        assert_eq!(region.index_of(dev), Some(3));
        assert_eq!(region.devno(4), None);
        assert_eq!(region.index_of(makedev(region.major(), 4)), None);
        assert_eq!(region.index_of(makedev(region.major() - 1, 0)), None);

        assert!(unregister_chrdev_region(&region));
        assert!(!unregister_chrdev_region(&region));
        // 其他测试可能已复用这个 major
        assert_ne!(find_region(region.major()), Some(region));
    }

    #[test]
    fn test_regions_get_distinct_majors() {
        test_support::init_arch_ops();
        let a = alloc_chrdev_region(0, 1, "a").unwrap();
        let b = alloc_chrdev_region(0, 1, "b").unwrap();
        assert_ne!(a.major(), b.major());
        assert!(unregister_chrdev_region(&a));
        assert!(unregister_chrdev_region(&b));
    }

    #[test]
    fn test_invalid_region_requests() {
        test_support::init_arch_ops();
        assert_eq!(
            alloc_chrdev_region(0, 0, "zero").unwrap_err(),
            MemDevError::InvalidConfig
        );
        assert_eq!(
            alloc_chrdev_region(MINORMASK, 2, "overflow").unwrap_err(),
            MemDevError::InvalidConfig
        );
        assert_eq!(
            alloc_chrdev_region(u32::MAX, 1, "wrap").unwrap_err(),
            MemDevError::InvalidConfig
        );
    }

    #[test]
    fn test_region_may_end_at_last_minor() {
        test_support::init_arch_ops();
        let region = alloc_chrdev_region(MINORMASK, 1, "last_minor").unwrap();
        assert_eq!(region.devno(0).map(minor), Some(MINORMASK));
        assert!(unregister_chrdev_region(&region));
    }
}
