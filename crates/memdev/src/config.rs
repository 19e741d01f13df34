//! 驱动配置
//!
//! 设备数量、容量、序列号与访问模式在编译期确定，运行期不可协商。

use alloc::vec::Vec;

use crate::{AccessMode, DeviceSpec, MemDevError, record};

/// 设备数量
pub const NO_OF_DEVICES: usize = 4;

/// 1 号设备容量
pub const MEM_SIZE_MAX_ATOMDEV1: usize = 1024;
/// 2 号设备容量
pub const MEM_SIZE_MAX_ATOMDEV2: usize = 512;
/// 3 号设备容量
pub const MEM_SIZE_MAX_ATOMDEV3: usize = 1024;
/// 4 号设备容量
pub const MEM_SIZE_MAX_ATOMDEV4: usize = 512;

/// 默认设备配置
pub const DEVICE_SPECS: [DeviceSpec; NO_OF_DEVICES] = [
    DeviceSpec::new(MEM_SIZE_MAX_ATOMDEV1, "ATOMDEV1XYZ123", AccessMode::ReadOnly),
    DeviceSpec::new(MEM_SIZE_MAX_ATOMDEV2, "ATOMDEV2XYZ123", AccessMode::WriteOnly),
    DeviceSpec::new(MEM_SIZE_MAX_ATOMDEV3, "ATOMDEV3XYZ123", AccessMode::ReadWrite),
    DeviceSpec::new(MEM_SIZE_MAX_ATOMDEV4, "ATOMDEV4XYZ123", AccessMode::ReadWrite),
];

/// 设备号区间的登记名
pub const REGION_NAME: &str = "atom_devices";
/// 设备类名
pub const CLASS_NAME: &str = "atom_class";
/// 设备节点名前缀，节点名为 `<prefix>-<index>`
pub const NODE_PREFIX: &str = "atom";

/// 模块加载配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomConfig {
    /// 按设备标识顺序排列的设备配置
    pub specs: Vec<DeviceSpec>,
    /// 设备号区间的登记名
    pub region_name: &'static str,
    /// 设备类名
    pub class_name: &'static str,
    /// 设备节点名前缀
    pub node_prefix: &'static str,
    /// 起始 minor 号
    pub base_minor: u32,
}

impl Default for AtomConfig {
    fn default() -> Self {
        Self {
            specs: DEVICE_SPECS.to_vec(),
            region_name: REGION_NAME,
            class_name: CLASS_NAME,
            node_prefix: NODE_PREFIX,
            base_minor: 0,
        }
    }
}

impl AtomConfig {
    /// 使用默认名称和给定设备列表
    pub fn with_specs(specs: &[DeviceSpec]) -> Self {
        Self {
            specs: specs.to_vec(),
            ..Self::default()
        }
    }

    /// 检查配置
    pub fn validate(&self) -> Result<(), MemDevError> {
        if self.region_name.is_empty() || self.class_name.is_empty() || self.node_prefix.is_empty()
        {
            return Err(MemDevError::InvalidConfig);
        }
        if u32::try_from(self.specs.len()).is_err() {
            return Err(MemDevError::InvalidConfig);
        }
        record::validate_specs(&self.specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AtomConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.specs.len(), NO_OF_DEVICES);
        let sizes: Vec<usize> = config.specs.iter().map(|s| s.size).collect();
        assert_eq!(sizes, [1024, 512, 1024, 512]);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert_eq!(
            AtomConfig::with_specs(&[]).validate(),
            Err(MemDevError::InvalidConfig)
        );
        let config = AtomConfig {
            node_prefix: "",
            ..AtomConfig::default()
        };
        assert_eq!(config.validate(), Err(MemDevError::InvalidConfig));
    }
}
