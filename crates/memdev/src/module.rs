//! 模块加载与卸载
//!
//! [`AtomModule::init`] 依次完成：校验配置、构造驱动核心、分配设备号区间、
//! 为每个设备创建节点并登记到 [`DRIVERS`](crate::DRIVERS)。
//! [`AtomModule::exit`] 按相反顺序撤销，可重复调用。

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use sync::SpinLock;

use crate::{
    AccessMode, AtomConfig, ChrdevRegion, DeviceRecord, DeviceType, Driver, DriverCore,
    MemDevError, Session, alloc_chrdev_region, register_driver, unregister_chrdev_region,
    unregister_driver,
};

/// 一个设备节点
#[derive(Debug)]
pub struct AtomNode {
    name: String,
    devno: u64,
    index: usize,
    record: Arc<DeviceRecord>,
}

impl AtomNode {
    /// 节点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 设备标识
    pub fn index(&self) -> usize {
        self.index
    }

    /// 对应的设备
    pub fn record(&self) -> &Arc<DeviceRecord> {
        &self.record
    }
}

impl Driver for AtomNode {
    fn device_type(&self) -> DeviceType {
        DeviceType::Char
    }

    fn get_id(&self) -> String {
        self.name.clone()
    }

    fn devno(&self) -> u64 {
        self.devno
    }
}

/// 已加载的驱动模块
pub struct AtomModule {
    core: Arc<DriverCore>,
    class_name: &'static str,
    region: SpinLock<Option<ChrdevRegion>>,
    nodes: SpinLock<Vec<Arc<AtomNode>>>,
}

impl AtomModule {
    /// 加载模块
    pub fn init(config: &AtomConfig) -> Result<Self, MemDevError> {
        config.validate()?;

        let core = Arc::new(DriverCore::initialize(&config.specs)?);
        let count = u32::try_from(core.device_count()).map_err(|_| MemDevError::InvalidConfig)?;
        let region = alloc_chrdev_region(config.base_minor, count, config.region_name)?;

        let mut nodes = Vec::with_capacity(core.device_count());
        for (index, record) in core.table().iter().enumerate() {
            let devno = region
                .devno(index as u32)
                .ok_or(MemDevError::InvalidConfig)?;
            let node = Arc::new(AtomNode {
                name: format!("{}-{}", config.node_prefix, index),
                devno,
                index,
                record: record.clone(),
            });
            register_driver(node.clone());
            nodes.push(node);
        }

        log::info!(
            "memdev: module init successful, class {}, {} nodes",
            config.class_name,
            nodes.len()
        );

        Ok(Self {
            core,
            class_name: config.class_name,
            region: SpinLock::new(Some(region)),
            nodes: SpinLock::new(nodes),
        })
    }

    /// 驱动核心
    pub fn core(&self) -> &Arc<DriverCore> {
        &self.core
    }

    /// 设备类名
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// 当前持有的设备号区间，卸载后为 `None`
    pub fn region(&self) -> Option<ChrdevRegion> {
        self.region.lock().clone()
    }

    /// 当前的设备节点
    pub fn nodes(&self) -> Vec<Arc<AtomNode>> {
        self.nodes.lock().clone()
    }

    /// 设备号对应的设备标识
    pub fn index_of(&self, devno: u64) -> Result<usize, MemDevError> {
        self.region
            .lock()
            .as_ref()
            .and_then(|region| region.index_of(devno))
            .ok_or(MemDevError::NoSuchDevice)
    }

    /// 按设备号打开设备
    pub fn open(&self, devno: u64, requested: AccessMode) -> Result<Session, MemDevError> {
        let index = self.index_of(devno)?;
        self.core.open(index, requested)
    }

    /// 卸载模块，只有第一次调用返回 `true`
    pub fn exit(&self) -> bool {
        let Some(region) = self.region.lock().take() else {
            return false;
        };

        for node in self.nodes.lock().drain(..) {
            unregister_driver(node.devno);
        }
        unregister_chrdev_region(&region);
        self.core.shutdown();

        log::info!("memdev: module {} exited", self.class_name);
        true
    }
}

impl Drop for AtomModule {
    fn drop(&mut self) {
        self.exit();
    }
}
