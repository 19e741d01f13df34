//! 模块加载/卸载与设备号解析

use memdev::{
    AccessMode, AtomConfig, AtomModule, DeviceSpec, DeviceType, MemDevError, config, find_driver,
};
use uapi::dev::{major, makedev, minor};

fn config_with_prefix(prefix: &'static str) -> AtomConfig {
    AtomConfig {
        node_prefix: prefix,
        ..AtomConfig::default()
    }
}

#[test]
fn test_init_creates_nodes_and_region() {
    test_support::init_arch_ops();
    let module = AtomModule::init(&config_with_prefix("init-test")).unwrap();

    let region = module.region().unwrap();
    assert_eq!(region.count() as usize, config::NO_OF_DEVICES);
    assert_eq!(region.name(), config::REGION_NAME);
    assert_eq!(module.class_name(), config::CLASS_NAME);

    let nodes = module.nodes();
    assert_eq!(nodes.len(), config::NO_OF_DEVICES);
    for (index, node) in nodes.iter().enumerate() {
        assert_eq!(node.index(), index);
        assert_eq!(node.name(), format!("init-test-{index}"));

        let driver = find_driver(node.name()).unwrap();
        assert_eq!(driver.device_type(), DeviceType::Char);
        assert_eq!(major(driver.devno()), region.major());
        assert_eq!(minor(driver.devno()), index as u32);
        assert_eq!(node.record().size(), config::DEVICE_SPECS[index].size);
    }

    assert!(module.exit());
}

#[test]
fn test_open_by_devno() {
    test_support::init_arch_ops();
    let module = AtomModule::init(&config_with_prefix("open-test")).unwrap();
    let major = module.region().unwrap().major();

    // 2 号设备只写
    let session = module.open(makedev(major, 1), AccessMode::WriteOnly).unwrap();
    assert_eq!(session.index(), 1);
    module.core().release(session);

    assert_eq!(
        module.open(makedev(major, 1), AccessMode::ReadWrite).unwrap_err(),
        MemDevError::PermissionDenied
    );
    assert_eq!(
        module.open(makedev(major, 4), AccessMode::ReadOnly).unwrap_err(),
        MemDevError::NoSuchDevice
    );
    assert_eq!(
        module.open(makedev(major + 1, 0), AccessMode::ReadOnly).unwrap_err(),
        MemDevError::NoSuchDevice
    );
}

#[test]
fn test_exit_is_idempotent() {
    test_support::init_arch_ops();
    let module = AtomModule::init(&config_with_prefix("exit-test")).unwrap();
    let region = module.region().unwrap();
    let devno = makedev(region.major(), 0);

    assert!(module.exit());
    assert!(!module.exit());
    assert!(module.region().is_none());
    assert!(module.nodes().is_empty());
    assert!(find_driver("exit-test-0").is_none());
    assert!(!module.core().is_live());
    assert_eq!(
        module.open(devno, AccessMode::ReadOnly).unwrap_err(),
        MemDevError::NoSuchDevice
    );
}

#[test]
fn test_init_rejects_invalid_config() {
    test_support::init_arch_ops();
    let config = AtomConfig {
        node_prefix: "bad-test",
        ..AtomConfig::with_specs(&[DeviceSpec::new(0, "zero", AccessMode::ReadWrite)])
    };
    assert_eq!(
        AtomModule::init(&config).err(),
        Some(MemDevError::InvalidConfig)
    );
    assert!(find_driver("bad-test-0").is_none());
}
