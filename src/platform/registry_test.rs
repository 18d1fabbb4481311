use super::*;
use crate::platform::mock::FakePlatform;

#[test]
fn test_builtin_platforms() {
    let registry = PlatformRegistry::builtin();
    assert_eq!(registry.names(), vec!["android", "blackberry", "ios"]);
}

#[test]
fn test_get_builtin() {
    let registry = PlatformRegistry::builtin();
    let platform = registry.get("ios").unwrap();
    assert_eq!(platform.name(), "ios");
    assert_eq!(platform.display_name(), "iOS");
    assert_eq!(platform.repo(), "cordova-ios");
}

#[test]
fn test_get_unknown() {
    let registry = PlatformRegistry::builtin();
    let result = registry.get("windows");
    assert!(matches!(result, Err(PlatformError::UnknownPlatform(name)) if name == "windows"));
}

#[test]
fn test_register_new_platform() {
    let mut registry = PlatformRegistry::builtin();
    registry.register(Arc::new(FakePlatform::new("firefoxos")));

    assert!(registry.contains("firefoxos"));
    assert_eq!(registry.names().len(), 4);
}

#[test]
fn test_register_replaces_same_name() {
    let mut registry = PlatformRegistry::new();
    registry.register(Arc::new(FakePlatform::new("android")));
    registry.register(Arc::new(FakePlatform::new("android")));

    assert_eq!(registry.names(), vec!["android"]);
}

#[test]
fn test_empty_registry() {
    let registry = PlatformRegistry::new();
    assert!(registry.names().is_empty());
    assert!(registry.iter().next().is_none());
}
