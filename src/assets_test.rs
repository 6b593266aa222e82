use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FakeImage {
    decoded: bool,
    width: u32,
    height: u32,
}

impl FakeImage {
    fn loaded(width: u32, height: u32) -> Self {
        Self { decoded: true, width, height }
    }

    fn pending() -> Self {
        Self { decoded: false, width: 0, height: 0 }
    }
}

impl Visual for FakeImage {
    fn is_decoded(&self) -> bool {
        self.decoded
    }

    fn natural_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// =============================================================
// Visual readiness
// =============================================================

#[test]
fn visual_ready_when_decoded_with_size() {
    assert!(FakeImage::loaded(132, 65).is_ready());
}

#[test]
fn visual_not_ready_while_pending() {
    assert!(!FakeImage::pending().is_ready());
}

#[test]
fn visual_not_ready_with_zero_width() {
    assert!(!FakeImage::loaded(0, 65).is_ready());
    assert!(!FakeImage::loaded(132, 0).is_ready());
}

// =============================================================
// Registry
// =============================================================

#[test]
fn new_registry_is_empty() {
    let reg: AssetRegistry<FakeImage> = AssetRegistry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.len(), 0);
}

#[test]
fn unknown_name_is_not_ready() {
    let reg: AssetRegistry<FakeImage> = AssetRegistry::new();
    assert!(!reg.is_ready("grass"));
    assert!(reg.dimensions("grass").is_none());
    assert!(reg.get_ready("grass").is_none());
}

#[test]
fn registered_pending_asset_is_not_ready() {
    let mut reg = AssetRegistry::new();
    reg.register("grass", FakeImage::pending());
    assert_eq!(reg.len(), 1);
    assert!(!reg.is_ready("grass"));
    assert!(reg.dimensions("grass").is_none());
}

#[test]
fn loaded_asset_reports_dimensions() {
    let mut reg = AssetRegistry::new();
    reg.register("grass", FakeImage::loaded(132, 99));
    assert!(reg.is_ready("grass"));
    assert_eq!(reg.dimensions("grass"), Some((132, 99)));
    let (visual, w, h) = reg.get_ready("grass").unwrap();
    assert_eq!(*visual, FakeImage::loaded(132, 99));
    assert_eq!((w, h), (132, 99));
}

#[test]
fn register_overwrites_previous() {
    let mut reg = AssetRegistry::new();
    reg.register("grass", FakeImage::loaded(10, 10));
    reg.register("grass", FakeImage::pending());
    assert_eq!(reg.len(), 1);
    assert!(!reg.is_ready("grass"));
}

#[test]
fn unregister_removes() {
    let mut reg = AssetRegistry::new();
    reg.register("grass", FakeImage::loaded(10, 10));
    assert!(reg.unregister("grass").is_some());
    assert!(reg.unregister("grass").is_none());
    assert!(reg.is_empty());
    assert!(!reg.is_ready("grass"));
}
