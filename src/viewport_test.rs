#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance() {
    let a = Point::new(100.0, 100.0);
    assert_eq!(a.distance_to(Point::new(130.0, 100.0)), 30.0);
    assert_eq!(a.distance_to(Point::new(103.0, 104.0)), 5.0);
    assert_eq!(a.distance_to(a), 0.0);
}

// --- Viewport defaults ---

#[test]
fn viewport_default_is_unpanned_and_empty() {
    let vp = Viewport::default();
    assert_eq!(vp.pan_x, 0.0);
    assert_eq!(vp.pan_y, 0.0);
    assert!(vp.hovered.is_none());
    assert!(vp.selected.is_none());
    assert!(!vp.pressed);
}

// --- Conversions ---

#[test]
fn screen_to_map_subtracts_pan() {
    let vp = Viewport { pan_x: 20.0, pan_y: -10.0, ..Default::default() };
    assert_eq!(vp.screen_to_map(Point::new(50.0, 50.0)), Point::new(30.0, 60.0));
}

#[test]
fn map_to_screen_adds_pan() {
    let vp = Viewport { pan_x: 20.0, pan_y: -10.0, ..Default::default() };
    assert_eq!(vp.map_to_screen(Point::new(30.0, 60.0)), Point::new(50.0, 50.0));
}

#[test]
fn pan_by_accumulates() {
    let mut vp = Viewport::default();
    vp.pan_by(5.0, 3.0);
    vp.pan_by(-2.0, 7.0);
    assert_eq!(vp.pan_x, 3.0);
    assert_eq!(vp.pan_y, 10.0);
}

// --- Sentinel ---

#[test]
fn no_hover_reports_sentinel() {
    let vp = Viewport::default();
    assert_eq!(vp.hovered_or_sentinel(), (-1, -1));
    assert_eq!(vp.selected_or_sentinel(), (-1, -1));
}

#[test]
fn hover_reports_indices() {
    let vp = Viewport {
        hovered: Some(TilePos::new(4, 2)),
        selected: Some(TilePos::new(0, 7)),
        ..Default::default()
    };
    assert_eq!(vp.hovered_or_sentinel(), (4, 2));
    assert_eq!(vp.selected_or_sentinel(), (0, 7));
}
