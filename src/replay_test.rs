#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn loaded_core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(400.0, 400.0, 1.0);
    let layout = json!({
        "objects": [
            { "id": "a", "type": "rack", "x": 0, "y": 0, "w": 40, "h": 20, "label": "Rack A" },
            { "id": "b", "type": "rack", "x": 200, "y": 200, "w": 40, "h": 20, "label": "Rack B" }
        ]
    });
    match core.load_scene(&layout.to_string()) {
        Ok(_) => core,
        Err(e) => panic!("fixture layout should load: {e}"),
    }
}

// =============================================================
// parse_script
// =============================================================

#[test]
fn parse_all_event_kinds() {
    let script = json!([
        { "event": "down", "id": 1, "x": 1, "y": 2 },
        { "event": "move", "id": 1, "x": 3, "y": 4 },
        { "event": "up", "id": 1 },
        { "event": "wheel", "deltaY": -3, "x": 0, "y": 0 },
        { "event": "pan", "dx": 5, "dy": 6 },
        { "event": "zoom", "factor": 2 },
        { "event": "zoomIn" },
        { "event": "zoomOut" },
        { "event": "fit" },
        { "event": "reset" },
        { "event": "viewport", "width": 10, "height": 20 },
        { "event": "search", "query": "rack" },
        { "event": "next" },
        { "event": "layer", "name": "zones", "visible": false }
    ]);
    let events = parse_script(&script.to_string()).unwrap();
    assert_eq!(events.len(), 14);
    assert_eq!(events[3], ReplayEvent::Wheel { delta_y: -3.0, x: 0.0, y: 0.0 });
    assert_eq!(events[5], ReplayEvent::Zoom { factor: 2.0, x: None, y: None });
    assert_eq!(events[10], ReplayEvent::Viewport { width: 10.0, height: 20.0, dpr: 1.0 });
}

#[test]
fn parse_rejects_unknown_event() {
    assert!(parse_script(r#"[{ "event": "teleport" }]"#).is_err());
    assert!(parse_script(r#"{ "event": "fit" }"#).is_err());
}

// =============================================================
// run
// =============================================================

#[test]
fn drag_script_pans() {
    let mut core = loaded_core();
    let before = core.camera();
    let events = vec![
        ReplayEvent::Down { id: 1, x: 10.0, y: 10.0 },
        ReplayEvent::Move { id: 1, x: 30.0, y: 5.0 },
        ReplayEvent::Up { id: 1 },
    ];
    let summary = run(&mut core, &events);
    assert_eq!(summary.events, 3);
    assert_eq!(summary.renders, 1);
    assert_eq!(summary.camera.pan_x, before.pan_x + 20.0);
    assert_eq!(summary.camera.pan_y, before.pan_y - 5.0);
}

#[test]
fn search_script_cycles_and_reports() {
    let mut core = loaded_core();
    let events = vec![
        ReplayEvent::Search { query: "rack".to_owned() },
        ReplayEvent::Next,
        ReplayEvent::Next,
    ];
    let summary = run(&mut core, &events);
    assert_eq!(summary.search, "1 of 2");
    assert_eq!(summary.highlighted.as_deref(), Some("a"));
    assert_eq!(summary.renders, 3);
}

#[test]
fn failed_search_is_notified() {
    let mut core = loaded_core();
    let summary = run(&mut core, &[ReplayEvent::Search { query: "forklift".to_owned() }]);
    assert_eq!(summary.notifications, vec!["No matches".to_owned()]);
    assert_eq!(summary.search, "0 of 0");
}

#[test]
fn zoom_with_anchor_keeps_point() {
    let mut core = loaded_core();
    let anchor = Point::new(50.0, 60.0);
    let before = core.screen_to_world(anchor);
    apply(&mut core, &ReplayEvent::Zoom { factor: 1.5, x: Some(50.0), y: Some(60.0) });
    let after = core.screen_to_world(anchor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn no_op_events_do_not_count_as_renders() {
    let mut core = loaded_core();
    let events = vec![
        ReplayEvent::Wheel { delta_y: 0.0, x: 0.0, y: 0.0 },
        ReplayEvent::Move { id: 9, x: 1.0, y: 1.0 },
        ReplayEvent::Next,
    ];
    assert_eq!(run(&mut core, &events).renders, 0);
}
