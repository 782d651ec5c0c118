use super::*;
use crate::doc::Shape;
use crate::geometry::{Aabb, Point};

fn obj(id: &str, text: &str) -> SceneObject {
    SceneObject {
        id: id.to_owned(),
        kind: "rack".to_owned(),
        layer: None,
        shape: Shape::Rect { x: 0.0, y: 0.0, w: 1.0, h: 1.0 },
        center: Point::new(0.5, 0.5),
        rotation: 0.0,
        aabb: Aabb::new(0.0, 0.0, 1.0, 1.0),
        color: None,
        label: None,
        label_size: None,
        skus: Vec::new(),
        search_text: normalize_text(text),
    }
}

fn record(sku: &str, name: &str, category: &str, tags: &str) -> SkuRecord {
    SkuRecord { sku: sku.to_owned(), name: name.to_owned(), category: category.to_owned(), tags: tags.to_owned() }
}

fn sku(code: &str) -> SkuRef {
    SkuRef { code: code.to_owned(), qty: None }
}

// =============================================================
// normalize_text
// =============================================================

#[test]
fn normalize_text_folds_case_and_accents() {
    assert_eq!(normalize_text("Café"), "cafe");
    assert_eq!(normalize_text("CAFE"), "cafe");
    assert_eq!(normalize_text("Ångström Ñandú"), "angstrom nandu");
}

#[test]
fn normalize_text_keeps_plain_ascii() {
    assert_eq!(normalize_text("rack-12 / bay 3"), "rack-12 / bay 3");
}

// =============================================================
// SkuTable / build_search_text
// =============================================================

#[test]
fn sku_table_later_record_wins() {
    let table = SkuTable::new([record("A", "first", "", ""), record("A", "second", "", "")]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("A").map(|r| r.name.as_str()), Some("second"));
    assert!(table.get("B").is_none());
}

#[test]
fn build_search_text_concatenates_sources() {
    let table = SkuTable::new([record("S1", "Widget", "Parts", "blue large")]);
    let text = build_search_text(Some("Aisle 3"), &[sku("S1"), sku("S2")], &table);
    assert_eq!(text, "aisle 3 s1 widget parts blue large s2");
}

#[test]
fn build_search_text_without_label_or_skus_is_empty() {
    assert_eq!(build_search_text(None, &[], &SkuTable::default()), "");
}

// =============================================================
// Query terms
// =============================================================

#[test]
fn query_terms_split_on_whitespace() {
    assert_eq!(query_terms("  Blue\tWIDGET  "), vec!["blue".to_owned(), "widget".to_owned()]);
    assert!(query_terms("   ").is_empty());
}

#[test]
fn matches_all_is_substring_and() {
    let terms = query_terms("a b");
    assert!(matches_all("xa yb", &terms));
    assert!(!matches_all("xa yc", &terms));
    assert!(!matches_all("anything", &[]));
}

#[test]
fn accented_query_matches_plain_text() {
    let terms = query_terms("café");
    assert!(matches_all("cafe corner", &terms));
}

// =============================================================
// SearchStatus
// =============================================================

#[test]
fn status_display() {
    assert_eq!(SearchStatus { position: Some(2), total: 5 }.to_string(), "2 of 5");
    assert_eq!(SearchStatus { position: None, total: 0 }.to_string(), "0 of 0");
}

// =============================================================
// SearchSession
// =============================================================

#[test]
fn run_collects_matches_in_scene_order() {
    let objects = [obj("1", "red box"), obj("2", "blue box"), obj("3", "red crate")];
    let mut session = SearchSession::new();
    assert_eq!(session.run("red", &objects), 2);
    assert_eq!(session.matches(), ["1".to_owned(), "3".to_owned()]);
    assert_eq!(session.current().map(String::as_str), Some("1"));
    assert_eq!(session.highlighted().map(String::as_str), Some("1"));
    assert_eq!(session.status().to_string(), "1 of 2");
}

#[test]
fn run_with_no_matches_resets_cursor() {
    let objects = [obj("1", "red box")];
    let mut session = SearchSession::new();
    session.run("red", &objects);
    assert_eq!(session.run("green", &objects), 0);
    assert!(session.current().is_none());
    assert!(session.highlighted().is_none());
    assert_eq!(session.status().to_string(), "0 of 0");
}

#[test]
fn advance_cycles_through_all_matches() {
    let objects = [obj("1", "bin"), obj("2", "bin"), obj("3", "bin"), obj("4", "rack")];
    let mut session = SearchSession::new();
    let n = session.run("bin", &objects);
    let first = session.current().cloned();

    let mut visited = Vec::new();
    for _ in 0..n {
        visited.push(session.advance().cloned());
    }
    assert_eq!(visited.last().cloned().flatten(), first);
    assert_eq!(visited, vec![Some("2".to_owned()), Some("3".to_owned()), Some("1".to_owned())]);
}

#[test]
fn advance_updates_highlight_and_status() {
    let objects = [obj("1", "bin"), obj("2", "bin")];
    let mut session = SearchSession::new();
    session.run("bin", &objects);
    session.advance();
    assert_eq!(session.highlighted().map(String::as_str), Some("2"));
    assert_eq!(session.status().to_string(), "2 of 2");
}

#[test]
fn advance_without_matches_is_none() {
    let mut session = SearchSession::new();
    assert!(session.advance().is_none());
}

#[test]
fn clear_drops_everything() {
    let objects = [obj("1", "bin")];
    let mut session = SearchSession::new();
    session.run("bin", &objects);
    session.clear();
    assert!(session.matches().is_empty());
    assert!(session.highlighted().is_none());
    assert_eq!(session.status(), SearchStatus { position: None, total: 0 });
}
