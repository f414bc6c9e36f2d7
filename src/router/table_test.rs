use super::*;

// =============================================================
// build
// =============================================================

#[test]
fn dashboard_table_has_five_sections_in_order() {
    let table = RouteTable::dashboard();
    let paths: Vec<&str> = table.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "/threats", "/asset", "/engine", "/settings"]);
    assert_eq!(table.len(), 5);
}

#[test]
fn duplicate_path_is_rejected() {
    let err = RouteTable::build([
        RouteEntry::new("/threats", "Threats", View::Threats),
        RouteEntry::new("/threats", "Alerts", View::Threats),
    ])
    .unwrap_err();
    assert_eq!(err, RouteError::DuplicatePath("/threats".into()));
}

#[test]
fn duplicate_name_is_rejected() {
    let err = RouteTable::build([
        RouteEntry::new("/engine", "Engine", View::Engine),
        RouteEntry::new("/engine/v2", "Engine", View::Engine),
    ])
    .unwrap_err();
    assert_eq!(err, RouteError::DuplicateName("Engine".into()));
}

#[test]
fn malformed_entries_are_rejected() {
    let err = RouteTable::build([RouteEntry::new("threats", "Threats", View::Threats)]).unwrap_err();
    assert!(matches!(err, RouteError::InvalidEntry { .. }));

    let err = RouteTable::build([RouteEntry::new("/threats", "", View::Threats)]).unwrap_err();
    assert!(matches!(err, RouteError::InvalidEntry { .. }));
}

#[test]
fn empty_table_builds() {
    let table = RouteTable::build(Vec::new()).unwrap();
    assert!(table.is_empty());
    assert!(table.resolve("/").is_err());
}

// =============================================================
// lookup
// =============================================================

#[test]
fn resolve_exact_path() {
    let table = RouteTable::dashboard();
    let entry = table.resolve("/threats").unwrap();
    assert_eq!(entry.name, "Threats");
    assert_eq!(entry.view, View::Threats);
}

#[test]
fn resolve_unknown_path_fails() {
    let table = RouteTable::dashboard();
    assert_eq!(table.resolve("/unknown").unwrap_err(), RouteError::RouteNotFound("/unknown".into()));
}

#[test]
fn resolve_is_exact_not_prefix_or_case_folded() {
    let table = RouteTable::dashboard();
    assert!(table.resolve("/threats/").is_err());
    assert!(table.resolve("/Threats").is_err());
    assert!(table.resolve("").is_err());
}

#[test]
fn lookup_falls_back_to_name() {
    let table = RouteTable::dashboard();
    assert_eq!(table.lookup("/engine").unwrap().view, View::Engine);
    assert_eq!(table.lookup("Engine").unwrap().path, "/engine");
    assert!(table.lookup("engine").is_err());
}

#[test]
fn path_for_reverses_name() {
    let table = RouteTable::dashboard();
    assert_eq!(table.path_for("Dashboard"), Some("/"));
    assert_eq!(table.path_for("Network"), None);
}

#[test]
fn view_display_matches_route_name() {
    for entry in RouteTable::dashboard().entries() {
        assert_eq!(entry.view.to_string(), entry.name);
    }
}
