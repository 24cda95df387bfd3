//! Tests for the canvas controller: drops, connections, renaming and deletion.
mod common;
use common::*;
use flowboard::palette::{KIND_MIME, LABEL_MIME};
use flowboard::prelude::*;

#[test]
fn test_default_canvas_starts_with_start_node() {
    let canvas = CanvasController::default();
    assert_eq!(canvas.store().node_count(), 1);
    assert_eq!(canvas.store().nodes()[0].kind, NodeKind::Start);
    assert!(canvas.rename_state().is_idle());
}

#[test]
fn test_drop_creates_node_in_diagram_space() {
    let mut canvas = CanvasController::builder()
        .with_store(GraphStore::new())
        .with_viewport(Viewport::new(Position::new(100.0, 50.0), 2.0))
        .build();

    let payload = Palette::default().drag_start(NodeKind::Decision);
    let id = canvas
        .handle_drop(payload, Position::new(300.0, 250.0))
        .expect("decision drop creates a node");

    let node = canvas.store().node(&id).unwrap();
    assert_eq!(node.kind, NodeKind::Decision);
    assert_eq!(node.label, "Decision");
    assert_eq!(node.position, Position::new(100.0, 100.0));
}

#[test]
fn test_drop_uses_payload_recorded_at_drag_start() {
    let mut canvas = create_empty_canvas();
    canvas.begin_drag(DragPayload::new("database", "Orders"));
    assert!(canvas.drag_payload().is_some());

    let id = canvas.handle_drop(None, Position::new(10.0, 20.0)).unwrap();

    assert!(canvas.drag_payload().is_none());
    assert_eq!(canvas.store().node(&id).unwrap().label, "Orders");
    // The payload is consumed by the drop.
    assert!(canvas.handle_drop(None, Position::default()).is_none());
}

#[test]
fn test_drop_without_label_falls_back_to_kind_name() {
    let mut canvas = create_empty_canvas();
    let id = canvas
        .handle_drop(Some(DragPayload::new("manualInput", "")), Position::default())
        .unwrap();
    assert_eq!(canvas.store().node(&id).unwrap().label, "manualInput");
}

#[test]
fn test_invalid_drops_are_ignored() {
    let mut canvas = create_empty_canvas();
    assert!(canvas.handle_drop(None, Position::default()).is_none());
    assert!(
        canvas
            .handle_drop(Some(DragPayload::new("hexagon", "Hex")), Position::default())
            .is_none()
    );
    assert!(canvas.store().is_empty());
}

#[test]
fn test_drag_payload_from_data_transfer() {
    let payload = DragPayload::from_data_transfer(|key| match key {
        KIND_MIME => Some("inputOutput".to_string()),
        LABEL_MIME => Some("Input/Output".to_string()),
        _ => None,
    });
    assert_eq!(payload, Some(DragPayload::new("inputOutput", "Input/Output")));

    let missing = DragPayload::from_data_transfer(|_| None);
    assert_eq!(missing, None);

    let end = DragPayload::new("end", "End");
    assert_eq!(end.data_entries(), [(KIND_MIME, "end"), (LABEL_MIME, "End")]);
}

#[test]
fn test_connect_creates_edge_with_handle() {
    let mut canvas = create_empty_canvas();
    let check = canvas
        .handle_drop(Some(DragPayload::new("decision", "Ok?")), Position::default())
        .unwrap();
    let done = canvas
        .handle_drop(Some(DragPayload::new("end", "End")), Position::new(300.0, 0.0))
        .unwrap();

    let edge = canvas
        .connect(Connection::new(check.clone(), done.clone()).from_handle("yes"))
        .unwrap()
        .expect("released on a node");

    let edge = canvas.store().edge(&edge).unwrap();
    assert_eq!(edge.source, check);
    assert_eq!(edge.target, done);
    assert_eq!(edge.source_handle.as_deref(), Some("yes"));
    assert_eq!(edge.label, "");
}

#[test]
fn test_connect_drops_undeclared_handle() {
    let mut canvas = create_empty_canvas();
    let a = canvas
        .handle_drop(Some(DragPayload::new("process", "A")), Position::default())
        .unwrap();
    let b = canvas
        .handle_drop(Some(DragPayload::new("process", "B")), Position::new(0.0, 100.0))
        .unwrap();

    let edge = canvas
        .connect(Connection::new(a, b).from_handle("yes"))
        .unwrap()
        .unwrap();
    assert_eq!(canvas.store().edge(&edge).unwrap().source_handle, None);
}

#[test]
fn test_connect_to_empty_space_is_noop() {
    let mut canvas = CanvasController::default();
    let start = canvas.store().nodes()[0].id.clone();
    let result = canvas.connect(Connection {
        source: start,
        source_handle: None,
        target: None,
    });
    assert_eq!(result, Ok(None));
    assert_eq!(canvas.store().edge_count(), 0);
}

#[test]
fn test_connect_to_missing_node_reports_invalid_reference() {
    let mut canvas = CanvasController::default();
    let start = canvas.store().nodes()[0].id.clone();
    let result = canvas.connect(Connection::new(start, NodeId::from("gone")));
    assert!(matches!(result, Err(GraphError::InvalidReference { .. })));
    assert_eq!(canvas.store().edge_count(), 0);
}

#[test]
fn test_rename_edge_commit_and_cancel() {
    // Confirming "yes" on an unlabelled edge sets it; cancelling keeps "".
    let (store, _a, _b, edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();

    assert!(canvas.double_click_edge(&edge));
    assert_eq!(canvas.rename_state(), &RenameState::EditingEdge(edge.clone()));
    assert_eq!(canvas.editor().value(), Some(""));
    canvas.cancel_rename();
    assert!(canvas.rename_state().is_idle());
    assert!(!canvas.editor().is_open());
    assert_eq!(canvas.store().edge(&edge).unwrap().label, "");

    canvas.double_click_edge(&edge);
    canvas.edit_label("yes");
    let renamed = canvas.commit_rename();
    assert_eq!(renamed, Some(ElementRef::Edge(edge.clone())));
    assert_eq!(canvas.store().edge(&edge).unwrap().label, "yes");
    assert!(canvas.rename_state().is_idle());
}

#[test]
fn test_rename_node_prefills_current_label() {
    let (store, a, _b, _edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();

    canvas.double_click_node(&a);
    assert_eq!(canvas.editor().title(), Some("Rename node"));
    assert_eq!(canvas.editor().value(), Some("A"));
    assert!(canvas.editor().has_focus());

    canvas.commit_rename_with("");
    assert_eq!(canvas.store().node(&a).unwrap().label, "");
}

#[test]
fn test_new_rename_discards_previous_one() {
    let (store, a, b, edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();

    canvas.double_click_node(&a);
    canvas.edit_label("never saved");
    canvas.double_click_edge(&edge);
    assert_eq!(canvas.editor().value(), Some(""));
    canvas.double_click_node(&b);
    assert_eq!(canvas.editor().value(), Some("B"));

    canvas.commit_rename_with("B2");
    assert_eq!(canvas.store().node(&a).unwrap().label, "A");
    assert_eq!(canvas.store().edge(&edge).unwrap().label, "");
    assert_eq!(canvas.store().node(&b).unwrap().label, "B2");
}

#[test]
fn test_rename_of_missing_element_stays_idle() {
    let mut canvas = create_empty_canvas();
    assert!(!canvas.double_click_node(&NodeId::from("nope")));
    assert!(!canvas.double_click_edge(&EdgeId::from("nope")));
    assert!(canvas.rename_state().is_idle());
    assert_eq!(canvas.commit_rename(), None);
}

#[test]
fn test_rename_target_deleted_while_open_is_noop() {
    let (store, a, _b, _edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();
    canvas.double_click_node(&a);
    canvas.select([ElementRef::Node(a.clone())]);
    canvas.delete_selected();

    assert_eq!(canvas.commit_rename_with("late"), None);
    assert!(canvas.rename_state().is_idle());
}

#[test]
fn test_delete_key_removes_selection() {
    let (store, a, b, edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();
    canvas.select([ElementRef::Node(a.clone())]);

    assert!(canvas.handle_key("Enter").is_none());
    let deletion = canvas.handle_key("Delete").expect("delete key handled");

    assert_eq!(deletion.nodes, vec![a]);
    assert_eq!(deletion.cascaded, vec![edge]);
    assert!(canvas.store().node(&b).is_some());

    canvas.select([ElementRef::Node(b.clone())]);
    canvas.handle_key("Backspace");
    assert!(canvas.store().is_empty());
}

#[test]
fn test_delete_key_is_ignored_while_renaming() {
    let (store, a, _b, _edge) = create_pair();
    let mut canvas = CanvasController::builder().with_store(store).build();
    canvas.select([ElementRef::Node(a.clone())]);
    canvas.double_click_node(&a);

    assert!(canvas.handle_key("Backspace").is_none());
    assert!(canvas.store().node(&a).is_some());
}

#[test]
fn test_node_drag_respects_zoom() {
    let (store, a, _b, _edge) = create_pair();
    let mut canvas = CanvasController::builder()
        .with_store(store)
        .with_viewport(Viewport::new(Position::default(), 2.0))
        .build();

    assert!(canvas.move_node_by(&a, 40.0, -20.0));
    assert_eq!(canvas.store().node(&a).unwrap().position, Position::new(20.0, -10.0));

    canvas.viewport_mut().pan_by(10.0, 10.0);
    assert!(canvas.drag_node_to(&a, Position::new(110.0, 210.0)));
    assert_eq!(canvas.store().node(&a).unwrap().position, Position::new(50.0, 100.0));

    assert!(!canvas.move_node_by(&NodeId::from("nope"), 1.0, 1.0));
}

#[test]
fn test_non_finite_points_never_reach_the_store() {
    let mut canvas = create_empty_canvas();
    let dropped = canvas.handle_drop(
        Some(DragPayload::new("process", "Lost")),
        Position::new(f64::INFINITY, 0.0),
    );
    assert!(dropped.is_none());
    assert!(canvas.store().is_empty());

    let id = canvas
        .handle_drop(Some(DragPayload::new("process", "Kept")), Position::new(5.0, 5.0))
        .unwrap();
    assert!(!canvas.move_node_by(&id, f64::NAN, 0.0));
    assert!(!canvas.drag_node_to(&id, Position::new(0.0, f64::NEG_INFINITY)));
    assert_eq!(canvas.store().node(&id).unwrap().position, Position::new(5.0, 5.0));
}

#[test]
fn test_viewport_zoom_cannot_be_forced_out_of_range() {
    let canvas = CanvasController::builder()
        .with_viewport(Viewport::new(Position::default(), 0.0))
        .build();
    assert_eq!(canvas.viewport().zoom(), 0.5);
    let point = canvas.viewport().screen_to_diagram(Position::new(10.0, 20.0));
    assert_eq!(point, Position::new(20.0, 40.0));
}
