//! Common test utilities for building diagrams.
use flowboard::prelude::*;
use std::sync::{Arc, Mutex};

/// Two nodes and the edge between them.
///
/// Layout: `A(start, 0,0) -> B(process, 100,100)`
#[allow(dead_code)]
pub fn create_pair() -> (GraphStore, NodeId, NodeId, EdgeId) {
    let mut store = GraphStore::new();
    let a = store.create_node(NodeKind::Start, "A", Position::new(0.0, 0.0));
    let b = store.create_node(NodeKind::Process, "B", Position::new(100.0, 100.0));
    let edge = store.create_edge(&a, &b, None).unwrap();
    (store, a, b, edge)
}

/// A small decision flow with labelled yes/no branches.
///
/// Logic: `Start -> Check? -yes-> Ship -> End`, `Check? -no-> Fix -> Check?`
#[allow(dead_code)]
pub fn create_decision_flow() -> GraphStore {
    let mut store = GraphStore::new();
    let start = store.create_node(NodeKind::Start, "Start", Position::new(250.0, 5.0));
    let check = store.create_node(NodeKind::Decision, "Check?", Position::new(220.0, 100.0));
    let ship = store.create_node(NodeKind::Process, "Ship", Position::new(450.0, 150.0));
    let fix = store.create_node(NodeKind::Subprocess, "Fix", Position::new(220.0, 320.0));
    let end = store.create_node(NodeKind::End, "End", Position::new(470.0, 300.0));

    store.create_edge(&start, &check, None).unwrap();
    let yes = store
        .create_edge(&check, &ship, Some("yes".to_string()))
        .unwrap();
    let no = store
        .create_edge(&check, &fix, Some("no".to_string()))
        .unwrap();
    store.create_edge(&ship, &end, None).unwrap();
    store.create_edge(&fix, &check, None).unwrap();

    store.update_label(&ElementRef::Edge(yes), "yes");
    store.update_label(&ElementRef::Edge(no), "no");
    store
}

/// A controller over an empty diagram with an identity viewport.
#[allow(dead_code)]
pub fn create_empty_canvas() -> CanvasController {
    CanvasController::builder()
        .with_store(GraphStore::new())
        .build()
}

/// Subscribes a recorder that collects every event the store emits.
#[allow(dead_code)]
pub fn record_events(store: &mut GraphStore) -> Arc<Mutex<Vec<GraphEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    events
}
