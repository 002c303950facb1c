//! Integration tests for StateGraph: build validation, ordering, and invoke.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use loci::{AgentError, FnNode, GraphBuildError, NodeObserver, StateGraph};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tally {
    x: i64,
    y: i64,
    z: i64,
}

fn pos(order: &[String], id: &str) -> usize {
    order
        .iter()
        .position(|n| n == id)
        .unwrap_or_else(|| panic!("{id} not in order {order:?}"))
}

#[tokio::test]
async fn linear_chain_accumulates_state() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |mut s: Tally| {
            s.x = 1;
            Ok(s)
        })))
        .add_node("b", Box::new(FnNode::new("b", |mut s: Tally| {
            s.y = s.x + 1;
            Ok(s)
        })))
        .add_node("c", Box::new(FnNode::new("c", |mut s: Tally| {
            s.z = s.y + 1;
            Ok(s)
        })))
        .add_edge("a", "b")
        .add_edge("b", "c")
        .set_entry_point("a");

    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.execution_order(), ["a", "b", "c"]);

    let out = compiled.invoke(Tally::default()).await.unwrap();
    assert_eq!(out, Tally { x: 1, y: 2, z: 3 });
}

#[tokio::test]
async fn fan_out_fan_in_respects_dependencies() {
    let mut graph = StateGraph::<Tally>::new();
    for id in ["source", "left", "right", "merge", "sink"] {
        graph.add_node(id, Box::new(FnNode::new(id, |s: Tally| Ok(s))));
    }
    graph
        .add_edge("source", "left")
        .add_edge("source", "right")
        .add_edge("left", "merge")
        .add_edge("right", "merge")
        .add_edge("merge", "sink")
        .set_entry_point("source");

    let compiled = graph.compile().unwrap();
    let order = compiled.execution_order().to_vec();
    assert_eq!(order.len(), 5);
    assert!(pos(&order, "left") > pos(&order, "source"));
    assert!(pos(&order, "right") > pos(&order, "source"));
    assert!(pos(&order, "merge") > pos(&order, "left"));
    assert!(pos(&order, "merge") > pos(&order, "right"));
    assert_eq!(pos(&order, "sink"), 4);
    // Ready-at-once siblings run in registration order.
    assert!(pos(&order, "left") < pos(&order, "right"));
}

#[tokio::test]
async fn fan_in_node_runs_exactly_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_node("c", Box::new(FnNode::new("c", |s: Tally| Ok(s))))
        .add_node(
            "merge",
            Box::new(FnNode::new("merge", move |s: Tally| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(s)
            })),
        )
        .add_edge("a", "b")
        .add_edge("a", "c")
        .add_edge("b", "merge")
        .add_edge("c", "merge")
        .set_entry_point("a");

    let compiled = graph.compile().unwrap();
    compiled.invoke(Tally::default()).await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn identical_graphs_produce_identical_runs() {
    let build = || {
        let mut graph = StateGraph::<Tally>::new();
        graph
            .add_node("a", Box::new(FnNode::new("a", |mut s: Tally| {
                s.x += 1;
                Ok(s)
            })))
            .add_node("b", Box::new(FnNode::new("b", |mut s: Tally| {
                s.y = s.x * 10;
                Ok(s)
            })))
            .add_node("c", Box::new(FnNode::new("c", |mut s: Tally| {
                s.z = s.y + s.x;
                Ok(s)
            })))
            .add_edge("a", "b")
            .add_edge("a", "c")
            .set_entry_point("a");
        graph.compile().unwrap()
    };

    let first = build();
    let second = build();
    assert_eq!(first.execution_order(), second.execution_order());

    let out1 = first.invoke(Tally::default()).await.unwrap();
    let out2 = second.invoke(Tally::default()).await.unwrap();
    assert_eq!(out1, out2);

    // The same compiled graph is reusable: equal input, equal output.
    let again = first.invoke(Tally::default()).await.unwrap();
    assert_eq!(out1, again);
}

#[tokio::test]
async fn unreachable_node_never_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_node(
            "detached",
            Box::new(FnNode::new("detached", move |mut s: Tally| {
                counter.fetch_add(1, Ordering::SeqCst);
                s.z = 999;
                Ok(s)
            })),
        )
        .add_edge("a", "b")
        .set_entry_point("a");

    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.execution_order(), ["a", "b"]);

    let out = compiled.invoke(Tally::default()).await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(out.z, 0);
}

#[tokio::test]
async fn entry_runs_first_despite_inbound_edges() {
    // A cycle through the entry is permitted: the entry's in-degree is
    // forced to zero, which breaks the cycle at the start.
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("start", Box::new(FnNode::new("start", |s: Tally| Ok(s))))
        .add_node("other", Box::new(FnNode::new("other", |s: Tally| Ok(s))))
        .add_edge("start", "other")
        .add_edge("other", "start")
        .set_entry_point("start");

    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.execution_order(), ["start", "other"]);
}

#[tokio::test]
async fn cycle_not_through_entry_is_rejected() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("entry", Box::new(FnNode::new("entry", |s: Tally| Ok(s))))
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_edge("entry", "a")
        .add_edge("a", "b")
        .add_edge("b", "a")
        .set_entry_point("entry");

    match graph.compile() {
        Err(GraphBuildError::Cycle(ids)) => {
            assert!(ids.contains(&"a".to_string()));
            assert!(ids.contains(&"b".to_string()));
            assert!(!ids.contains(&"entry".to_string()));
        }
        other => panic!("expected Cycle, got {other:?}", other = other.err()),
    }
}

#[tokio::test]
async fn cycle_without_entry_is_rejected() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_edge("a", "b")
        .add_edge("b", "a");

    assert!(matches!(graph.compile(), Err(GraphBuildError::Cycle(_))));
}

#[tokio::test]
async fn duplicate_node_is_rejected() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))));

    match graph.compile() {
        Err(GraphBuildError::DuplicateNode(id)) => assert_eq!(id, "a"),
        other => panic!("expected DuplicateNode, got {other:?}", other = other.err()),
    }
}

#[tokio::test]
async fn dangling_edge_is_rejected() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_edge("a", "missing");

    match graph.compile() {
        Err(GraphBuildError::UnknownEdgeEndpoint { missing, .. }) => {
            assert_eq!(missing, "missing")
        }
        other => panic!("expected UnknownEdgeEndpoint, got {other:?}", other = other.err()),
    }
}

#[tokio::test]
async fn unknown_entry_is_rejected() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .set_entry_point("nowhere");

    assert!(matches!(
        graph.compile(),
        Err(GraphBuildError::UnknownEntry(id)) if id == "nowhere"
    ));
}

#[tokio::test]
async fn empty_graph_is_rejected() {
    let graph = StateGraph::<Tally>::new();
    assert!(matches!(graph.compile(), Err(GraphBuildError::EmptyGraph)));
}

#[tokio::test]
async fn best_effort_truncates_at_cycle_boundary() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node(
            "entry",
            Box::new(FnNode::new("entry", move |s: Tally| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(s)
            })),
        )
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_edge("entry", "a")
        .add_edge("a", "b")
        .add_edge("b", "a")
        .set_entry_point("entry");

    let compiled = graph.compile_best_effort();
    assert_eq!(compiled.execution_order(), ["entry"]);
    compiled.invoke(Tally::default()).await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn best_effort_keeps_last_duplicate() {
    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |mut s: Tally| {
            s.x = 1;
            Ok(s)
        })))
        .add_node("a", Box::new(FnNode::new("a", |mut s: Tally| {
            s.x = 2;
            Ok(s)
        })));

    let compiled = graph.compile_best_effort();
    let out = compiled.invoke(Tally::default()).await.unwrap();
    assert_eq!(out.x, 2);
}

#[tokio::test]
async fn node_failure_aborts_the_run() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node("a", Box::new(FnNode::new("a", |s: Tally| Ok(s))))
        .add_node(
            "boom",
            Box::new(FnNode::new("boom", |_s: Tally| {
                Err(AgentError::ExecutionFailed("collaborator down".into()))
            })),
        )
        .add_node(
            "after",
            Box::new(FnNode::new("after", move |s: Tally| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(s)
            })),
        )
        .add_edge("a", "boom")
        .add_edge("boom", "after")
        .set_entry_point("a");

    let compiled = graph.compile().unwrap();
    match compiled.invoke(Tally::default()).await {
        Err(AgentError::NodeFailed { node, message }) => {
            assert_eq!(node, "boom");
            assert!(message.contains("collaborator down"));
        }
        other => panic!("expected NodeFailed, got {other:?}"),
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn observer_sees_each_node_output_and_state() {
    let seen: Arc<Mutex<Vec<(String, String, i64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let observer: Arc<dyn NodeObserver<Tally>> =
        Arc::new(move |id: &str, output: &str, state: &Tally| {
            sink.lock()
                .unwrap()
                .push((id.to_string(), output.to_string(), state.x));
        });

    let mut graph = StateGraph::<Tally>::new();
    graph
        .add_node(
            "a",
            Box::new(
                FnNode::new("a", |mut s: Tally| {
                    s.x = 7;
                    Ok(s)
                })
                .with_output(|s: &Tally| s.x.to_string()),
            ),
        )
        .add_node("b", Box::new(FnNode::new("b", |s: Tally| Ok(s))))
        .add_edge("a", "b")
        .set_entry_point("a");

    let compiled = graph.with_observer(observer).compile().unwrap();
    compiled.invoke(Tally::default()).await.unwrap();

    let events = seen.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    // "a" reports its principal output and the hook sees the updated state.
    assert_eq!(events[0], ("a".to_string(), "7".to_string(), 7));
    // "b" reports nothing; the cross-step field is still visible.
    assert_eq!(events[1], ("b".to_string(), String::new(), 7));
}
