// Integration tests for the instrumented containers

use algoscope::checkpoint::Checkpoint;
use algoscope::containers::{
    Graph, GraphKind, HashTable, LinkedList, ListKind, Position, Stack, TraversalOrder, VertexId,
};
use algoscope::engine::Engine;
use algoscope::errors::VisualizerError;

fn visits(trace: &algoscope::checkpoint::Trace) -> usize {
    trace
        .checkpoints()
        .filter(|c| matches!(c, Checkpoint::NodeVisited { .. }))
        .count()
}

#[test]
fn test_search_scenario() {
    let list = LinkedList::from_values(ListKind::Singly, &[5, 3, 8]);

    let mut hit = list.search(8);
    hit.run_to_end();
    assert_eq!(hit.found(), Some(2));

    let mut miss = list.search(9);
    let trace = miss.run_to_end();
    assert_eq!(miss.found(), None);
    assert_eq!(visits(&trace), 3);
    assert_eq!(trace.checkpoints().last(), Some(&Checkpoint::SearchExhausted));
}

#[test]
fn test_singly_insert_and_remove_every_position() {
    for pos in 0..=5 {
        let mut list = LinkedList::from_values(ListKind::Singly, &[10, 20, 30, 40, 50]);
        list.insert(99, pos).unwrap().run_to_end();
        let mut expected = vec![10, 20, 30, 40, 50];
        expected.insert(pos, 99);
        assert_eq!(list.values(), expected);
        list.check_links().unwrap();

        let mut remove = list.remove(pos).unwrap();
        remove.run_to_end();
        assert_eq!(remove.removed(), Some(99));
        drop(remove);
        assert_eq!(list.values(), vec![10, 20, 30, 40, 50]);
        list.check_links().unwrap();
    }
}

#[test]
fn test_doubly_walks_the_shorter_side() {
    let len = 8;
    for pos in 1..len {
        let mut list = LinkedList::from_values(ListKind::Doubly, &(0..len as i64).collect::<Vec<_>>());
        let trace = list.insert(-1, pos).unwrap().run_to_end();
        assert_eq!(visits(&trace), pos.min(len - pos), "insert at {}", pos);
        assert_eq!(
            list.values_backward().unwrap(),
            list.values().into_iter().rev().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_singly_walk_length_grows_with_position() {
    for pos in 1..6 {
        let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2, 3, 4, 5, 6]);
        let trace = list.insert(0, pos).unwrap().run_to_end();
        assert_eq!(visits(&trace), pos, "insert at {}", pos);
    }
}

#[test]
fn test_list_index_errors() {
    let mut list = LinkedList::from_values(ListKind::Doubly, &[1, 2]);
    assert_eq!(
        list.insert(5, 3).err(),
        Some(VisualizerError::IndexOutOfRange { index: 3, len: 2 })
    );
    assert_eq!(
        list.remove(2).err(),
        Some(VisualizerError::IndexOutOfRange { index: 2, len: 2 })
    );
    let mut empty = LinkedList::singly();
    assert!(empty.remove(0).is_err());
}

#[test]
fn test_list_insert_starts_with_colors_reset() {
    let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2, 3]);
    let trace = list.insert(7, 2).unwrap().run_to_end();
    assert_eq!(trace.checkpoints().next(), Some(&Checkpoint::ColorsReset));
    assert!(trace
        .checkpoints()
        .any(|c| matches!(c, Checkpoint::ArrowRerouted { from: 1, to: 2 })));
}

#[test]
fn test_stack_lifo_and_empty_pop() {
    let mut stack = Stack::new();
    for v in [1, 2, 3] {
        stack.push(v).run_to_end();
    }
    let mut popped = Vec::new();
    for _ in 0..4 {
        let mut pop = stack.pop();
        pop.run_to_end();
        popped.push(pop.popped());
    }
    assert_eq!(popped, vec![Some(3), Some(2), Some(1), None]);
    assert_eq!(stack.size(), 0);

    let mut peek = stack.peek();
    let trace = peek.run_to_end();
    assert_eq!(peek.top(), None);
    assert_eq!(trace.checkpoints().count(), 0);
}

#[test]
fn test_hash_table_collisions_chain() {
    let mut table = HashTable::new(4).unwrap();
    for (k, v) in [(1, 10), (5, 50), (9, 90)] {
        table.put(k, v).run_to_end();
    }
    assert_eq!(table.bucket(1), Some(&[(1, 10), (5, 50), (9, 90)][..]));

    let mut get = table.get(9);
    let trace = get.run_to_end();
    assert_eq!(get.found(), Some(90));
    let scanned = trace
        .checkpoints()
        .filter(|c| matches!(c, Checkpoint::EntryVisited { bucket: 1, .. }))
        .count();
    assert_eq!(scanned, 3);
}

#[test]
fn test_hash_table_put_updates_existing_key() {
    let mut table = HashTable::new(3).unwrap();
    table.put(4, 1).run_to_end();
    let mut update = table.put(4, 2);
    update.run_to_end();
    assert_eq!(update.replaced(), Some(1));
    drop(update);
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup(4), Some(2));
}

#[test]
fn test_weighted_graph_caches_euclidean_length() {
    let mut graph = Graph::new(GraphKind::WEIGHTED_UNDIRECTED);
    graph.add_vertex(VertexId(0), Position::new(0, 0)).unwrap().run_to_end();
    graph.add_vertex(VertexId(1), Position::new(3, 4)).unwrap().run_to_end();
    graph.add_edge(VertexId(0), VertexId(1)).unwrap().run_to_end();

    assert_eq!(graph.edge_weight(VertexId(0), VertexId(1)), Some(5));
    assert_eq!(graph.edge_weight(VertexId(1), VertexId(0)), Some(5));
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_graph_rejects_unknown_vertices() {
    let mut graph = Graph::new(GraphKind::UNWEIGHTED_DIRECTED);
    graph.add_vertex(VertexId(0), Position::new(0, 0)).unwrap().run_to_end();
    assert!(matches!(
        graph.add_edge(VertexId(0), VertexId(7)).err(),
        Some(VisualizerError::InvalidGraphOperation { .. })
    ));
    assert!(graph.traverse(VertexId(3), TraversalOrder::BreadthFirst).is_err());
}

#[test]
fn test_traversal_reaches_component_only() {
    let mut graph = Graph::new(GraphKind::UNWEIGHTED_UNDIRECTED);
    for i in 0..5 {
        graph.add_vertex(VertexId(i), Position::new(i as i32, 0)).unwrap().run_to_end();
    }
    for (a, b) in [(0, 1), (1, 2), (3, 4)] {
        graph.add_edge(VertexId(a), VertexId(b)).unwrap().run_to_end();
    }
    for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
        let mut walk = graph.traverse(VertexId(0), order).unwrap();
        walk.run_to_end();
        assert_eq!(walk.visit_order(), &[VertexId(0), VertexId(1), VertexId(2)]);
    }
}
