//! Single-source-to-target shortest paths over the road network.
//!
//! Plain Dijkstra with duplicate insertion: rather than decreasing keys, a
//! relaxed node is pushed again and stale entries are discarded against the
//! visited set when popped. The search stops as soon as the target settles.

use crate::graph::Graph;
use crate::priority_queue::MinQueue;

/// Shortest distance from `from` to `to`, or `None` when `to` is
/// unreachable (including either endpoint lying outside the node set).
///
/// Callers must not fold an unreachable result into distance totals.
pub fn shortest_distance(graph: &Graph, from: usize, to: usize) -> Option<u64> {
    let node_count = graph.node_count();
    if from >= node_count || to >= node_count {
        return None;
    }

    let mut dist: Vec<Option<u64>> = vec![None; node_count];
    let mut visited = vec![false; node_count];
    let mut queue = MinQueue::new();

    dist[from] = Some(0);
    queue.push(from, 0);

    while let Some(current) = queue.pop() {
        if visited[current] {
            continue; // stale duplicate
        }
        visited[current] = true;

        if current == to {
            break;
        }

        let here = dist[current].expect("settled node has a distance");
        for edge in graph.adjacency(current) {
            if visited[edge.to] {
                continue;
            }
            let candidate = here + u64::from(edge.weight);
            if dist[edge.to].map_or(true, |known| candidate < known) {
                dist[edge.to] = Some(candidate);
                queue.push(edge.to, candidate);
            }
        }
    }

    dist[to]
}
