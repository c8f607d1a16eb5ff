//! Wireframe edge extraction from a triangle list.

use std::collections::HashSet;

/// Order-independent identity of an undirected edge: `(min, max)`.
pub type EdgeKey = (u32, u32);

#[inline]
pub fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Build a line list with every undirected edge of `triangles` exactly once.
///
/// Edges keep the winding of the triangle that first introduced them, and
/// appear in first-encounter order. A trailing partial triangle is ignored.
pub fn wireframe_indices(triangles: &[u32]) -> Vec<u32> {
    let mut seen: HashSet<EdgeKey> = HashSet::with_capacity(triangles.len());
    let mut lines = Vec::with_capacity(triangles.len() * 2);

    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        for (from, to) in [(a, b), (b, c), (c, a)] {
            push_edge(&mut seen, &mut lines, from, to);
        }
    }

    lines
}

fn push_edge(seen: &mut HashSet<EdgeKey>, lines: &mut Vec<u32>, from: u32, to: u32) {
    if seen.insert(edge_key(from, to)) {
        lines.push(from);
        lines.push(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(lines: &[u32]) -> HashSet<EdgeKey> {
        lines.chunks_exact(2).map(|e| edge_key(e[0], e[1])).collect()
    }

    #[test]
    fn edge_key_is_order_independent() {
        assert_eq!(edge_key(3, 7), edge_key(7, 3));
        assert_eq!(edge_key(5, 5), (5, 5));
    }

    #[test]
    fn single_triangle_has_three_edges() {
        let lines = wireframe_indices(&[0, 1, 2]);
        assert_eq!(lines, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn shared_diagonal_is_emitted_once() {
        // Quad 0-1-2-3 split along 0-2.
        let lines = wireframe_indices(&[0, 1, 2, 0, 2, 3]);
        assert_eq!(lines.len(), 10);
        assert_eq!(edges(&lines).len(), 5);
        assert_eq!(lines, vec![0, 1, 1, 2, 2, 0, 2, 3, 3, 0]);
    }

    #[test]
    fn closed_tetrahedron() {
        let tris = [0, 1, 2, 0, 3, 1, 1, 3, 2, 2, 3, 0];
        let lines = wireframe_indices(&tris);
        assert_eq!(lines.len(), 12);
        assert_eq!(edges(&lines).len(), 6);
    }

    #[test]
    fn empty_and_partial_input() {
        assert!(wireframe_indices(&[]).is_empty());
        assert_eq!(wireframe_indices(&[0, 1, 2, 3, 4]), vec![0, 1, 1, 2, 2, 0]);
    }
}
