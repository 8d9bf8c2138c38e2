//! C8: transitive-edge reduction (spec §4.8), Myers' string-graph rule.
//!
//! Edge `v -> x` is redundant when some third read `w` gives a path
//! `v -> w -> x` that explains it: `v`'s edges to `w` and to `x` leave `v`
//! on the same side, the edge into `w` and the edge out of `w` use
//! opposite sides of `w` (so the path runs through `w` rather than
//! doubling back), and the combined overhang of the two short edges
//! approximates the overhang of the long edge within `ε · Length + α`.
//! Grounded on `Unitigging::isTransitive`/`removeTransitiveEdges` in
//! `original_source/src/layout/unitigging.cpp`.

use std::collections::HashSet;

use crate::config::Config;
use crate::overlap::{BetterOverlap, OverlapGraph};

fn overhang_tolerance(config: &Config, length: f64) -> f64 {
    config.max_error_rate as f64 * length + config.slack as f64
}

/// True if edge `v -> x` (overlap `vx`) is explained by the two-hop path
/// `v -> w -> x` (overlaps `vw`, `wx`), per spec §4.8 / Myers' rule.
fn explains(config: &Config, v: usize, w: usize, x: usize, vw: &BetterOverlap, wx: &BetterOverlap, vx: &BetterOverlap) -> bool {
    // v must leave on the same side for both the short and the long edge.
    if vw.suf(v) != vx.suf(v) {
        return false;
    }
    // The path must run through w, not double back: the side of w touched
    // entering from v must be the opposite of the side leaving towards x.
    if vw.suf(w) == wx.suf(w) {
        return false;
    }
    // x must be entered on the same side by the short edge as by the direct
    // one (spec §4.8 condition 3; symmetric to the v-side check above).
    if wx.suf(x) != vx.suf(x) {
        return false;
    }
    let tol = overhang_tolerance(config, vx.length());
    let combined_v = vw.hang(v) as f64 + wx.hang(w) as f64;
    if (combined_v - vx.hang(v) as f64).abs() > tol {
        return false;
    }
    let combined_x = vw.hang(w) as f64 + wx.hang(x) as f64;
    if (combined_x - vx.hang(x) as f64).abs() > tol {
        return false;
    }
    true
}

/// Compute the set of edges (as unordered read-id pairs) to drop from the
/// string graph because they are transitive.
pub fn find_transitive_edges(graph: &OverlapGraph, config: &Config) -> HashSet<(usize, usize)> {
    let mut redundant = HashSet::new();

    for v in 0..graph.num_reads() {
        let mut neighbours: Vec<&(usize, std::rc::Rc<BetterOverlap>)> = graph.neighbours(v).iter().collect();
        neighbours.sort_by(|a, b| a.1.hang(v).cmp(&b.1.hang(v)));

        for i in 0..neighbours.len() {
            let (x, vx) = &neighbours[i];
            let key = (v.min(*x), v.max(*x));
            if redundant.contains(&key) {
                continue;
            }
            for (w, vw) in neighbours.iter().take(i) {
                if w == x {
                    continue;
                }
                let wx = match graph.neighbours(*w).iter().find(|(id, _)| id == x) {
                    Some((_, ov)) => ov,
                    None => continue,
                };
                if explains(config, v, *w, *x, vw, wx, vx) {
                    redundant.insert(key);
                    break;
                }
            }
        }
    }

    redundant
}
