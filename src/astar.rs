/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// with an explicit closed set, a deterministic tie-break and an optional cap on the
/// number of expansions.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    seq: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.seq == other.seq
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the deepest node (largest cost),
        // then first-in first-out among exact ties
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.cmp(&other.cost) {
                Ordering::Equal => other.seq.cmp(&self.seq),
                s => s,
            },
            s => s,
        }
    }
}

struct Visit<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Search<N, C> {
    Found {
        path: Vec<N>,
        cost: C,
        expansions: usize,
    },
    /// The frontier ran empty without reaching a goal.
    Exhausted { expansions: usize },
    /// The expansion cap was hit before the search concluded.
    OverBudget { expansions: usize },
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, Visit<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents
            .get_index(i)
            .map(|(_, visit)| visit.parent)
            .filter(|&p| p != usize::MAX)
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// A* search from `start`. `successors` yields neighbours with the cost of moving there,
/// `heuristic` must not overestimate the remaining cost and `success` recognises goals.
/// Every node is expanded at most once, so the search terminates on any finite graph.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_expansions: Option<usize>,
) -> Search<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    let mut seq = 0;
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        seq,
        index: 0,
    });
    let mut parents: FxIndexMap<N, Visit<C>> = FxIndexMap::default();
    parents.insert(
        start.clone(),
        Visit {
            parent: usize::MAX,
            cost: Zero::zero(),
            closed: false,
        },
    );
    let mut expansions = 0;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, visit)) = parents.get_index(index) else {
                continue;
            };
            // A node may sit in the heap several times if a cheaper way to it was
            // found later. Only the entry matching its best cost is expanded.
            if visit.closed || cost > visit.cost {
                continue;
            }
            if success(node) {
                let path = reverse_path(&parents, index);
                return Search::Found {
                    path,
                    cost,
                    expansions,
                };
            }
            if matches!(max_expansions, Some(max) if expansions >= max) {
                return Search::OverBudget { expansions };
            }
            let node = node.clone();
            if let Some((_, visit)) = parents.get_index_mut(index) {
                visit.closed = true;
            }
            expansions += 1;
            successors(&node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(Visit {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    if !e.get().closed && e.get().cost > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(Visit {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                    } else {
                        continue;
                    }
                }
            }

            seq += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                seq,
                index: n,
            });
        }
    }
    Search::Exhausted { expansions }
}
