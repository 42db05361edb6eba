use crate::entities::{Instance, Placement, SolutionOrigin};
use crate::geometry::EPS;
use crate::geometry::primitives::{Cuboid, Point3};
use crate::solver::fits::{self, Region};
use crate::solver::{Limits, PackingMode, SearchStatistics};
use crate::util::assertions;
use itertools::Itertools;
use log::debug;
use std::time::Instant;

/// Remaining-item counts up to this size are handed to the fit tester as a
/// group, to try completing the solution with a single additional bin.
const FITS_GROUP_LIMIT: usize = 10;

/// The best complete solution found so far. Owned by a single solver
/// invocation; replaced only by a strictly better (fewer-bin) solution.
#[derive(Clone, Debug)]
pub(crate) struct Incumbent {
    pub placements: Vec<Placement>,
    pub n_bins: usize,
    pub origin: SolutionOrigin,
}

/// A candidate placement slot for the item branched on at a node.
#[derive(Clone, Copy, Debug)]
struct Slot {
    bin_no: usize,
    position: Point3,
    /// Whether taking this slot opens a fresh bin
    opens_bin: bool,
}

/// One entry of the explicit depth-first stack: the candidate slots for the
/// item at this depth and the expansion progress through them.
struct Frame {
    slots: Vec<Slot>,
    cursor: usize,
    /// Whether the slot at `cursor - 1` is currently applied to the state
    placed: bool,
}

/// Depth-first branch-and-bound over partial packings.
///
/// Items are branched on in the fixed order provided by the layer heuristic.
/// At each node the candidate slots are the admissible extreme points of
/// every open bin, plus a single slot opening a fresh bin: empty bins are
/// interchangeable, so one fresh-bin branch per node covers them all without
/// exploring their permutations. The fresh-bin branch also covers packings
/// that hold an item back from an open bin to keep its space for later
/// items. Subtrees are pruned as soon as a lower bound on their completion
/// reaches the incumbent bin count.
///
/// The search stack is explicit rather than recursive, so limit checks run
/// at every node-expansion boundary and stack depth is bounded by the item
/// count without consuming native stack.
pub(crate) struct BranchAndBound<'a> {
    instance: &'a Instance,
    mode: PackingMode,
    limits: Limits,
    order: &'a [usize],
    root_lb: usize,
    start: Instant,
    bin_volume: f64,
    /// Occupied spaces per open bin, in load order
    bins: Vec<Vec<Cuboid>>,
    /// Placements applied on the current search path, in branching order
    placements: Vec<Placement>,
    placed_volume: f64,
    unplaced_volume: f64,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(
        instance: &'a Instance,
        mode: PackingMode,
        limits: Limits,
        order: &'a [usize],
        root_lb: usize,
    ) -> Self {
        debug_assert_eq!(order.len(), instance.n_items());
        BranchAndBound {
            instance,
            mode,
            limits,
            order,
            root_lb,
            start: Instant::now(),
            bin_volume: instance.bin.volume(),
            bins: vec![],
            placements: Vec::with_capacity(instance.n_items()),
            placed_volume: 0.0,
            unplaced_volume: instance.total_item_volume(),
        }
    }

    /// Runs the search to exhaustion or until a budget is hit, improving
    /// `incumbent` in place. Returns `true` if a budget cut the search short.
    pub fn run(&mut self, incumbent: &mut Incumbent, stats: &mut SearchStatistics) -> bool {
        let n = self.order.len();
        debug_assert!(n > 0);

        let mut frames: Vec<Frame> = Vec::with_capacity(n);
        frames.push(self.expand(0));
        stats.nodes += 1;

        loop {
            if incumbent.n_bins <= self.root_lb {
                // the incumbent matches the proven lower bound
                return false;
            }
            if self.budget_exhausted(stats) {
                debug!(
                    "[BNB] budget exhausted after {} nodes / {} iterations",
                    stats.nodes, stats.iterations
                );
                return true;
            }

            let depth = frames.len() - 1;
            let frame = frames.last_mut().expect("non-empty search stack");

            if frame.placed {
                // returning from a child subtree
                self.retract(frame.slots[frame.cursor - 1]);
                frame.placed = false;
            }

            if frame.cursor >= frame.slots.len() {
                frames.pop();
                match frames.is_empty() {
                    true => return false, // search space exhausted
                    false => continue,
                }
            }

            let slot = frame.slots[frame.cursor];
            frame.cursor += 1;
            frame.placed = true;
            stats.iterations += 1;
            self.apply(self.order[depth], slot);

            if depth + 1 == n {
                // complete solution
                let z = self.bins.len();
                if z < incumbent.n_bins {
                    self.improve(incumbent, self.placements.clone(), z);
                }
                continue;
            }

            if self.node_bound() >= incumbent.n_bins {
                continue; // prune: no strict improvement possible below here
            }

            self.try_group_completion(depth, incumbent, stats);

            frames.push(self.expand(depth + 1));
            stats.nodes += 1;
        }
    }

    /// Builds the frame for the item branched on at `depth`: all admissible
    /// extreme points of the open bins, followed by a single fresh-bin slot.
    fn expand(&self, depth: usize) -> Frame {
        let item = self.instance.item(self.order[depth]);
        let interior = self.instance.bin.interior();

        let mut slots = vec![];
        for (bin_no, boxes) in self.bins.iter().enumerate() {
            for position in fits::extreme_points(&interior, boxes) {
                let cuboid = Cuboid::from_corner(position, item.width, item.height, item.depth);
                if interior.contains(&cuboid)
                    && !boxes.iter().any(|b| b.overlaps(&cuboid))
                    && self.mode.admits(position, boxes)
                {
                    slots.push(Slot {
                        bin_no,
                        position,
                        opens_bin: false,
                    });
                }
            }
        }

        // one slot covers every interchangeable empty bin
        slots.push(Slot {
            bin_no: self.bins.len(),
            position: Point3::ORIGIN,
            opens_bin: true,
        });

        Frame {
            slots,
            cursor: 0,
            placed: false,
        }
    }

    fn apply(&mut self, item_id: usize, slot: Slot) {
        let item = self.instance.item(item_id);
        if slot.opens_bin {
            self.bins.push(vec![]);
        }
        self.bins[slot.bin_no].push(Cuboid::from_corner(
            slot.position,
            item.width,
            item.height,
            item.depth,
        ));
        self.placements.push(Placement {
            item_id,
            bin_no: slot.bin_no,
            position: slot.position,
        });
        let volume = item.volume();
        self.placed_volume += volume;
        self.unplaced_volume -= volume;
    }

    fn retract(&mut self, slot: Slot) {
        let placement = self.placements.pop().expect("placement to retract");
        let volume = self.instance.item(placement.item_id).volume();
        self.placed_volume -= volume;
        self.unplaced_volume += volume;
        self.bins[slot.bin_no].pop();
        if slot.opens_bin {
            debug_assert!(self.bins[slot.bin_no].is_empty());
            self.bins.pop();
        }
    }

    /// Lower bound on the bin count of any completion of the current partial
    /// packing: the open bins, plus the bins forced by the unplaced volume
    /// that exceeds the free space still available in them.
    fn node_bound(&self) -> usize {
        let open_free = self.bins.len() as f64 * self.bin_volume - self.placed_volume;
        let overflow = self.unplaced_volume - open_free;
        let extra = match overflow > EPS {
            true => (overflow / self.bin_volume - EPS).ceil() as usize,
            false => 0,
        };
        (self.bins.len() + extra).max(self.root_lb)
    }

    /// Asks the fit tester whether all remaining items fit together into one
    /// fresh bin; if so, the node completes immediately to a full solution.
    fn try_group_completion(
        &self,
        depth: usize,
        incumbent: &mut Incumbent,
        stats: &mut SearchStatistics,
    ) {
        let remaining = &self.order[depth + 1..];
        if remaining.len() < 2 || remaining.len() > FITS_GROUP_LIMIT {
            return;
        }
        let z = self.bins.len() + 1;
        if z >= incumbent.n_bins {
            return;
        }

        let items = remaining
            .iter()
            .map(|&id| *self.instance.item(id))
            .collect_vec();
        if let Some(group) = fits::fits(Region::of_bin(&self.instance.bin), &items, self.mode, stats)
        {
            let fresh_bin = self.bins.len();
            let mut placements = self.placements.clone();
            placements.extend(group.iter().map(|rp| Placement {
                item_id: rp.item_id,
                bin_no: fresh_bin,
                position: rp.position,
            }));
            self.improve(incumbent, placements, z);
        }
    }

    fn improve(&self, incumbent: &mut Incumbent, placements: Vec<Placement>, z: usize) {
        // a solution beating the proven lower bound means the bound or the
        // feasibility checks are broken; abort rather than return it
        assert!(
            z >= self.root_lb,
            "solution with {z} bins beats the proven lower bound {}",
            self.root_lb
        );
        debug_assert!(assertions::placements_feasible(&placements, self.instance));
        debug_assert!(
            self.mode == PackingMode::General
                || assertions::robot_loadable(&placements, self.instance)
        );

        debug!(
            "[BNB] incumbent improved: {} -> {} bins",
            incumbent.n_bins, z
        );
        incumbent.placements = placements;
        incumbent.n_bins = z;
        incumbent.origin = SolutionOrigin::Search;
    }

    fn budget_exhausted(&self, stats: &SearchStatistics) -> bool {
        (self.limits.max_nodes > 0 && stats.nodes >= self.limits.max_nodes)
            || (self.limits.max_iterations > 0 && stats.iterations >= self.limits.max_iterations)
            || self
                .limits
                .time_limit()
                .is_some_and(|limit| self.start.elapsed() >= limit)
    }
}
