//! Feasibility tests for placing a small set of items together in an empty
//! rectangular region. Three entry points are dispatched on the size of the
//! candidate set, trading completeness for speed as the set grows: the pair
//! and triple tests are exhaustive over corner placements, the general test
//! is a bounded constructive heuristic that may miss feasible configurations
//! but never reports an infeasible one as feasible.

use crate::entities::{Bin, Item};
use crate::geometry::{Axis, EPS};
use crate::geometry::primitives::{Cuboid, Point3};
use crate::solver::{PackingMode, SearchStatistics};
use float_cmp::approx_eq;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Number of alternative item orderings the general fit test tries before
/// declaring the set infeasible.
const MAX_CONSTRUCT_ATTEMPTS: usize = 4;

/// An empty rectangular region in which candidate items are to be placed.
/// Placements are expressed relative to the region's lower corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Region {
    pub fn of_bin(bin: &Bin) -> Region {
        Region {
            width: bin.width,
            height: bin.height,
            depth: bin.depth,
        }
    }

    #[inline(always)]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    fn interior(&self) -> Cuboid {
        Cuboid::from_corner(Point3::ORIGIN, self.width, self.height, self.depth)
    }

    fn admits_item(&self, item: &Item) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| item.extent(axis) <= self.extent(axis) + EPS)
    }
}

/// Placement of an item relative to a [`Region`]'s lower corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelPlacement {
    pub item_id: usize,
    pub position: Point3,
}

/// Decides whether `items` can be jointly placed in `region` without overlap,
/// dispatching to the specialized test for the candidate-set size.
///
/// Returns the placements (in load order) on success, `None` when no
/// placement was found. A `None` from four or more candidates is a heuristic
/// verdict; for up to three candidates the corner enumeration is exhaustive.
pub fn fits(
    region: Region,
    items: &[Item],
    mode: PackingMode,
    stats: &mut SearchStatistics,
) -> Option<Vec<RelPlacement>> {
    match items {
        [] => Some(vec![]),
        [single] => fits_one(region, single),
        [a, b] => fits_two(region, a, b, stats),
        [a, b, c] => fits_three(region, a, b, c, mode, stats),
        _ => fits_more(region, items, mode, stats),
    }
}

fn fits_one(region: Region, item: &Item) -> Option<Vec<RelPlacement>> {
    region.admits_item(item).then(|| {
        vec![RelPlacement {
            item_id: item.id,
            position: Point3::ORIGIN,
        }]
    })
}

/// Tries both items in both orderings against the region corners: for each
/// axis, the pair is placed side by side from the region's lower corner.
fn fits_two(
    region: Region,
    a: &Item,
    b: &Item,
    stats: &mut SearchStatistics,
) -> Option<Vec<RelPlacement>> {
    stats.calls_fits_two += 1;

    if !region.admits_item(a) || !region.admits_item(b) {
        return None;
    }

    for (first, second) in [(a, b), (b, a)] {
        for &axis in &Axis::ALL {
            if first.extent(axis) + second.extent(axis) <= region.extent(axis) + EPS {
                let mut coords = [0.0; 3];
                coords[axis.index()] = first.extent(axis);
                return Some(vec![
                    RelPlacement {
                        item_id: first.id,
                        position: Point3::ORIGIN,
                    },
                    RelPlacement {
                        item_id: second.id,
                        position: Point3::from_coords(coords),
                    },
                ]);
            }
        }
    }
    None
}

/// Extends the pair logic with a third item filling the residual L-shaped
/// gap: all orderings of the three items are tried against the extreme
/// points left by the first two. Constant-time enumeration.
fn fits_three(
    region: Region,
    a: &Item,
    b: &Item,
    c: &Item,
    mode: PackingMode,
    stats: &mut SearchStatistics,
) -> Option<Vec<RelPlacement>> {
    stats.calls_fits_three += 1;

    let candidates = [a, b, c];
    if !candidates.iter().all(|item| region.admits_item(item)) {
        return None;
    }

    let interior = region.interior();
    for perm in candidates.iter().permutations(3) {
        let (first, second, third) = (perm[0], perm[1], perm[2]);

        let first_box = Cuboid::from_corner(Point3::ORIGIN, first.width, first.height, first.depth);
        if !interior.contains(&first_box) {
            continue;
        }

        for second_pos in extreme_points(&interior, &[first_box]) {
            let second_box =
                Cuboid::from_corner(second_pos, second.width, second.height, second.depth);
            if !placeable(&interior, &second_box, &[first_box], mode, second_pos) {
                continue;
            }

            let placed = [first_box, second_box];
            for third_pos in extreme_points(&interior, &placed) {
                let third_box =
                    Cuboid::from_corner(third_pos, third.width, third.height, third.depth);
                if placeable(&interior, &third_box, &placed, mode, third_pos) {
                    return Some(vec![
                        RelPlacement {
                            item_id: first.id,
                            position: Point3::ORIGIN,
                        },
                        RelPlacement {
                            item_id: second.id,
                            position: second_pos,
                        },
                        RelPlacement {
                            item_id: third.id,
                            position: third_pos,
                        },
                    ]);
                }
            }
        }
    }
    None
}

/// Constructive placement for four or more candidates: items are placed one
/// by one at the lowest admissible extreme point, retrying a bounded number
/// of alternative orderings on failure. May under-report feasibility.
fn fits_more(
    region: Region,
    items: &[Item],
    mode: PackingMode,
    stats: &mut SearchStatistics,
) -> Option<Vec<RelPlacement>> {
    stats.calls_fits_more += 1;

    if !items.iter().all(|item| region.admits_item(item)) {
        return None;
    }

    let mut order = items
        .iter()
        .sorted_by_key(|item| OrderedFloat(-item.volume()))
        .collect_vec();

    let attempts = MAX_CONSTRUCT_ATTEMPTS.min(order.len());
    for _ in 0..attempts {
        stats.sub_nodes += 1;
        if let Some(placements) = construct(region, &order, mode, stats) {
            return Some(placements);
        }
        // move the blocking front item to the back and retry
        order.rotate_left(1);
    }
    None
}

fn construct(
    region: Region,
    order: &[&Item],
    mode: PackingMode,
    stats: &mut SearchStatistics,
) -> Option<Vec<RelPlacement>> {
    let interior = region.interior();
    let mut placed: Vec<Cuboid> = Vec::with_capacity(order.len());
    let mut placements = Vec::with_capacity(order.len());

    for item in order {
        let mut position = None;
        for point in extreme_points(&interior, &placed) {
            stats.sub_iterations += 1;
            let cuboid = Cuboid::from_corner(point, item.width, item.height, item.depth);
            if placeable(&interior, &cuboid, &placed, mode, point) {
                position = Some((point, cuboid));
                break;
            }
        }
        let (point, cuboid) = position?;
        placed.push(cuboid);
        placements.push(RelPlacement {
            item_id: item.id,
            position: point,
        });
    }
    Some(placements)
}

#[inline]
fn placeable(
    interior: &Cuboid,
    cuboid: &Cuboid,
    placed: &[Cuboid],
    mode: PackingMode,
    point: Point3,
) -> bool {
    interior.contains(cuboid)
        && !placed.iter().any(|p| p.overlaps(cuboid))
        && mode.admits(point, placed)
}

/// Candidate placement corners generated by the boundaries of already placed
/// items, sorted lexicographically by (z, y, x). The region's own lower
/// corner is always a candidate.
pub(crate) fn extreme_points(interior: &Cuboid, placed: &[Cuboid]) -> Vec<Point3> {
    let mut points = vec![interior.lower_corner()];
    for c in placed {
        points.push(Point3(c.x_max, c.y_min, c.z_min));
        points.push(Point3(c.x_min, c.y_max, c.z_min));
        points.push(Point3(c.x_min, c.y_min, c.z_max));
    }

    points.retain(|&p| {
        p.x() < interior.x_max - EPS
            && p.y() < interior.y_max - EPS
            && p.z() < interior.z_max - EPS
            && !placed.iter().any(|c| c.interior_contains(p))
    });

    points.sort_by_key(|p| {
        (
            OrderedFloat(p.z()),
            OrderedFloat(p.y()),
            OrderedFloat(p.x()),
        )
    });
    points.dedup_by(|a, b| {
        approx_eq!(f64, a.x(), b.x(), epsilon = EPS)
            && approx_eq!(f64, a.y(), b.y(), epsilon = EPS)
            && approx_eq!(f64, a.z(), b.z(), epsilon = EPS)
    });
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Item;

    fn region(w: f64, h: f64, d: f64) -> Region {
        Region {
            width: w,
            height: h,
            depth: d,
        }
    }

    fn check_placements(region: Region, items: &[Item], placements: &[RelPlacement]) {
        let interior = region.interior();
        let boxes: Vec<Cuboid> = placements
            .iter()
            .map(|rp| {
                let item = items.iter().find(|i| i.id == rp.item_id).unwrap();
                Cuboid::from_corner(rp.position, item.width, item.height, item.depth)
            })
            .collect();
        for b in &boxes {
            assert!(interior.contains(b), "placement outside region");
        }
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.overlaps(b), "placements overlap");
            }
        }
    }

    #[test]
    fn pair_side_by_side() {
        let items = [Item::new(0, 2.0, 2.0, 2.0), Item::new(1, 2.0, 2.0, 2.0)];
        let mut stats = SearchStatistics::default();
        let result = fits(region(4.0, 2.0, 2.0), &items, PackingMode::General, &mut stats);
        let placements = result.expect("pair fits side by side");
        check_placements(region(4.0, 2.0, 2.0), &items, &placements);
        assert_eq!(stats.calls_fits_two, 1);
    }

    #[test]
    fn pair_too_large() {
        let items = [Item::new(0, 2.0, 2.0, 2.0), Item::new(1, 1.5, 2.0, 2.0)];
        let mut stats = SearchStatistics::default();
        let result = fits(region(3.0, 2.0, 2.0), &items, PackingMode::General, &mut stats);
        assert!(result.is_none());
    }

    #[test]
    fn pair_needs_the_right_axis() {
        // only fits stacked along z
        let items = [Item::new(0, 3.0, 3.0, 1.0), Item::new(1, 3.0, 3.0, 2.0)];
        let mut stats = SearchStatistics::default();
        let result = fits(region(3.0, 3.0, 3.0), &items, PackingMode::General, &mut stats);
        let placements = result.expect("pair fits stacked in depth");
        check_placements(region(3.0, 3.0, 3.0), &items, &placements);
    }

    #[test]
    fn triple_fills_l_shaped_gap() {
        // big block leaves an L of two cells; the two small items go there
        let items = [
            Item::new(0, 2.0, 2.0, 1.0),
            Item::new(1, 1.0, 2.0, 1.0),
            Item::new(2, 3.0, 1.0, 1.0),
        ];
        let mut stats = SearchStatistics::default();
        let result = fits(region(3.0, 3.0, 1.0), &items, PackingMode::General, &mut stats);
        let placements = result.expect("triple fits");
        check_placements(region(3.0, 3.0, 1.0), &items, &placements);
        assert_eq!(stats.calls_fits_three, 1);
    }

    #[test]
    fn triple_infeasible() {
        let items = [
            Item::new(0, 2.0, 2.0, 2.0),
            Item::new(1, 2.0, 2.0, 2.0),
            Item::new(2, 2.0, 2.0, 2.0),
        ];
        let mut stats = SearchStatistics::default();
        let result = fits(region(2.0, 2.0, 4.0), &items, PackingMode::General, &mut stats);
        assert!(result.is_none());
    }

    #[test]
    fn many_unit_cubes_fill_exactly() {
        let items: Vec<Item> = (0..8).map(|id| Item::new(id, 1.0, 1.0, 1.0)).collect();
        let mut stats = SearchStatistics::default();
        let result = fits(region(2.0, 2.0, 2.0), &items, PackingMode::General, &mut stats);
        let placements = result.expect("eight unit cubes fill a 2x2x2 region");
        check_placements(region(2.0, 2.0, 2.0), &items, &placements);
        assert_eq!(stats.calls_fits_more, 1);
        assert!(stats.sub_iterations > 0);
    }

    #[test]
    fn overfull_region_reported_infeasible() {
        let items: Vec<Item> = (0..9).map(|id| Item::new(id, 1.0, 1.0, 1.0)).collect();
        let mut stats = SearchStatistics::default();
        let result = fits(region(2.0, 2.0, 2.0), &items, PackingMode::General, &mut stats);
        assert!(result.is_none());
    }

    #[test]
    fn robot_mode_placements_are_loadable() {
        let items: Vec<Item> = (0..6).map(|id| Item::new(id, 1.0, 1.0, 1.0)).collect();
        let mut stats = SearchStatistics::default();
        let result = fits(region(2.0, 3.0, 1.0), &items, PackingMode::Robot, &mut stats);
        let placements = result.expect("six unit cubes fit");
        // replay in load order and verify the staircase condition
        let mut loaded: Vec<Cuboid> = vec![];
        for rp in &placements {
            assert!(PackingMode::Robot.admits(rp.position, &loaded));
            loaded.push(Cuboid::from_corner(rp.position, 1.0, 1.0, 1.0));
        }
    }
}
