//! Greedy interval partitioning of items into lanes.

use super::{DateWindow, coords};
use crate::data::Item;
use chrono::NaiveDate;
use std::collections::HashMap;

/// An item placed on the timeline: its lane plus its horizontal extent in
/// days relative to the window start. Derived data; recomputed wholesale on
/// every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedItem {
    pub item: Item,
    pub lane: usize,
    pub start_offset_days: f64,
    pub width_days: f64,
}

/// Assign each item a lane so that items sharing a lane never overlap in
/// date range, using the minimum number of lanes for the items without a
/// manual override.
///
/// Items are processed in ascending start-date order; ties keep their input
/// order (stable sort). Each item takes the first lane whose previous
/// occupant ended strictly before the item starts, opening a new lane when
/// none has. Overridden items are placed on their override lane directly and
/// are skipped by the collision accounting, so a later automatic item may
/// legitimately land on the same lane.
pub fn assign_lanes(
    items: &[Item],
    overrides: &HashMap<u64, usize>,
    window: &DateWindow,
) -> Vec<PositionedItem> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by_key(|item| item.start);

    // One entry per open lane: the end date of the last automatic occupant.
    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let mut positioned = Vec::with_capacity(items.len());

    for item in sorted {
        let start_offset_days = coords::date_to_offset_days(item.start, window);
        let width_days = (((item.end - item.start).num_days() + 1).max(1)) as f64;

        let lane = match overrides.get(&item.id) {
            Some(&lane) => lane,
            None => {
                let lane = match lane_ends.iter().position(|end| *end < item.start) {
                    Some(free) => free,
                    None => {
                        lane_ends.push(item.end);
                        lane_ends.len() - 1
                    }
                };
                lane_ends[lane] = item.end;
                lane
            }
        };

        positioned.push(PositionedItem {
            item: item.clone(),
            lane,
            start_offset_days,
            width_days,
        });
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::date_window;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: u64, start: NaiveDate, end: NaiveDate) -> Item {
        Item {
            id,
            start,
            end,
            name: format!("Item {id}"),
        }
    }

    fn lanes_by_id(positioned: &[PositionedItem]) -> HashMap<u64, usize> {
        positioned
            .iter()
            .map(|positioned| (positioned.item.id, positioned.lane))
            .collect()
    }

    fn layout(items: &[Item], overrides: &HashMap<u64, usize>) -> Vec<PositionedItem> {
        assign_lanes(items, overrides, &date_window(items))
    }

    #[test]
    fn non_overlapping_items_share_lane_zero() {
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 5)),
            item(2, date(2021, 1, 6), date(2021, 1, 10)),
            item(3, date(2021, 1, 11), date(2021, 1, 15)),
        ];
        let lanes = lanes_by_id(&layout(&items, &HashMap::new()));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&2], 0);
        assert_eq!(lanes[&3], 0);
    }

    #[test]
    fn an_overlapping_chain_opens_new_lanes() {
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 5), date(2021, 1, 15)),
            item(3, date(2021, 1, 8), date(2021, 1, 20)),
        ];
        let lanes = lanes_by_id(&layout(&items, &HashMap::new()));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&2], 1);
        assert_eq!(lanes[&3], 2);
    }

    #[test]
    fn a_freed_lane_is_reused() {
        // B starts after both A's and C's ends have passed, so lane 0 is
        // free again by the time B is placed.
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 5)),
            item(3, date(2021, 1, 3), date(2021, 1, 8)),
            item(2, date(2021, 1, 9), date(2021, 1, 12)),
        ];
        let lanes = lanes_by_id(&layout(&items, &HashMap::new()));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&3], 1);
        assert_eq!(lanes[&2], 0);
    }

    #[test]
    fn items_are_sorted_by_start_before_placement() {
        let items = vec![
            item(1, date(2021, 1, 10), date(2021, 1, 15)),
            item(2, date(2021, 1, 1), date(2021, 1, 5)),
        ];
        let lanes = lanes_by_id(&layout(&items, &HashMap::new()));
        assert_eq!(lanes[&2], 0);
        assert_eq!(lanes[&1], 0);
    }

    #[test]
    fn zero_duration_items_on_the_same_day_get_distinct_lanes() {
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 1)),
            item(2, date(2021, 1, 1), date(2021, 1, 1)),
        ];
        let lanes = lanes_by_id(&layout(&items, &HashMap::new()));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&2], 1);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let items = vec![
            item(9, date(2021, 1, 1), date(2021, 1, 4)),
            item(4, date(2021, 1, 1), date(2021, 1, 6)),
            item(7, date(2021, 1, 1), date(2021, 1, 2)),
        ];
        let positioned = layout(&items, &HashMap::new());
        let order: Vec<u64> = positioned.iter().map(|p| p.item.id).collect();
        assert_eq!(order, vec![9, 4, 7]);
        let lanes = lanes_by_id(&positioned);
        assert_eq!(lanes[&9], 0);
        assert_eq!(lanes[&4], 1);
        assert_eq!(lanes[&7], 2);
    }

    #[test]
    fn automatic_lane_count_equals_maximum_overlap() {
        // Three items overlap on Jan 5; everything else fits around them.
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 6)),
            item(2, date(2021, 1, 4), date(2021, 1, 9)),
            item(3, date(2021, 1, 5), date(2021, 1, 5)),
            item(4, date(2021, 1, 7), date(2021, 1, 12)),
            item(5, date(2021, 1, 10), date(2021, 1, 11)),
        ];
        let max_lane = layout(&items, &HashMap::new())
            .iter()
            .map(|p| p.lane)
            .max()
            .unwrap();
        assert_eq!(max_lane, 2);
    }

    #[test]
    fn manual_override_places_the_item_directly() {
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 5), date(2021, 1, 15)),
        ];
        let overrides = HashMap::from([(2, 6)]);
        let lanes = lanes_by_id(&layout(&items, &overrides));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&2], 6);
    }

    #[test]
    fn manual_override_does_not_reserve_lane() {
        // The overridden item leaves the lane's tracked end date untouched,
        // so the automatic item is assigned the same lane and overlaps it.
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 2), date(2021, 1, 5)),
        ];
        let overrides = HashMap::from([(1, 0)]);
        let lanes = lanes_by_id(&layout(&items, &overrides));
        assert_eq!(lanes[&1], 0);
        assert_eq!(lanes[&2], 0);
    }

    #[test]
    fn overridden_items_are_excluded_from_the_overlap_count() {
        let items = vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 5), date(2021, 1, 15)),
            item(3, date(2021, 1, 8), date(2021, 1, 20)),
        ];
        let overrides = HashMap::from([(3, 5)]);
        let positioned = layout(&items, &overrides);
        let automatic_max = positioned
            .iter()
            .filter(|p| !overrides.contains_key(&p.item.id))
            .map(|p| p.lane)
            .max()
            .unwrap();
        assert_eq!(automatic_max, 1);
    }

    #[test]
    fn offsets_and_widths_are_end_inclusive_with_a_one_day_minimum() {
        let items = vec![
            item(1, date(2021, 1, 3), date(2021, 1, 3)),
            item(2, date(2021, 1, 4), date(2021, 1, 8)),
        ];
        let positioned = layout(&items, &HashMap::new());
        // Earliest start is Jan 3, so the padded window opens on Jan 1.
        assert_eq!(positioned[0].start_offset_days, 2.0);
        assert_eq!(positioned[0].width_days, 1.0);
        assert_eq!(positioned[1].start_offset_days, 3.0);
        assert_eq!(positioned[1].width_days, 5.0);
    }

    #[test]
    fn empty_input_yields_an_empty_layout() {
        assert!(layout(&[], &HashMap::new()).is_empty());
    }
}
