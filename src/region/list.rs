//! List selection, pagination and bar layout

use crate::geometry::Rect;

/// Move to the next selectable index starting at `index`
///
/// Steps in `direction` over non-selectable entries. Past either end the
/// search wraps when `allow_wrap` is set, otherwise it clamps to that end
/// and turns around. Returns `None` only if nothing is selectable.
pub fn list_select(
    selectable: &[bool],
    index: isize,
    direction: isize,
    allow_wrap: bool,
) -> Option<usize> {
    let len = selectable.len() as isize;
    if !selectable.iter().any(|s| *s) {
        return None;
    }

    let mut direction = if direction < 0 { -1 } else { 1 };
    let mut i = index;
    // two passes always reach a selectable entry
    for _ in 0..=(2 * len + 1) {
        if i < 0 {
            if allow_wrap {
                i = len - 1;
            } else {
                i = 0;
                direction = 1;
            }
        } else if i >= len {
            if allow_wrap {
                i = 0;
            } else {
                i = len - 1;
                direction = -1;
            }
        }
        if selectable[i as usize] {
            return Some(i as usize);
        }
        i += direction;
    }
    None
}

/// Rows that fit in the viewport, at least one
pub fn page_size(viewport: i32, item: i32) -> usize {
    if item <= 0 {
        return 1;
    }
    (viewport / item).max(1) as usize
}

/// First visible row, keeping the selection about a third from the top
pub fn page_start(selected: usize, len: usize, page_size: usize) -> usize {
    let wanted = selected as isize - (page_size / 3) as isize;
    let last = len as isize - page_size as isize;
    wanted.min(last).max(0) as usize
}

/// One laid out bar item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSlot {
    /// Index among the bar's real items (the `None` separator is skipped)
    pub index: usize,
    pub text: String,
    pub rect: Rect,
}

/// Number of selectable items in a bar
pub fn bar_len(items: &[Option<String>]) -> usize {
    items.iter().flatten().count()
}

/// Lay out bar items inside `area`
///
/// Items before the `None` separator run left to right from the left edge;
/// items after it end flush with the right edge. `width` measures an item.
pub fn layout_bar(
    items: &[Option<String>],
    area: Rect,
    spacing: i32,
    mut width: impl FnMut(&str) -> i32,
) -> Vec<BarSlot> {
    let split = items.iter().position(Option::is_none).unwrap_or(items.len());
    let left: Vec<&str> = items[..split].iter().flatten().map(String::as_str).collect();
    let right: Vec<&str> = items[split..].iter().flatten().map(String::as_str).collect();

    let mut slots = Vec::with_capacity(left.len() + right.len());

    let mut x = area.left();
    for text in &left {
        let w = width(text);
        slots.push(BarSlot {
            index: slots.len(),
            text: text.to_string(),
            rect: Rect::new(x, area.y(), w, area.height()),
        });
        x += w + spacing;
    }

    let widths: Vec<i32> = right.iter().map(|t| width(t)).collect();
    let total: i32 = widths.iter().sum::<i32>() + spacing * (widths.len() as i32 - 1).max(0);
    let mut x = area.right() - total;
    for (text, w) in right.iter().zip(widths) {
        slots.push(BarSlot {
            index: slots.len(),
            text: text.to_string(),
            rect: Rect::new(x, area.y(), w, area.height()),
        });
        x += w + spacing;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_to_last_entry() {
        let all = [true; 5];
        assert_eq!(list_select(&all, -1, -1, true), Some(4));
        assert_eq!(list_select(&all, 5, 1, true), Some(0));
    }

    #[test]
    fn clamps_and_turns_around_without_wrap() {
        let all = [true; 5];
        assert_eq!(list_select(&all, -1, -1, false), Some(0));
        assert_eq!(list_select(&all, 5, 1, false), Some(4));

        // header at the top: moving up from 1 bounces back down to 1
        let with_header = [false, true, true];
        assert_eq!(list_select(&with_header, 0, -1, false), Some(1));
        // and wraps to the bottom when allowed
        assert_eq!(list_select(&with_header, 0, -1, true), Some(2));
    }

    #[test]
    fn skips_non_selectable_entries() {
        let items = [true, false, false, true];
        assert_eq!(list_select(&items, 1, 1, false), Some(3));
        assert_eq!(list_select(&items, 2, -1, false), Some(0));
    }

    #[test]
    fn never_returns_a_non_selectable_index() {
        let items = [false, true, false, false, true, false];
        for start in -2..8 {
            for dir in [-1, 1] {
                for wrap in [false, true] {
                    let got = list_select(&items, start, dir, wrap).unwrap();
                    assert!(items[got], "start {} dir {} wrap {}", start, dir, wrap);
                }
            }
        }
        assert_eq!(list_select(&[false, false], 0, 1, true), None);
        assert_eq!(list_select(&[], 0, 1, true), None);
    }

    #[test]
    fn pagination_keeps_selection_a_third_down() {
        assert_eq!(page_size(300, 30), 10);
        assert_eq!(page_size(10, 30), 1);
        assert_eq!(page_start(0, 50, 10), 0);
        assert_eq!(page_start(2, 50, 10), 0);
        assert_eq!(page_start(20, 50, 10), 17);
        assert_eq!(page_start(49, 50, 10), 40);
        assert_eq!(page_start(3, 5, 10), 0);
    }

    #[test]
    fn bar_splits_into_left_and_right_groups() {
        let items = vec![
            Some("A".to_string()),
            Some("BB".to_string()),
            None,
            Some("CCC".to_string()),
        ];
        assert_eq!(bar_len(&items), 3);
        let slots = layout_bar(&items, Rect::new(0, 0, 100, 20), 5, |t| t.len() as i32 * 10);
        assert_eq!(slots[0].rect, Rect::new(0, 0, 10, 20));
        assert_eq!(slots[1].rect, Rect::new(15, 0, 20, 20));
        assert_eq!(slots[2].index, 2);
        assert_eq!(slots[2].rect, Rect::new(70, 0, 30, 20));
    }

    #[test]
    fn bar_without_separator_is_left_aligned() {
        let items = vec![Some("A".to_string()), Some("B".to_string())];
        let slots = layout_bar(&items, Rect::new(10, 0, 100, 20), 0, |_| 10);
        assert_eq!(slots[1].rect.x(), 20);
    }
}
