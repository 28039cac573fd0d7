use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream.
///
/// Each widget owns one list and rebuilds it whole on every accepted frame; the
/// dashboard composes the widget lists into a frame list with [`extend_from`].
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Clipping
///
/// Use [`push_clip`] / [`pop_clip`] to scope draw commands to a canvas rect.
/// Clips are intersected with the current parent.
///
/// [`extend_from`]: DrawList::extend_from
/// [`push_clip`]: DrawList::push_clip
/// [`pop_clip`]: DrawList::pop_clip
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Top is always the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip rect from the clip stack.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let clip = self.clip_stack.last().copied();
        self.push_item(z, cmd, clip);
    }

    fn push_item(&mut self, z: ZIndex, cmd: DrawCmd, clip_rect: Option<Rect>) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key: SortKey::new(z, order), cmd, clip_rect });
        self.sorted_dirty = true;
    }

    /// Appends every item of `other`, keeping its z-layers and clips.
    ///
    /// Items keep their relative order and land after anything already recorded
    /// on the same layer. Clips are intersected with the current clip, if any.
    pub fn extend_from(&mut self, other: &DrawList) {
        let parent = self.clip_stack.last().copied();
        for item in &other.items {
            let clip = match (parent, item.clip_rect) {
                (None, c) => c,
                (Some(p), None) => Some(p),
                (Some(p), Some(c)) => Some(p.intersect(c).unwrap_or_default()),
            };
            self.push_item(item.key.z, item.cmd.clone(), clip);
        }
    }

    /// Begins a scissor region. All draw commands pushed until [`pop_clip`] are clipped
    /// to `rect` (intersected with any parent clip rect).
    ///
    /// Calls must be balanced with [`pop_clip`].
    ///
    /// [`pop_clip`]: DrawList::pop_clip
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap produces a zero-area rect so the renderer skips those draws.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region started by [`push_clip`].
    ///
    /// [`push_clip`]: DrawList::push_clip
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items in paint order (back-to-front) without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        self.sorted_indices.sort_by_key(|&i| self.items[i].key);
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn circles_in_order(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Circle(c) => Some(c.radius),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_layer_then_insertion() {
        let mut list = DrawList::new();
        list.push_disc(ZIndex(2), Vec2::zero(), 1.0, Color::WHITE);
        list.push_disc(ZIndex(1), Vec2::zero(), 2.0, Color::WHITE);
        list.push_disc(ZIndex(2), Vec2::zero(), 3.0, Color::WHITE);
        assert_eq!(circles_in_order(&mut list), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn pushed_items_inherit_nested_clip() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_disc(ZIndex(0), Vec2::zero(), 1.0, Color::WHITE);
        list.pop_clip();
        list.pop_clip();
        list.push_disc(ZIndex(0), Vec2::zero(), 1.0, Color::WHITE);

        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(list.items()[1].clip_rect, None);
    }

    #[test]
    fn extend_from_keeps_layers_and_appends() {
        let mut widget = DrawList::new();
        widget.push_disc(ZIndex::CONTENT, Vec2::zero(), 7.0, Color::WHITE);

        let mut frame = DrawList::new();
        frame.push_disc(ZIndex::BACKGROUND, Vec2::zero(), 1.0, Color::WHITE);
        frame.extend_from(&widget);

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.items()[1].key.z, ZIndex::CONTENT);
        assert_eq!(circles_in_order(&mut frame), vec![1.0, 7.0]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        list.push_disc(ZIndex(0), Vec2::zero(), 1.0, Color::WHITE);
        list.clear();
        assert!(list.is_empty());
        list.push_disc(ZIndex(0), Vec2::zero(), 1.0, Color::WHITE);
        assert_eq!(list.items()[0].clip_rect, None);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
