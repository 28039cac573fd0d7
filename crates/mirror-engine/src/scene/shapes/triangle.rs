use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Filled triangle. Winding does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCmd {
    pub points: [Vec2; 3],
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_triangle(&mut self, z: ZIndex, points: [Vec2; 3], color: Color) {
        self.push(z, DrawCmd::Triangle(TriangleCmd { points, color }));
    }
}
