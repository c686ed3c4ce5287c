use crate::{Color, Rect};

/// Renderable scene
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            nodes: Vec::new(),
        }
    }

    /// Only the filled rectangles, in paint order.
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color, f32)> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Rect {
                rect,
                color,
                radius,
            } => Some((rect, color, *radius)),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}
