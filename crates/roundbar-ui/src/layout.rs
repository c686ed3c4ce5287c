//! Taffy-backed measurement and fill placement, plus scene painting.

use roundbar_core::{
    HorizontalAlign, LayoutError, Modifier, PxSize, Rect, Scene, SceneNode, Size, VerticalAlign,
};
use taffy::prelude::{NodeId, TaffyTree, auto, length};
use taffy::style::{
    AlignItems, AvailableSpace, Display, FlexDirection, JustifyContent, Position, Style,
};

use crate::state::ProgressBarState;

/// Resolved rectangles for one frame, relative to the track's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressLayout {
    pub track: Rect,
    pub secondary: Rect,
    pub primary: Rect,
}

impl ProgressLayout {
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for r in [&mut self.track, &mut self.secondary, &mut self.primary] {
            r.x += dx;
            r.y += dy;
        }
        self
    }
}

fn definite(s: Size) -> taffy::geometry::Size<AvailableSpace> {
    taffy::geometry::Size {
        width: AvailableSpace::Definite(s.width.max(0.0)),
        height: AvailableSpace::Definite(s.height.max(0.0)),
    }
}

fn fixed(w: f32, h: f32) -> taffy::geometry::Size<taffy::style::Dimension> {
    taffy::geometry::Size {
        width: length(w.max(0.0)),
        height: length(h.max(0.0)),
    }
}

/// Lays out a box styled by `modifier` as the only child of a column of size
/// `available`, and returns its size in whole pixels.
pub fn measure_box(modifier: &Modifier, available: Size) -> Result<PxSize, LayoutError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let node = tree.new_leaf(modifier.to_style())?;
    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: Some(AlignItems::FlexStart),
            size: fixed(available.width, available.height),
            ..Style::default()
        },
        &[node],
    )?;
    tree.compute_layout(root, definite(available))?;
    let l = tree.layout(node)?;
    Ok(PxSize::new(l.size.width as i32, l.size.height as i32))
}

fn flex_alignment(v: VerticalAlign, h: HorizontalAlign) -> (JustifyContent, AlignItems) {
    let justify = match h {
        HorizontalAlign::Left => JustifyContent::FlexStart,
        HorizontalAlign::Center => JustifyContent::Center,
        HorizontalAlign::Right => JustifyContent::FlexEnd,
    };
    let align = match v {
        VerticalAlign::Top => AlignItems::FlexStart,
        VerticalAlign::Center => AlignItems::Center,
        VerticalAlign::Bottom => AlignItems::FlexEnd,
    };
    (justify, align)
}

/// One fill: an absolutely positioned frame covering the padded area, with
/// the fill as its single row child aligned by justify/align.
fn fill_layer(
    tree: &mut TaffyTree<()>,
    padding: f32,
    area: PxSize,
    fill: PxSize,
    (justify, align): (JustifyContent, AlignItems),
) -> Result<(NodeId, NodeId), taffy::TaffyError> {
    let fill_node = tree.new_leaf(Style {
        size: fixed(fill.width as f32, fill.height as f32),
        flex_shrink: 0.0,
        ..Style::default()
    })?;
    let frame = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            position: Position::Absolute,
            inset: taffy::geometry::Rect {
                left: length(padding),
                top: length(padding),
                right: auto(),
                bottom: auto(),
            },
            size: fixed(area.width as f32, area.height as f32),
            justify_content: Some(justify),
            align_items: Some(align),
            ..Style::default()
        },
        &[fill_node],
    )?;
    Ok((frame, fill_node))
}

fn absolute_rect(
    tree: &TaffyTree<()>,
    frame: NodeId,
    node: NodeId,
) -> Result<Rect, taffy::TaffyError> {
    let f = tree.layout(frame)?;
    let l = tree.layout(node)?;
    Ok(Rect {
        x: f.location.x + l.location.x,
        y: f.location.y + l.location.y,
        w: l.size.width,
        h: l.size.height,
    })
}

/// Places both fill layers inside the latched track.
///
/// Before geometry is latched the track is drawn at `measured` and the fills
/// are empty.
pub fn place_fills(
    state: &ProgressBarState,
    measured: PxSize,
) -> Result<ProgressLayout, LayoutError> {
    let (Some(track), Some(area), Some((primary, secondary))) =
        (state.track(), state.fill_area(), state.fill_sizes())
    else {
        let track = Rect {
            x: 0.0,
            y: 0.0,
            w: measured.width.max(0) as f32,
            h: measured.height.max(0) as f32,
        };
        return Ok(ProgressLayout {
            track,
            ..ProgressLayout::default()
        });
    };

    let padding = state.padding() as f32;
    let alignment = state.alignment();
    let flex = flex_alignment(alignment.vertical, alignment.horizontal);

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let (sec_frame, sec_fill) = fill_layer(&mut tree, padding, area, secondary, flex)?;
    let (pri_frame, pri_fill) = fill_layer(&mut tree, padding, area, primary, flex)?;
    let root = tree.new_with_children(
        Style {
            size: fixed(track.width as f32, track.height as f32),
            ..Style::default()
        },
        &[sec_frame, pri_frame],
    )?;
    tree.compute_layout(root, definite(track.into()))?;

    Ok(ProgressLayout {
        track: Rect {
            x: 0.0,
            y: 0.0,
            w: track.width as f32,
            h: track.height as f32,
        },
        secondary: absolute_rect(&tree, sec_frame, sec_fill)?,
        primary: absolute_rect(&tree, pri_frame, pri_fill)?,
    })
}

/// Track first, then secondary under primary, both clipped to the padded
/// track. Empty fills emit nothing.
pub fn paint(state: &ProgressBarState, layout: &ProgressLayout, scene: &mut Scene) {
    let track = state.track_drawable();
    scene.nodes.push(SceneNode::Rect {
        rect: layout.track,
        color: track.color,
        radius: track.radius,
    });

    let fills = [
        (layout.secondary, state.secondary_progress_drawable()),
        (layout.primary, state.progress_drawable()),
    ];
    if fills.iter().all(|(r, _)| r.w <= 0.0 || r.h <= 0.0) {
        return;
    }

    let radius = state.progress_drawable().radius;
    scene.nodes.push(SceneNode::PushClip {
        rect: layout.track.inset(state.padding() as f32),
        radius,
    });
    for (rect, drawable) in fills {
        if rect.w > 0.0 && rect.h > 0.0 {
            scene.nodes.push(SceneNode::Rect {
                rect,
                color: drawable.color,
                radius: drawable.radius,
            });
        }
    }
    scene.nodes.push(SceneNode::PopClip);
}
