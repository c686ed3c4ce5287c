#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Shrinks every edge by `d`; the size never goes negative.
    pub fn inset(&self, d: f32) -> Rect {
        Rect {
            x: self.x + d,
            y: self.y + d,
            w: (self.w - 2.0 * d).max(0.0),
            h: (self.h - 2.0 * d).max(0.0),
        }
    }
}

/// Whole physical pixels, as reported by a finished layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PxSize {
    pub width: i32,
    pub height: i32,
}

impl PxSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<PxSize> for Size {
    fn from(s: PxSize) -> Self {
        Size {
            width: s.width as f32,
            height: s.height as f32,
        }
    }
}

/// Direction a linear widget grows in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Extent of `s` along this orientation's axis.
    pub fn main(self, s: PxSize) -> i32 {
        match self {
            Orientation::Horizontal => s.width,
            Orientation::Vertical => s.height,
        }
    }

    /// Extent of `s` across this orientation's axis.
    pub fn cross(self, s: PxSize) -> i32 {
        match self {
            Orientation::Horizontal => s.height,
            Orientation::Vertical => s.width,
        }
    }

    /// Builds a size from main/cross extents.
    pub fn size(self, main: i32, cross: i32) -> PxSize {
        match self {
            Orientation::Horizontal => PxSize::new(main, cross),
            Orientation::Vertical => PxSize::new(cross, main),
        }
    }
}
