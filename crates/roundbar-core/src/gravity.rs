use bitflags::bitflags;

use crate::GravityError;

bitflags! {
    /// Toolkit gravity bits. Vertical and horizontal placement occupy separate
    /// nibbles; read them through [`Gravity::vertical`] and
    /// [`Gravity::horizontal`] rather than testing individual bits, since
    /// `LEFT` and `RIGHT` share their low bit with `CENTER_HORIZONTAL`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Gravity: u32 {
        const CENTER_HORIZONTAL = 0x01;
        const LEFT = 0x03;
        const RIGHT = 0x05;
        const CENTER_VERTICAL = 0x10;
        const TOP = 0x30;
        const BOTTOM = 0x50;
        const CENTER = 0x11;
    }
}

impl Gravity {
    pub const NO_GRAVITY: Gravity = Gravity::empty();
    pub const HORIZONTAL_MASK: u32 = 0x07;
    pub const VERTICAL_MASK: u32 = 0x70;

    /// Parses `|`-separated markup names such as `"center_vertical|right"`.
    /// Fails on the first unrecognised name.
    pub fn parse(s: &str) -> Result<Gravity, GravityError> {
        let mut g = Gravity::NO_GRAVITY;
        for token in s.split('|').map(str::trim).filter(|t| !t.is_empty()) {
            g |= match token {
                "top" => Gravity::TOP,
                "bottom" => Gravity::BOTTOM,
                "left" | "start" => Gravity::LEFT,
                "right" | "end" => Gravity::RIGHT,
                "center_vertical" => Gravity::CENTER_VERTICAL,
                "center_horizontal" => Gravity::CENTER_HORIZONTAL,
                "center" => Gravity::CENTER,
                other => return Err(GravityError::UnknownName(other.to_string())),
            };
        }
        Ok(g)
    }

    pub fn vertical(self) -> VerticalAlign {
        match self.bits() & Self::VERTICAL_MASK {
            0x50 => VerticalAlign::Bottom,
            0x10 => VerticalAlign::Center,
            _ => VerticalAlign::Top,
        }
    }

    pub fn horizontal(self) -> HorizontalAlign {
        match self.bits() & Self::HORIZONTAL_MASK {
            0x01 => HorizontalAlign::Center,
            0x05 => HorizontalAlign::Right,
            _ => HorizontalAlign::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Placement of a child inside a larger parent, one component per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub vertical: VerticalAlign,
    pub horizontal: HorizontalAlign,
}

impl Alignment {
    pub const TOP_LEFT: Alignment = Alignment::new(VerticalAlign::Top, HorizontalAlign::Left);
    pub const CENTER: Alignment = Alignment::new(VerticalAlign::Center, HorizontalAlign::Center);

    pub const fn new(vertical: VerticalAlign, horizontal: HorizontalAlign) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn from_gravity(g: Gravity) -> Self {
        Self::new(g.vertical(), g.horizontal())
    }

    pub fn to_gravity(self) -> Gravity {
        let v = match self.vertical {
            VerticalAlign::Top => Gravity::TOP,
            VerticalAlign::Center => Gravity::CENTER_VERTICAL,
            VerticalAlign::Bottom => Gravity::BOTTOM,
        };
        let h = match self.horizontal {
            HorizontalAlign::Left => Gravity::LEFT,
            HorizontalAlign::Center => Gravity::CENTER_HORIZONTAL,
            HorizontalAlign::Right => Gravity::RIGHT,
        };
        v | h
    }
}

impl From<Gravity> for Alignment {
    fn from(g: Gravity) -> Self {
        Alignment::from_gravity(g)
    }
}
