use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::routing::types::{Point, Rect};

/// Quarter-turn rotation about a component's centre, clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Add another rotation, wrapping at 360.
    pub fn add(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    fn is_quarter(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = SceneError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(SceneError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        r.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Position, unrotated size and rotation of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: Rotation::R0,
        }
    }

    fn center(&self) -> Point {
        Rect::new(self.x, self.y, self.width, self.height).center()
    }

    /// Occupied rectangle after rotation. Quarter turns swap width and height
    /// about the centre.
    pub fn footprint(&self) -> Rect {
        if self.rotation.is_quarter() {
            let c = self.center();
            Rect::new(
                c.x - self.height / 2.0,
                c.y - self.width / 2.0,
                self.height,
                self.width,
            )
        } else {
            Rect::new(self.x, self.y, self.width, self.height)
        }
    }

    /// Map an offset in the unrotated local frame (origin at top-left) to
    /// canvas coordinates.
    pub fn local_to_canvas(&self, dx: f64, dy: f64) -> Point {
        let c = self.center();
        let (ox, oy) = (self.x + dx - c.x, self.y + dy - c.y);
        let (rx, ry) = match self.rotation {
            Rotation::R0 => (ox, oy),
            Rotation::R90 => (-oy, ox),
            Rotation::R180 => (-ox, -oy),
            Rotation::R270 => (oy, -ox),
        };
        Point::new(c.x + rx, c.y + ry)
    }

    /// Drag release: keep the footprint inside the canvas with one grid
    /// cell of clearance on every side, then snap the origin and size to
    /// the grid. Terminals sit on the footprint edge and are reached from
    /// the cell beyond it, so that cell has to exist.
    pub fn settle(&mut self, x: f64, y: f64, canvas_width: f64, canvas_height: f64, grid: u32) {
        let g = grid.max(1) as f64;
        self.width = ((self.width / g).round() * g).max(g);
        self.height = ((self.height / g).round() * g).max(g);

        // Offset between origin and rotated footprint stays fixed while moving.
        let fp = self.footprint();
        let (off_x, off_y) = (fp.x - self.x, fp.y - self.y);
        let (min_x, max_x) = clearance_range(canvas_width, fp.width, g);
        let (min_y, max_y) = clearance_range(canvas_height, fp.height, g);
        let fx = (x + off_x).clamp(min_x, max_x);
        let fy = (y + off_y).clamp(min_y, max_y);

        let snap = |v: f64, min: f64, max: f64| {
            let s = (v / g).round() * g;
            if s > max { (s - g).max(min) } else { s }
        };
        self.x = snap(fx, min_x, max_x) - off_x;
        self.y = snap(fy, min_y, max_y) - off_y;
    }

    pub fn contains(&self, p: Point) -> bool {
        self.footprint().contains(p)
    }
}

/// Allowed range for a footprint edge along one axis. Falls back to the
/// bare canvas when it is too small for a cell of clearance on both sides.
fn clearance_range(canvas: f64, size: f64, g: f64) -> (f64, f64) {
    let max = canvas - size - g;
    if max >= g {
        (g, max)
    } else {
        (0.0, (canvas - size).max(0.0))
    }
}
