use serde::{Deserialize, Serialize};

use super::Component;
use super::placement::Placement;
use crate::routing::types::{Point, Rect};

/// I/O pin kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    Input,
    Output,
    /// Several lanes side by side, one terminal each.
    Bus,
}

impl std::str::FromStr for PinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(PinKind::Input),
            "output" => Ok(PinKind::Output),
            "bus" => Ok(PinKind::Bus),
            _ => Err(format!(
                "Unknown pin kind: {s}. Must be 'input', 'output', or 'bus'."
            )),
        }
    }
}

fn default_lanes() -> u32 {
    1
}

/// A placed I/O pin or bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub kind: PinKind,
    #[serde(default = "default_lanes")]
    pub lanes: u32,
    #[serde(flatten)]
    pub placement: Placement,
}

impl Pin {
    pub fn new(name: impl Into<String>, kind: PinKind, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            lanes: 1,
            placement: Placement::new(x, y, 40.0, 40.0),
        }
    }

    /// A bus pin with `lanes` terminals, each lane 40 px wide.
    pub fn bus(name: impl Into<String>, lanes: u32, x: f64, y: f64) -> Self {
        let lanes = lanes.max(1);
        Self {
            name: name.into(),
            kind: PinKind::Bus,
            lanes,
            placement: Placement::new(x, y, 40.0 * lanes as f64, 40.0),
        }
    }
}

impl Component for Pin {
    fn name(&self) -> &str {
        &self.name
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    /// Single pins expose `P` at the bottom centre; buses expose `B0..Bn`
    /// spread along the bottom edge.
    fn terminals(&self) -> Vec<(String, Point)> {
        let p = &self.placement;
        match self.kind {
            PinKind::Input | PinKind::Output => {
                vec![("P".to_string(), p.local_to_canvas(p.width / 2.0, p.height))]
            }
            PinKind::Bus => {
                let lanes = self.lanes.max(1);
                let lane_width = p.width / lanes as f64;
                (0..lanes)
                    .map(|i| {
                        let dx = lane_width * (i as f64 + 0.5);
                        (format!("B{i}"), p.local_to_canvas(dx, p.height))
                    })
                    .collect()
            }
        }
    }

    fn footprint(&self) -> Rect {
        self.placement.footprint()
    }
}
