use std::fmt;

use serde::{Deserialize, Serialize};

use super::Component;
use super::placement::Placement;
use crate::routing::types::{Point, Rect};

/// Logic block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockKind {
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
    /// D flip-flop.
    Dff,
    /// 2:1 multiplexer.
    Mux,
}

/// Where a terminal sits on the unrotated block, as fractions of width and height.
#[derive(Debug, Clone, Copy)]
struct TerminalSpec {
    name: &'static str,
    fx: f64,
    fy: f64,
}

const fn t(name: &'static str, fx: f64, fy: f64) -> TerminalSpec {
    TerminalSpec { name, fx, fy }
}

const NOT_TERMINALS: &[TerminalSpec] = &[t("IN1", 0.5, 0.0), t("OUT1", 0.5, 1.0)];
const GATE_TERMINALS: &[TerminalSpec] = &[t("IN1", 0.0, 0.0), t("IN2", 1.0, 0.0), t("OUT1", 0.5, 1.0)];
const DFF_TERMINALS: &[TerminalSpec] = &[
    t("D", 0.0, 0.0),
    t("CLK", 1.0, 0.0),
    t("Q", 0.0, 1.0),
    t("QN", 1.0, 1.0),
];
const MUX_TERMINALS: &[TerminalSpec] = &[
    t("IN0", 0.0, 0.0),
    t("IN1", 1.0, 0.0),
    t("SEL", 0.0, 0.5),
    t("OUT", 0.5, 1.0),
];

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Not,
        BlockKind::And,
        BlockKind::Nand,
        BlockKind::Or,
        BlockKind::Nor,
        BlockKind::Xor,
        BlockKind::Xnor,
        BlockKind::Dff,
        BlockKind::Mux,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Not => "NOT",
            BlockKind::And => "AND",
            BlockKind::Nand => "NAND",
            BlockKind::Or => "OR",
            BlockKind::Nor => "NOR",
            BlockKind::Xor => "XOR",
            BlockKind::Xnor => "XNOR",
            BlockKind::Dff => "DFF",
            BlockKind::Mux => "MUX",
        }
    }

    fn terminal_specs(self) -> &'static [TerminalSpec] {
        match self {
            BlockKind::Not => NOT_TERMINALS,
            BlockKind::And
            | BlockKind::Nand
            | BlockKind::Or
            | BlockKind::Nor
            | BlockKind::Xor
            | BlockKind::Xnor => GATE_TERMINALS,
            BlockKind::Dff => DFF_TERMINALS,
            BlockKind::Mux => MUX_TERMINALS,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown block kind: {s}"))
    }
}

/// A placed logic block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub kind: BlockKind,
    #[serde(flatten)]
    pub placement: Placement,
}

impl Block {
    pub fn new(name: impl Into<String>, kind: BlockKind, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            placement: Placement::new(x, y, 40.0, 40.0),
        }
    }
}

impl Component for Block {
    fn name(&self) -> &str {
        &self.name
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn terminals(&self) -> Vec<(String, Point)> {
        let p = &self.placement;
        self.kind
            .terminal_specs()
            .iter()
            .map(|s| {
                let at = p.local_to_canvas(s.fx * p.width, s.fy * p.height);
                (s.name.to_string(), at)
            })
            .collect()
    }

    fn footprint(&self) -> Rect {
        self.placement.footprint()
    }
}
