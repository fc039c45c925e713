use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::routing::types::{Point, Polyline, RouteOutcome, UnroutableReason};

/// `component.terminal`, e.g. `AND1.IN2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TerminalRef {
    pub component: String,
    pub terminal: String,
}

impl TerminalRef {
    pub fn new(component: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            terminal: terminal.into(),
        }
    }
}

impl FromStr for TerminalRef {
    type Err = SceneError;

    /// Splits on the last dot so component names may contain dots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().rsplit_once('.') {
            Some((c, t)) if !c.is_empty() && !t.is_empty() => Ok(Self::new(c, t)),
            _ => Err(SceneError::InvalidTerminalRef(s.to_string())),
        }
    }
}

impl TryFrom<String> for TerminalRef {
    type Error = SceneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TerminalRef> for String {
    fn from(t: TerminalRef) -> String {
        t.to_string()
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.terminal)
    }
}

/// Which end of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEnd {
    From,
    To,
}

/// Cached routing state of a wire. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireRoute {
    /// Not routed since load or the last edit.
    #[default]
    Pending,
    Routed(Polyline),
    /// No route right now; drawn as nothing by the caller.
    Unroutable(UnroutableReason),
}

impl From<RouteOutcome> for WireRoute {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Routed { polyline, .. } => WireRoute::Routed(polyline),
            RouteOutcome::Unroutable(reason) => WireRoute::Unroutable(reason),
        }
    }
}

/// A connection between two terminals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub from: TerminalRef,
    pub to: TerminalRef,
    pub grid_size: u32,
    #[serde(skip)]
    pub route: WireRoute,
}

impl Wire {
    pub fn new(from: TerminalRef, to: TerminalRef, grid_size: u32) -> Self {
        Self {
            from,
            to,
            grid_size,
            route: WireRoute::Pending,
        }
    }

    pub fn end_mut(&mut self, end: WireEnd) -> &mut TerminalRef {
        match end {
            WireEnd::From => &mut self.from,
            WireEnd::To => &mut self.to,
        }
    }

    /// Whether either end sits on `component`.
    pub fn touches(&self, component: &str) -> bool {
        self.from.component == component || self.to.component == component
    }

    /// Same pair of terminals, in either direction.
    pub fn connects(&self, a: &TerminalRef, b: &TerminalRef) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    pub fn polyline(&self) -> Option<&Polyline> {
        match &self.route {
            WireRoute::Routed(p) => Some(p),
            _ => None,
        }
    }

    /// Hit test against the routed polyline. Unrouted wires are never hit.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.polyline()
            .is_some_and(|line| line.contains_point(p, tolerance))
    }
}
