//! Scene graph: placed blocks and pins, and the wires between their terminals.
//!
//! The scene is the canvas controller for routing. It rasterizes itself into
//! an occupancy grid on demand ([`GridProvider`]) and decides which wires to
//! reroute after an edit. Every edit that changes geometry or connectivity
//! bumps the scene generation so stale grids can be detected.

pub mod block;
pub mod pin;
pub mod placement;
pub mod wire;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GridError, SceneError};
use crate::routing::grid::{OccupancyGrid, build_grid};
use crate::routing::types::{Point, Rect};
use crate::routing::{DEFAULT_GRID_SIZE, GridProvider, WireRouter};
use block::Block;
use pin::Pin;
use placement::{Placement, Rotation};
use wire::{TerminalRef, Wire, WireEnd, WireRoute};

/// Something placed on the canvas that blocks routing and exposes terminals.
pub trait Component {
    fn name(&self) -> &str;
    fn placement(&self) -> &Placement;
    fn placement_mut(&mut self) -> &mut Placement;
    /// Named connection points in canvas coordinates.
    fn terminals(&self) -> Vec<(String, Point)>;
    /// Rectangle the router must avoid.
    fn footprint(&self) -> Rect;

    fn terminal(&self, name: &str) -> Option<Point> {
        self.terminals()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    width: f64,
    height: f64,
    #[serde(default = "default_grid_size")]
    grid_size: u32,
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    pins: Vec<Pin>,
    #[serde(default)]
    wires: Vec<Wire>,
    #[serde(skip)]
    generation: u64,
}

fn validate_canvas(width: f64, height: f64, grid_size: u32) -> Result<(), GridError> {
    if grid_size == 0 {
        return Err(GridError::ZeroCellSize);
    }
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(GridError::InvalidCanvas { width, height });
    }
    Ok(())
}

impl Scene {
    pub fn new(width: f64, height: f64, grid_size: u32) -> Result<Self, SceneError> {
        validate_canvas(width, height, grid_size)?;
        Ok(Self {
            width,
            height,
            grid_size,
            blocks: Vec::new(),
            pins: Vec::new(),
            wires: Vec::new(),
            generation: 1,
        })
    }

    /// Parse and validate a scene. Wires come back `Pending`; call
    /// [`Scene::reroute_all`] to compute their routes.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let mut scene: Scene = serde_json::from_str(json)?;
        validate_canvas(scene.width, scene.height, scene.grid_size)?;

        let mut seen = HashSet::new();
        for c in scene.components() {
            if !seen.insert(c.name().to_string()) {
                return Err(SceneError::DuplicateName(c.name().to_string()));
            }
        }
        for w in &scene.wires {
            scene.terminal_point(&w.from)?;
            scene.terminal_point(&w.to)?;
        }
        let grid_size = scene.grid_size;
        for w in &mut scene.wires {
            if w.grid_size != grid_size {
                debug!(wire = %w.from, from = w.grid_size, to = grid_size, "normalizing wire grid size");
                w.grid_size = grid_size;
            }
        }
        scene.generation = 1;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            blocks = scene.blocks.len(),
            pins = scene.pins.len(),
            wires = scene.wires.len(),
            "loaded scene"
        );
        Ok(scene)
    }

    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), "saved scene");
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Monotonic edit counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn wire(&self, index: usize) -> Result<&Wire, SceneError> {
        self.wires.get(index).ok_or(SceneError::UnknownWire(index))
    }

    /// Blocks first, then pins, in insertion order (the drawing order).
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &dyn Component> {
        self.blocks
            .iter()
            .map(|b| b as &dyn Component)
            .chain(self.pins.iter().map(|p| p as &dyn Component))
    }

    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.components().find(|c| c.name() == name)
    }

    fn component_mut(&mut self, name: &str) -> Option<&mut dyn Component> {
        if let Some(i) = self.blocks.iter().position(|b| b.name == name) {
            return Some(&mut self.blocks[i]);
        }
        self.pins
            .iter_mut()
            .find(|p| p.name == name)
            .map(|p| p as &mut dyn Component)
    }

    /// Footprints of every component, the obstacles for routing.
    pub fn footprints(&self) -> Vec<Rect> {
        self.components().map(|c| c.footprint()).collect()
    }

    /// Resolve a terminal reference to its canvas position.
    pub fn terminal_point(&self, t: &TerminalRef) -> Result<Point, SceneError> {
        let component = self
            .component(&t.component)
            .ok_or_else(|| SceneError::UnknownComponent(t.component.clone()))?;
        component
            .terminal(&t.terminal)
            .ok_or_else(|| SceneError::UnknownTerminal {
                component: t.component.clone(),
                terminal: t.terminal.clone(),
            })
    }

    fn ensure_unique(&self, name: &str) -> Result<(), SceneError> {
        if self.component(name).is_some() {
            return Err(SceneError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    pub fn add_block(&mut self, block: Block) -> Result<(), SceneError> {
        self.ensure_unique(&block.name)?;
        self.blocks.push(block);
        self.touch();
        Ok(())
    }

    pub fn add_pin(&mut self, pin: Pin) -> Result<(), SceneError> {
        self.ensure_unique(&pin.name)?;
        self.pins.push(pin);
        self.touch();
        Ok(())
    }

    /// Remove a component and every wire attached to it. Returns the removed wires.
    pub fn remove_component(&mut self, name: &str) -> Result<Vec<Wire>, SceneError> {
        let before = self.blocks.len() + self.pins.len();
        self.blocks.retain(|b| b.name != name);
        self.pins.retain(|p| p.name != name);
        if self.blocks.len() + self.pins.len() == before {
            return Err(SceneError::UnknownComponent(name.to_string()));
        }
        let (removed, kept): (Vec<Wire>, Vec<Wire>) =
            self.wires.drain(..).partition(|w| w.touches(name));
        self.wires = kept;
        self.touch();
        debug!(component = name, wires = removed.len(), "removed component");
        Ok(removed)
    }

    fn check_connection(
        &self,
        from: &TerminalRef,
        to: &TerminalRef,
        ignore: Option<usize>,
    ) -> Result<(), SceneError> {
        self.terminal_point(from)?;
        self.terminal_point(to)?;
        if from == to {
            return Err(SceneError::SelfConnection(from.to_string()));
        }
        let duplicate = self
            .wires
            .iter()
            .enumerate()
            .any(|(i, w)| Some(i) != ignore && w.connects(from, to));
        if duplicate {
            return Err(SceneError::DuplicateWire {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    /// Create a wire between two terminals and route it. Returns its index.
    pub fn connect(
        &mut self,
        from: TerminalRef,
        to: TerminalRef,
        router: &WireRouter,
    ) -> Result<usize, SceneError> {
        self.check_connection(&from, &to, None)?;
        self.wires.push(Wire::new(from, to, self.grid_size));
        self.touch();
        let index = self.wires.len() - 1;
        self.route_wire(index, router)?;
        Ok(index)
    }

    /// Point one end of a wire at a different terminal and reroute it.
    pub fn reassign_endpoint(
        &mut self,
        index: usize,
        end: WireEnd,
        terminal: TerminalRef,
        router: &WireRouter,
    ) -> Result<(), SceneError> {
        let wire = self.wire(index)?;
        let (from, to) = match end {
            WireEnd::From => (&terminal, &wire.to),
            WireEnd::To => (&wire.from, &terminal),
        };
        self.check_connection(from, to, Some(index))?;
        *self.wires[index].end_mut(end) = terminal;
        self.touch();
        self.route_wire(index, router)?;
        Ok(())
    }

    /// Drag release: settle the component at `(x, y)` (clamped one cell inside
    /// the canvas, snapped to the grid) and reroute its wires. Returns the rerouted wire
    /// indices.
    pub fn complete_move(
        &mut self,
        name: &str,
        x: f64,
        y: f64,
        router: &WireRouter,
    ) -> Result<Vec<usize>, SceneError> {
        let (width, height, grid) = (self.width, self.height, self.grid_size);
        let component = self
            .component_mut(name)
            .ok_or_else(|| SceneError::UnknownComponent(name.to_string()))?;
        component.placement_mut().settle(x, y, width, height, grid);
        let settled = *component.placement();
        self.touch();
        debug!(component = name, x = settled.x, y = settled.y, "move completed");
        self.reroute_touching(name, router)
    }

    /// Rotate a component in place and reroute its wires.
    pub fn rotate(
        &mut self,
        name: &str,
        by: Rotation,
        router: &WireRouter,
    ) -> Result<Vec<usize>, SceneError> {
        let (width, height, grid) = (self.width, self.height, self.grid_size);
        let component = self
            .component_mut(name)
            .ok_or_else(|| SceneError::UnknownComponent(name.to_string()))?;
        let placement = component.placement_mut();
        placement.rotation = placement.rotation.add(by);
        let (x, y) = (placement.x, placement.y);
        placement.settle(x, y, width, height, grid);
        self.touch();
        self.reroute_touching(name, router)
    }

    fn reroute_touching(&mut self, name: &str, router: &WireRouter) -> Result<Vec<usize>, SceneError> {
        let affected: Vec<usize> = self
            .wires
            .iter()
            .enumerate()
            .filter(|(_, w)| w.touches(name))
            .map(|(i, _)| i)
            .collect();
        for &i in &affected {
            self.route_wire(i, router)?;
        }
        Ok(affected)
    }

    /// Route one wire against a fresh grid and cache the result on it.
    pub fn route_wire(&mut self, index: usize, router: &WireRouter) -> Result<&WireRoute, SceneError> {
        let wire = self.wire(index)?;
        let from = self.terminal_point(&wire.from)?;
        let to = self.terminal_point(&wire.to)?;
        let outcome = router.route(from, to, &*self)?;
        let wire = &mut self.wires[index];
        wire.route = outcome.into();
        Ok(&wire.route)
    }

    /// Route every wire in order, each against its own fresh grid.
    pub fn reroute_all(&mut self, router: &WireRouter) -> Result<(), SceneError> {
        for i in 0..self.wires.len() {
            self.route_wire(i, router)?;
        }
        Ok(())
    }

    /// First wire whose routed polyline passes within `tolerance` of `p`.
    pub fn wire_at(&self, p: Point, tolerance: f64) -> Option<usize> {
        self.wires.iter().position(|w| w.contains_point(p, tolerance))
    }

    /// Topmost component containing `p`.
    pub fn component_at(&self, p: Point) -> Option<&str> {
        self.components()
            .rev()
            .find(|c| c.placement().contains(p))
            .map(|c| c.name())
    }
}

impl GridProvider for Scene {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn occupancy_grid(&self) -> Result<OccupancyGrid, GridError> {
        Ok(build_grid(self.width, self.height, self.grid_size, &self.footprints())?
            .with_generation(self.generation))
    }
}
