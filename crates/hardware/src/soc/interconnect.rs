//! Memory router for the instruction and data buses.
//!
//! This module implements the interconnect between the core's two bus
//! initiators and the memory targets. It provides:
//! 1. **Region tables:** An ordered map per bus from address ranges to targets.
//! 2. **Routing:** `route` translates a byte address into a target index and
//!    a local offset. Unmapped addresses never acknowledge.
//! 3. **Arbitration:** Each target is shared by both buses. Its grant is a
//!    registered value that stays with the owning bus while that bus holds
//!    `cyc`; otherwise it moves to a requesting bus, instruction bus first.
//!    Handing over the grant costs the target one idle tick.

use tracing::trace;

use super::devices::SpiFlash;
use super::memory::Ram;
use super::traits::{BusRequest, BusResponse, BusTarget};

/// One of the core's bus initiators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BusKind {
    /// Instruction fetch bus.
    Instruction,
    /// Load/store bus.
    Data,
}

impl BusKind {
    /// Arbitration priority order.
    const PRIORITY: [Self; 2] = [Self::Instruction, Self::Data];
}

/// An address range mapped to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// First byte address of the range.
    pub base: u32,
    /// Range size in bytes.
    pub size: u32,
    /// Index of the target returned by `MemoryRouter::add_target`.
    pub target: usize,
}

impl Region {
    /// Returns `true` if `addr` falls inside this range.
    pub const fn contains(&self, addr: u32) -> bool {
        addr.wrapping_sub(self.base) < self.size
    }
}

/// A target together with its arbiter state.
struct Port {
    target: Box<dyn BusTarget>,
    grant: BusKind,
}

impl std::fmt::Debug for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Port")
            .field("target", &self.target.name())
            .field("grant", &self.grant)
            .finish()
    }
}

/// Routes both buses to their targets and arbitrates shared targets.
#[derive(Debug, Default)]
pub struct MemoryRouter {
    ports: Vec<Port>,
    ibus: Vec<Region>,
    dbus: Vec<Region>,
}

impl MemoryRouter {
    /// Creates a router with no targets and empty maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a target and returns its index for use with `map`.
    pub fn add_target(&mut self, target: Box<dyn BusTarget>) -> usize {
        self.ports.push(Port {
            target,
            grant: BusKind::Instruction,
        });
        self.ports.len() - 1
    }

    /// Maps `size` bytes at `base` on `bus` to `target`.
    ///
    /// Regions are searched in insertion order; the first match wins.
    pub fn map(&mut self, bus: BusKind, base: u32, size: u32, target: usize) {
        self.regions_mut(bus).push(Region { base, size, target });
    }

    /// Region table for `bus`.
    pub fn regions(&self, bus: BusKind) -> &[Region] {
        match bus {
            BusKind::Instruction => &self.ibus,
            BusKind::Data => &self.dbus,
        }
    }

    const fn regions_mut(&mut self, bus: BusKind) -> &mut Vec<Region> {
        match bus {
            BusKind::Instruction => &mut self.ibus,
            BusKind::Data => &mut self.dbus,
        }
    }

    /// Resolves `addr` on `bus` to a target index and local offset.
    ///
    /// # Returns
    ///
    /// `None` if no region on that bus contains the address.
    pub fn route(&self, bus: BusKind, addr: u32) -> Option<(usize, u32)> {
        self.regions(bus)
            .iter()
            .find(|r| r.contains(addr) && r.target < self.ports.len())
            .map(|r| (r.target, addr - r.base))
    }

    /// Registered response seen by `bus` for its current request.
    ///
    /// Only the bus holding the target's grant observes its acknowledge.
    pub fn response(&self, bus: BusKind, req: &BusRequest) -> BusResponse {
        if !req.is_active() {
            return BusResponse::default();
        }
        match self.route(bus, req.addr) {
            Some((idx, _)) if self.ports[idx].grant == bus => self.ports[idx].target.response(),
            _ => BusResponse::default(),
        }
    }

    /// Clocks every target once with the request its arbiter grants.
    pub fn clock(&mut self, ireq: &BusRequest, dreq: &BusRequest) {
        let routed = [
            self.routed(BusKind::Instruction, ireq),
            self.routed(BusKind::Data, dreq),
        ];
        for (idx, port) in self.ports.iter_mut().enumerate() {
            let wants = |bus: BusKind| {
                routed[bus as usize].and_then(|(t, req)| (t == idx).then_some(req))
            };
            if let Some(req) = wants(port.grant) {
                port.target.clock(&req);
                continue;
            }
            port.target.clock(&BusRequest::IDLE);
            if let Some(next) = BusKind::PRIORITY.into_iter().find(|&b| wants(b).is_some()) {
                trace!(device = port.target.name(), grant = ?next, "router: grant");
                port.grant = next;
            }
        }
    }

    fn routed(&self, bus: BusKind, req: &BusRequest) -> Option<(usize, BusRequest)> {
        if !req.is_active() {
            return None;
        }
        self.route(bus, req.addr)
            .map(|(idx, offset)| (idx, req.with_addr(offset)))
    }

    /// Bus currently granted access to `target`.
    pub fn grant(&self, target: usize) -> Option<BusKind> {
        self.ports.get(target).map(|p| p.grant)
    }

    /// Number of attached targets.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns `true` if no targets are attached.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Returns the target at `idx`.
    pub fn target(&self, idx: usize) -> Option<&dyn BusTarget> {
        self.ports.get(idx).map(|p| p.target.as_ref())
    }

    /// Returns the target at `idx` mutably.
    pub fn target_mut(&mut self, idx: usize) -> Option<&mut (dyn BusTarget + 'static)> {
        self.ports.get_mut(idx).map(|p| p.target.as_mut())
    }

    /// First attached RAM, if any.
    pub fn ram(&self) -> Option<&Ram> {
        self.ports.iter().find_map(|p| p.target.as_ram())
    }

    /// First attached RAM, mutably.
    pub fn ram_mut(&mut self) -> Option<&mut Ram> {
        self.ports.iter_mut().find_map(|p| p.target.as_ram_mut())
    }

    /// The SPI flash controller, if one is attached.
    pub fn flash(&self) -> Option<&SpiFlash> {
        self.ports.iter().find_map(|p| p.target.as_flash())
    }

    /// Resets every target and returns every arbiter to the instruction bus.
    pub fn reset(&mut self) {
        for port in &mut self.ports {
            port.target.reset();
            port.grant = BusKind::Instruction;
        }
    }
}
