//! Validated amoebot structures.
//!
//! A [`Structure`] is an immutable snapshot: amoebots, their cell occupancy,
//! the pins on every active port and each amoebot's partition sets. It is
//! produced from a [`StructureSpec`] by [`StructureBuilder::build`], which
//! re-validates geometry and pin addressing. Reconfiguring an amoebot builds
//! a new snapshot.
//!
//! # Pin Order
//!
//! Pins get dense [`PinId`] handles in a fixed global order: amoebots by
//! ascending id, head before tail, directions 0..5, pin index. Every id-based
//! result downstream (circuit ids, reports) inherits this order.

use std::collections::HashMap;
use std::fmt;

use amoebot_topology::{Cell, Direction};
use tracing::debug;

use crate::amoebot::{AmoebotId, AmoebotSpec, End, PartitionLayout, PinRef, Port};
use crate::error::{ConfigError, Result};

/// Dense handle of a pin within one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinId(pub u32);

impl PinId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pin and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub amoebot: AmoebotId,
    pub pin: PinRef,
    /// Cell of the amoebot the pin's port belongs to
    pub cell: Cell,
}

/// Input description of a whole structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSpec {
    /// Pins on every active edge
    pub pins_per_edge: u8,
    pub amoebots: Vec<AmoebotSpec>,
    /// Explicit neighbor claims, validated against geometry
    pub bonds: Vec<(AmoebotId, AmoebotId)>,
}

impl Default for StructureSpec {
    fn default() -> Self {
        Self {
            pins_per_edge: 1,
            amoebots: Vec::new(),
            bonds: Vec::new(),
        }
    }
}

/// Fluent construction of a [`Structure`].
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    spec: StructureSpec,
    /// First id given a layout before it was declared
    stray_layout: Option<AmoebotId>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spec(spec: StructureSpec) -> Self {
        Self {
            spec,
            stray_layout: None,
        }
    }

    pub fn pins_per_edge(mut self, pins: u8) -> Self {
        self.spec.pins_per_edge = pins;
        self
    }

    pub fn amoebot(mut self, amoebot: AmoebotSpec) -> Self {
        self.spec.amoebots.push(amoebot);
        self
    }

    pub fn contracted(self, id: u32, cell: Cell) -> Self {
        self.amoebot(AmoebotSpec::contracted(id, cell))
    }

    pub fn expanded(self, id: u32, head: Cell, tail: Cell) -> Self {
        self.amoebot(AmoebotSpec::expanded(id, head, tail))
    }

    /// Set the layout of every amoebot declared so far with this id.
    ///
    /// An id not declared yet makes [`StructureBuilder::build`] fail with
    /// [`ConfigError::UnknownAmoebot`].
    pub fn layout(mut self, id: u32, layout: PartitionLayout) -> Self {
        let id = AmoebotId(id);
        let mut found = false;
        for a in self.spec.amoebots.iter_mut().filter(|a| a.id == id) {
            a.layout = layout.clone();
            found = true;
        }
        if !found {
            self.stray_layout.get_or_insert(id);
        }
        self
    }

    pub fn bond(mut self, a: u32, b: u32) -> Self {
        self.spec.bonds.push((AmoebotId(a), AmoebotId(b)));
        self
    }

    pub fn spec(&self) -> &StructureSpec {
        &self.spec
    }

    /// Validate and freeze the structure.
    pub fn build(self) -> Result<Structure> {
        if let Some(id) = self.stray_layout {
            return Err(ConfigError::UnknownAmoebot(id).into());
        }
        Structure::new(self.spec)
    }
}

/// An amoebot inside a validated structure.
#[derive(Debug, Clone)]
pub struct Amoebot {
    id: AmoebotId,
    head: Cell,
    tail: Option<Cell>,
    /// Active ports with the handle of their pin 0
    ports: Vec<(Port, PinId)>,
    partition_sets: Vec<Vec<PinId>>,
}

impl Amoebot {
    pub fn id(&self) -> AmoebotId {
        self.id
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn tail(&self) -> Option<Cell> {
        self.tail
    }

    pub fn is_expanded(&self) -> bool {
        self.tail.is_some()
    }

    /// The cell at `end`, if the amoebot has one there.
    pub fn cell(&self, end: End) -> Option<Cell> {
        match end {
            End::Head => Some(self.head),
            End::Tail => self.tail,
        }
    }

    /// One or two cells, head first.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        std::iter::once(self.head).chain(self.tail).collect()
    }

    /// Ports that have a neighboring amoebot across them.
    pub fn active_ports(&self) -> impl Iterator<Item = Port> + '_ {
        self.ports.iter().map(|(port, _)| *port)
    }

    pub fn partition_sets(&self) -> &[Vec<PinId>] {
        &self.partition_sets
    }

    fn first_pin(&self, port: Port) -> Option<PinId> {
        self.ports.iter().find(|(p, _)| *p == port).map(|(_, first)| *first)
    }
}

/// A validated, immutable amoebot structure.
#[derive(Debug, Clone)]
pub struct Structure {
    spec: StructureSpec,
    amoebots: Vec<Amoebot>,
    slots: HashMap<AmoebotId, usize>,
    occupancy: HashMap<Cell, (usize, End)>,
    pins: Vec<Pin>,
}

impl Structure {
    /// Validate `spec` and lay out pins and partition sets.
    pub fn new(mut spec: StructureSpec) -> Result<Self> {
        if spec.pins_per_edge == 0 {
            return Err(ConfigError::NoPins.into());
        }
        spec.amoebots.sort_by_key(|a| a.id);

        let mut slots = HashMap::with_capacity(spec.amoebots.len());
        let mut occupancy: HashMap<Cell, (usize, End)> = HashMap::with_capacity(spec.amoebots.len());
        for (slot, a) in spec.amoebots.iter().enumerate() {
            if slots.insert(a.id, slot).is_some() {
                return Err(ConfigError::DuplicateAmoebot(a.id).into());
            }
            if let Some((_, cell)) = a.cells().find(|(_, cell)| !cell.is_bounded()) {
                return Err(ConfigError::CoordinateOutOfRange { amoebot: a.id, cell }.into());
            }
            if let Some(tail) = a.tail {
                if !a.head.is_adjacent(&tail) {
                    return Err(ConfigError::DetachedTail {
                        amoebot: a.id,
                        head: a.head,
                        tail,
                    }
                    .into());
                }
            }
            for (end, cell) in a.cells() {
                if let Some(&(other, _)) = occupancy.get(&cell) {
                    return Err(ConfigError::CellConflict {
                        cell,
                        first: spec.amoebots[other].id,
                        second: a.id,
                    }
                    .into());
                }
                occupancy.insert(cell, (slot, end));
            }
        }

        for &(a, b) in &spec.bonds {
            let sa = *slots.get(&a).ok_or(ConfigError::UnknownAmoebot(a))?;
            let sb = *slots.get(&b).ok_or(ConfigError::UnknownAmoebot(b))?;
            let touching = sa != sb
                && spec.amoebots[sa]
                    .cells()
                    .any(|(_, ca)| spec.amoebots[sb].cells().any(|(_, cb)| ca.is_adjacent(&cb)));
            if !touching {
                return Err(ConfigError::UnsupportedBond { a, b }.into());
            }
        }

        let k = spec.pins_per_edge;
        let mut pins = Vec::new();
        let mut amoebots = Vec::with_capacity(spec.amoebots.len());
        for (slot, a) in spec.amoebots.iter().enumerate() {
            let mut ports = Vec::new();
            for (end, cell) in a.cells() {
                for direction in Direction::ALL {
                    let across = cell.neighbor(direction);
                    match occupancy.get(&across) {
                        Some(&(other, _)) if other != slot => {
                            ports.push((Port { end, direction }, PinId(pins.len() as u32)));
                            pins.extend((0..k).map(|index| Pin {
                                amoebot: a.id,
                                pin: PinRef::new(Port { end, direction }, index),
                                cell,
                            }));
                        }
                        _ => {}
                    }
                }
            }
            amoebots.push(Amoebot {
                id: a.id,
                head: a.head,
                tail: a.tail,
                ports,
                partition_sets: Vec::new(),
            });
        }

        let mut structure = Self {
            spec,
            amoebots,
            slots,
            occupancy,
            pins,
        };
        for slot in 0..structure.amoebots.len() {
            let sets = structure.resolve_layout(slot)?;
            structure.amoebots[slot].partition_sets = sets;
        }

        debug!(
            amoebots = structure.amoebots.len(),
            pins = structure.pins.len(),
            pins_per_edge = k,
            "structure built"
        );
        Ok(structure)
    }

    fn resolve_layout(&self, slot: usize) -> Result<Vec<Vec<PinId>>> {
        let amoebot = &self.amoebots[slot];
        let all: Vec<PinId> = self.pins_of_slot(slot).collect();

        let mut sets = match &self.spec.amoebots[slot].layout {
            PartitionLayout::Isolated => all.iter().map(|&p| vec![p]).collect(),
            PartitionLayout::Joined if all.is_empty() => Vec::new(),
            PartitionLayout::Joined => vec![all],
            PartitionLayout::Sets(declared) => {
                let first = all.first().map_or(0, |p| p.index());
                let mut used = vec![false; all.len()];
                let mut sets = Vec::with_capacity(declared.len());
                for declared_set in declared {
                    let mut set = Vec::with_capacity(declared_set.len());
                    for &pin_ref in declared_set {
                        let pin = self.resolve_pin(amoebot, pin_ref)?;
                        let seen = &mut used[pin.index() - first];
                        if *seen {
                            return Err(ConfigError::PinReused {
                                amoebot: amoebot.id,
                                pin: pin_ref,
                            }
                            .into());
                        }
                        *seen = true;
                        set.push(pin);
                    }
                    if !set.is_empty() {
                        sets.push(set);
                    }
                }
                sets.extend(
                    all.iter()
                        .zip(&used)
                        .filter(|(_, &u)| !u)
                        .map(|(&p, _)| vec![p]),
                );
                sets
            }
        };

        for set in &mut sets {
            set.sort_unstable();
        }
        sets.sort_unstable_by_key(|set| set[0]);
        Ok(sets)
    }

    fn resolve_pin(&self, amoebot: &Amoebot, pin: PinRef) -> Result<PinId> {
        if pin.index >= self.spec.pins_per_edge {
            return Err(ConfigError::PinOutOfRange {
                amoebot: amoebot.id,
                pin,
                pins_per_edge: self.spec.pins_per_edge,
            }
            .into());
        }
        let first = amoebot.first_pin(pin.port).ok_or(ConfigError::InactivePort {
            amoebot: amoebot.id,
            port: pin.port,
        })?;
        Ok(PinId(first.0 + pin.index as u32))
    }

    fn pins_of_slot(&self, slot: usize) -> impl Iterator<Item = PinId> + '_ {
        let k = self.spec.pins_per_edge as u32;
        self.amoebots[slot]
            .ports
            .iter()
            .flat_map(move |&(_, first)| (first.0..first.0 + k).map(PinId))
    }

    fn slot(&self, id: AmoebotId) -> Result<usize> {
        Ok(*self.slots.get(&id).ok_or(ConfigError::UnknownAmoebot(id))?)
    }

    /// Rebuild with a different partition layout for one amoebot.
    pub fn reconfigure(&self, id: AmoebotId, layout: PartitionLayout) -> Result<Self> {
        let slot = self.slot(id)?;
        let mut spec = self.spec.clone();
        spec.amoebots[slot].layout = layout;
        Self::new(spec)
    }

    /// The input this snapshot was built from, amoebots sorted by id.
    pub fn spec(&self) -> &StructureSpec {
        &self.spec
    }

    pub fn pins_per_edge(&self) -> u8 {
        self.spec.pins_per_edge
    }

    /// Amoebots in ascending id order.
    pub fn amoebots(&self) -> &[Amoebot] {
        &self.amoebots
    }

    pub fn amoebot(&self, id: AmoebotId) -> Option<&Amoebot> {
        self.slots.get(&id).map(|&slot| &self.amoebots[slot])
    }

    pub fn amoebot_count(&self) -> usize {
        self.amoebots.len()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// All pins in global order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin(&self, pin: PinId) -> Option<&Pin> {
        self.pins.get(pin.index())
    }

    /// Handle of the pin addressed by `pin` on amoebot `id`.
    pub fn pin_id(&self, id: AmoebotId, pin: PinRef) -> Result<PinId> {
        let slot = self.slot(id)?;
        self.resolve_pin(&self.amoebots[slot], pin)
    }

    /// The amoebot and end occupying `cell`.
    pub fn occupant(&self, cell: Cell) -> Option<(AmoebotId, End)> {
        self.occupancy
            .get(&cell)
            .map(|&(slot, end)| (self.amoebots[slot].id, end))
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Cells of amoebot `id`, head first.
    pub fn occupied_cells(&self, id: AmoebotId) -> Result<Vec<Cell>> {
        Ok(self.amoebots[self.slot(id)?].occupied_cells())
    }

    /// Pins on port `port` of amoebot `id`, by pin index; empty if inactive.
    pub fn pins_on_port(&self, id: AmoebotId, port: Port) -> Result<Vec<PinId>> {
        let amoebot = &self.amoebots[self.slot(id)?];
        let k = self.spec.pins_per_edge as u32;
        Ok(amoebot
            .first_pin(port)
            .map(|first| (first.0..first.0 + k).map(PinId).collect())
            .unwrap_or_default())
    }

    /// Pins on the edges facing `direction`: head edge first, then tail edge.
    pub fn pins_on_edge(&self, id: AmoebotId, direction: Direction) -> Result<Vec<PinId>> {
        let mut pins = self.pins_on_port(id, Port::head(direction))?;
        pins.extend(self.pins_on_port(id, Port::tail(direction))?);
        Ok(pins)
    }

    /// Disjoint pin sets of amoebot `id`, covering each of its pins once.
    pub fn partition_sets(&self, id: AmoebotId) -> Result<&[Vec<PinId>]> {
        Ok(self.amoebots[self.slot(id)?].partition_sets())
    }

    /// The pin paired with `pin` across its edge.
    pub fn partner(&self, pin: PinId) -> Option<PinId> {
        let p = self.pin(pin)?;
        let (other, end) = *self.occupancy.get(&p.cell.neighbor(p.pin.port.direction))?;
        let port = Port {
            end,
            direction: p.pin.port.direction.opposite(),
        };
        let first = self.amoebots[other].first_pin(port)?;
        Some(PinId(first.0 + p.pin.index as u32))
    }

    /// Distinct amoebots sharing a lattice edge with `id`, ascending.
    pub fn adjacent_amoebots(&self, id: AmoebotId) -> Result<Vec<AmoebotId>> {
        let amoebot = &self.amoebots[self.slot(id)?];
        let mut adjacent: Vec<AmoebotId> = amoebot
            .ports
            .iter()
            .filter_map(|(port, _)| {
                let cell = amoebot.cell(port.end)?.neighbor(port.direction);
                self.occupant(cell).map(|(other, _)| other)
            })
            .collect();
        adjacent.sort_unstable();
        adjacent.dedup();
        Ok(adjacent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn row(n: u32) -> StructureBuilder {
        (0..n).fold(StructureBuilder::new(), |b, i| b.contracted(i, Cell::new(i as i64, 0)))
    }

    #[test]
    fn pins_only_on_active_edges() {
        let s = row(3).pins_per_edge(2).build().unwrap();
        assert_eq!(s.pin_count(), 8); // 2 + 4 + 2

        let middle = AmoebotId(1);
        assert_eq!(s.pins_on_edge(middle, Direction::E).unwrap().len(), 2);
        assert_eq!(s.pins_on_edge(middle, Direction::W).unwrap().len(), 2);
        assert!(s.pins_on_edge(middle, Direction::NE).unwrap().is_empty());
        assert!(s.pins_on_edge(AmoebotId(0), Direction::W).unwrap().is_empty());
    }

    #[test]
    fn global_pin_order() {
        let s = row(2).pins_per_edge(2).build().unwrap();
        let pins: Vec<_> = s.pins().iter().map(|p| (p.amoebot, p.pin)).collect();
        assert_eq!(
            pins,
            vec![
                (AmoebotId(0), PinRef::head(Direction::E, 0)),
                (AmoebotId(0), PinRef::head(Direction::E, 1)),
                (AmoebotId(1), PinRef::head(Direction::W, 0)),
                (AmoebotId(1), PinRef::head(Direction::W, 1)),
            ]
        );
    }

    #[test]
    fn partners_match_pin_index() {
        let s = row(2).pins_per_edge(3).build().unwrap();
        for i in 0..3u8 {
            let a = s.pin_id(AmoebotId(0), PinRef::head(Direction::E, i)).unwrap();
            let b = s.pin_id(AmoebotId(1), PinRef::head(Direction::W, i)).unwrap();
            assert_eq!(s.partner(a), Some(b));
            assert_eq!(s.partner(b), Some(a));
        }
    }

    #[test]
    fn isolated_layout_is_singletons() {
        let s = row(3).build().unwrap();
        let sets = s.partition_sets(AmoebotId(1)).unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|set| set.len() == 1));
    }

    #[test]
    fn explicit_sets_are_completed_with_singletons() {
        let s = row(3)
            .pins_per_edge(2)
            .layout(
                1,
                PartitionLayout::Sets(vec![vec![
                    PinRef::head(Direction::W, 1),
                    PinRef::head(Direction::E, 0),
                ]]),
            )
            .build()
            .unwrap();
        let sets = s.partition_sets(AmoebotId(1)).unwrap();
        // 4 pins: one set of two, two singletons
        assert_eq!(sets.len(), 3);
        let covered: usize = sets.iter().map(Vec::len).sum();
        assert_eq!(covered, 4);
        // Canonical order: sets sorted by their lowest pin
        assert!(sets.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn expanded_amoebot_has_ten_ports_inside_a_ring() {
        let head = Cell::ORIGIN;
        let tail = Cell::new(1, 0);
        let mut b = StructureBuilder::new().expanded(0, head, tail);
        let mut next = 1;
        for cell in head.neighbors().into_iter().chain(tail.neighbors()) {
            if cell != head && cell != tail && !b.spec().amoebots.iter().any(|a| a.head == cell) {
                b = b.contracted(next, cell);
                next += 1;
            }
        }
        let s = b.build().unwrap();
        assert_eq!(s.amoebot(AmoebotId(0)).unwrap().active_ports().count(), 10);
        assert_eq!(s.occupied_cells(AmoebotId(0)).unwrap(), vec![head, tail]);
        // The internal edge carries no pins
        assert!(s.pins_on_port(AmoebotId(0), Port::head(Direction::E)).unwrap().is_empty());
        assert!(s.pins_on_port(AmoebotId(0), Port::tail(Direction::W)).unwrap().is_empty());
    }

    #[test]
    fn pins_on_edge_lists_head_then_tail() {
        // Expanded amoebot along E with a neighbor row to the south-east
        let s = StructureBuilder::new()
            .expanded(0, Cell::new(0, 0), Cell::new(1, 0))
            .contracted(1, Cell::new(0, 1))
            .contracted(2, Cell::new(1, 1))
            .build()
            .unwrap();
        let pins = s.pins_on_edge(AmoebotId(0), Direction::SE).unwrap();
        assert_eq!(pins.len(), 2);
        assert_eq!(s.pin(pins[0]).unwrap().pin.port.end, End::Head);
        assert_eq!(s.pin(pins[1]).unwrap().pin.port.end, End::Tail);
    }

    #[test]
    fn overlapping_cells_rejected_naming_both() {
        let err = StructureBuilder::new()
            .contracted(4, Cell::new(0, 0))
            .contracted(9, Cell::new(0, 0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfiguration(ConfigError::CellConflict {
                cell: Cell::new(0, 0),
                first: AmoebotId(4),
                second: AmoebotId(9),
            })
        );
    }

    #[test]
    fn tail_overlapping_other_head_rejected() {
        let err = StructureBuilder::new()
            .contracted(0, Cell::new(1, 0))
            .expanded(1, Cell::new(0, 0), Cell::new(1, 0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::CellConflict { first: AmoebotId(0), second: AmoebotId(1), .. })
        ));
    }

    #[test]
    fn detached_tail_rejected() {
        let err = StructureBuilder::new()
            .expanded(0, Cell::new(0, 0), Cell::new(2, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ConfigError::DetachedTail { .. })));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = StructureBuilder::new()
            .contracted(1, Cell::new(0, 0))
            .contracted(1, Cell::new(5, 0))
            .build()
            .unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::DuplicateAmoebot(AmoebotId(1))));
    }

    #[test]
    fn bonds_checked_against_geometry() {
        assert!(row(3).bond(0, 1).build().is_ok());
        let err = row(3).bond(0, 2).build().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfiguration(ConfigError::UnsupportedBond { a: AmoebotId(0), b: AmoebotId(2) })
        );
        let err = row(3).bond(0, 7).build().unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnknownAmoebot(AmoebotId(7))));
    }

    #[test]
    fn pin_index_out_of_range_rejected() {
        let err = row(2)
            .layout(0, PartitionLayout::Sets(vec![vec![PinRef::head(Direction::E, 1)]]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::PinOutOfRange { amoebot: AmoebotId(0), pins_per_edge: 1, .. })
        ));
    }

    #[test]
    fn pin_on_inactive_port_rejected() {
        let err = row(2)
            .layout(0, PartitionLayout::Sets(vec![vec![PinRef::head(Direction::W, 0)]]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ConfigError::InactivePort { .. })));

        let err = row(2)
            .layout(0, PartitionLayout::Sets(vec![vec![PinRef::tail(Direction::E, 0)]]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ConfigError::InactivePort { .. })));
    }

    #[test]
    fn pin_in_two_sets_rejected() {
        let e0 = PinRef::head(Direction::E, 0);
        let err = row(3)
            .layout(1, PartitionLayout::Sets(vec![vec![e0], vec![e0, PinRef::head(Direction::W, 0)]]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfiguration(ConfigError::PinReused { amoebot: AmoebotId(1), pin: e0 })
        );
    }

    #[test]
    fn zero_pins_rejected() {
        let err = row(2).pins_per_edge(0).build().unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::NoPins));
    }

    #[test]
    fn layout_before_declaration_rejected() {
        let err = StructureBuilder::new()
            .layout(3, PartitionLayout::Joined)
            .contracted(3, Cell::ORIGIN)
            .build()
            .unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnknownAmoebot(AmoebotId(3))));

        let err = row(2).layout(8, PartitionLayout::Joined).build().unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnknownAmoebot(AmoebotId(8))));
    }

    #[test]
    fn coordinates_beyond_limit_rejected() {
        for cell in [Cell::new(i64::MAX, 0), Cell::new(0, i64::MIN), Cell::new(Cell::LIMIT + 1, 0)] {
            let err = StructureBuilder::new().contracted(2, cell).build().unwrap_err();
            assert_eq!(
                err,
                Error::InvalidConfiguration(ConfigError::CoordinateOutOfRange { amoebot: AmoebotId(2), cell })
            );
        }

        let tail = Cell::new(Cell::LIMIT + 1, 0);
        let err = StructureBuilder::new()
            .expanded(0, Cell::new(Cell::LIMIT, 0), tail)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfiguration(ConfigError::CoordinateOutOfRange { amoebot: AmoebotId(0), cell: tail })
        );
    }

    #[test]
    fn structure_at_coordinate_limit() {
        let edge = Cell::new(Cell::LIMIT, -Cell::LIMIT);
        let s = StructureBuilder::new()
            .contracted(0, edge)
            .contracted(1, edge.neighbor(Direction::W))
            .build()
            .unwrap();
        assert_eq!(s.pin_count(), 2);
        assert_eq!(s.adjacent_amoebots(AmoebotId(0)).unwrap(), vec![AmoebotId(1)]);
    }

    #[test]
    fn reconfigure_builds_new_snapshot() {
        let s = row(3).build().unwrap();
        let joined = s.reconfigure(AmoebotId(1), PartitionLayout::Joined).unwrap();
        assert_eq!(s.partition_sets(AmoebotId(1)).unwrap().len(), 2);
        assert_eq!(joined.partition_sets(AmoebotId(1)).unwrap().len(), 1);
        assert!(s.reconfigure(AmoebotId(9), PartitionLayout::Joined).is_err());
    }

    #[test]
    fn adjacency_and_occupancy() {
        let s = row(3).build().unwrap();
        assert_eq!(s.adjacent_amoebots(AmoebotId(1)).unwrap(), vec![AmoebotId(0), AmoebotId(2)]);
        assert_eq!(s.occupant(Cell::new(2, 0)), Some((AmoebotId(2), End::Head)));
        assert!(!s.is_occupied(Cell::new(3, 0)));
        assert!(s.occupied_cells(AmoebotId(5)).is_err());
    }
}
