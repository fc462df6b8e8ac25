//! Corridor generation
//!
//! Rooms are joined by a minimum spanning tree over the complete graph of
//! room centers:
//! 1. Build every room pair, weighted by center-to-center distance
//! 2. Sort ascending
//! 3. Starting from room 0, repeatedly take the shortest edge that reaches
//!    one new room and carve an L-shaped corridor along it

use log::{debug, warn};

use crate::grid::{Cell, Grid, Pos};
use crate::room::Room;

/// Weighted connection between two rooms, by index into the room list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub room_a: usize,
    pub room_b: usize,
    pub distance: f64,
}

/// Build all room pairs sorted by ascending distance
///
/// The sort is stable, so equal distances keep pair order
/// `(0,1), (0,2), .., (1,2), ..`.
pub fn build_edges(rooms: &[Room]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(rooms.len() * rooms.len().saturating_sub(1) / 2);
    for (i, a) in rooms.iter().enumerate() {
        for (j, b) in rooms.iter().enumerate().skip(i + 1) {
            edges.push(Edge {
                room_a: i,
                room_b: j,
                distance: a.distance_to(b),
            });
        }
    }
    edges.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    edges
}

/// Tracks which rooms the spanning tree already reaches
#[derive(Debug, Clone)]
pub struct ConnectedSet {
    connected: Vec<bool>,
    count: usize,
}

impl ConnectedSet {
    /// Create a set for `num_rooms` rooms seeded with room 0
    pub fn new(num_rooms: usize) -> Self {
        let mut connected = vec![false; num_rooms];
        let count = match connected.first_mut() {
            Some(first) => {
                *first = true;
                1
            }
            None => 0,
        };
        Self { connected, count }
    }

    pub fn contains(&self, room: usize) -> bool {
        self.connected.get(room).copied().unwrap_or(false)
    }

    pub fn insert(&mut self, room: usize) {
        if let Some(slot) = self.connected.get_mut(room) {
            if !*slot {
                *slot = true;
                self.count += 1;
            }
        }
    }

    /// Check if an edge has exactly one endpoint in the set
    pub fn crosses(&self, edge: &Edge) -> bool {
        self.contains(edge.room_a) != self.contains(edge.room_b)
    }

    /// Number of rooms reached so far
    pub fn reached(&self) -> usize {
        self.count
    }

    /// Check if every room is reached
    pub fn is_complete(&self) -> bool {
        self.count == self.connected.len()
    }
}

/// Outcome of [`CorridorConnector::connect`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectReport {
    /// Edges carved, in carving order
    pub corridors: Vec<Edge>,
    /// False if the edge search ran dry before every room was reached
    pub fully_connected: bool,
}

/// Carves spanning-tree corridors into a grid
#[derive(Debug)]
pub struct CorridorConnector<'a> {
    grid: &'a mut Grid<Cell>,
}

impl<'a> CorridorConnector<'a> {
    pub fn new(grid: &'a mut Grid<Cell>) -> Self {
        Self { grid }
    }

    /// Connect all rooms, carving one corridor per spanning-tree edge
    pub fn connect(&mut self, rooms: &[Room]) -> ConnectReport {
        let edges = build_edges(rooms);
        let mut connected = ConnectedSet::new(rooms.len());
        let mut corridors = Vec::with_capacity(rooms.len().saturating_sub(1));

        while !connected.is_complete() {
            let Some(edge) = edges.iter().find(|e| connected.crosses(e)) else {
                warn!(
                    "corridor search stopped with {}/{} rooms connected",
                    connected.reached(),
                    rooms.len()
                );
                break;
            };

            carve_corridor(
                self.grid,
                rooms[edge.room_a].center(),
                rooms[edge.room_b].center(),
            );
            connected.insert(edge.room_a);
            connected.insert(edge.room_b);
            corridors.push(*edge);
        }

        debug!(
            "carved {} corridors between {} rooms",
            corridors.len(),
            rooms.len()
        );

        ConnectReport {
            corridors,
            fully_connected: connected.is_complete(),
        }
    }
}

/// Carve an L-shaped, two-cell-wide corridor from `from` to `to`
///
/// Walks rows first, then columns. Every visited cell after `from` is set to
/// floor together with its right-hand neighbour. Does nothing if either end
/// is off the map.
pub fn carve_corridor(grid: &mut Grid<Cell>, from: Pos, to: Pos) {
    if !grid.contains(from) || !grid.contains(to) {
        return;
    }

    let mut pos = from;
    while pos != to {
        if pos.row != to.row {
            pos.row = step_toward(pos.row, to.row);
        } else {
            pos.col = step_toward(pos.col, to.col);
        }

        grid.set_if_inside(pos, Cell::Floor);
        grid.set_if_inside(Pos::new(pos.row, pos.col + 1), Cell::Floor);
    }
}

fn step_toward(value: usize, target: usize) -> usize {
    if value < target { value + 1 } else { value - 1 }
}
