//! The collection truck.

/// A single garbage truck with a fixed load capacity and a position on the
/// road network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truck {
    id: String,
    capacity: u32,
    load: u32,
    current_node: usize,
}

impl Truck {
    /// Create a truck. An initial load beyond `capacity` is clamped.
    pub fn new(id: impl Into<String>, capacity: u32, load: u32, start_node: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
            load: load.min(capacity),
            current_node: start_node,
        }
    }

    /// Relocate the truck to `node`. Travel cost accounting is the
    /// simulator's job; the truck only tracks where it is.
    pub fn move_to(&mut self, node: usize) {
        self.current_node = node;
    }

    /// Take `amount` units on board.
    ///
    /// An amount exceeding the remaining capacity is ignored outright;
    /// callers wanting partial pickups clamp before calling.
    pub fn collect(&mut self, amount: u32) {
        if amount > self.remaining_capacity() {
            return;
        }
        self.load += amount;
    }

    /// Empty the truck (at a disposal site).
    pub fn unload(&mut self) {
        self.load = 0;
    }

    /// Capacity still available.
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity - self.load
    }

    /// Whether no further waste fits.
    pub fn is_full(&self) -> bool {
        self.load >= self.capacity
    }

    /// Identifier string.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum load.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current load.
    pub fn load(&self) -> u32 {
        self.load
    }

    /// Node the truck currently occupies.
    pub fn current_node(&self) -> usize {
        self.current_node
    }
}
