use core::marker::PhantomData;
use core::sync::atomic::{AtomicU8, Ordering};

/// Vibration patterns the actuator layer understands. The protocol core only
/// picks a pattern; rendering it is the host's problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VibrationPattern {
    /// Rapid pulses used while an incident is still cancellable.
    Fast,
    /// Long slow pulses used once an incident is confirmed or acknowledged.
    Slow,
    /// Continuous strong vibration used by the companion while escalating.
    Strong,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    Off,
    Alert,
}

/// Device states that can be published through a [`StateCell`].
pub trait StateRepr: Copy {
    fn as_u8(self) -> u8;
    /// Decodes a published value; out-of-range raws fall back to the zero
    /// (idle) state rather than failing.
    fn from_u8(raw: u8) -> Self;
}

/// Lock-free publication slot for the dispatcher's current state.
///
/// The dispatcher is the only writer; the flash ticker and the host UI read.
/// Starts at raw 0, which every `StateRepr` maps to its idle state.
pub struct StateCell<T: StateRepr> {
    raw: AtomicU8,
    _marker: PhantomData<fn() -> T>,
}

impl<T: StateRepr> StateCell<T> {
    pub const fn new() -> Self {
        Self {
            raw: AtomicU8::new(0),
            _marker: PhantomData,
        }
    }

    pub fn publish(&self, state: T) {
        self.raw.store(state.as_u8(), Ordering::Release);
    }

    pub fn read(&self) -> T {
        T::from_u8(self.raw.load(Ordering::Acquire))
    }
}

impl<T: StateRepr> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-capacity buffer of side effects produced by one engine dispatch.
///
/// Engines never perform I/O; they push actions here and the dispatcher
/// carries them out. Overflow is truncation, so `MAX` must cover the busiest
/// transition of the owning machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionBuffer<A: Copy, const MAX: usize> {
    len: usize,
    slots: [Option<A>; MAX],
}

impl<A: Copy, const MAX: usize> ActionBuffer<A, MAX> {
    pub fn new() -> Self {
        Self {
            len: 0,
            slots: [None; MAX],
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.slots = [None; MAX];
    }

    pub fn push(&mut self, action: A) {
        if self.len >= MAX {
            debug_assert!(false, "action buffer overflow");
            return;
        }
        self.slots[self.len] = Some(action);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }
}

impl<A: Copy + PartialEq, const MAX: usize> ActionBuffer<A, MAX> {
    pub fn contains(&self, action: A) -> bool {
        self.iter().any(|slot| *slot == action)
    }
}

impl<A: Copy, const MAX: usize> Default for ActionBuffer<A, MAX> {
    fn default() -> Self {
        Self::new()
    }
}
