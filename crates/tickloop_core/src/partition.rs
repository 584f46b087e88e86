//! One-time classification of systems into fixed and variable groups
//!
//! Each group keeps its entries in registration order together with a
//! parallel enabled mask. A [`SystemHandle`] is the pair (group, position)
//! and addresses a mask slot directly. Handles carry the generation of the
//! classification that issued them and are rejected by any other one.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::{Step, System};

/// O(1) address of a classified system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SystemHandle {
    step: Step,
    index: usize,
    generation: u32,
}

impl SystemHandle {
    /// Group the system was classified into
    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Position within that group
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Classification this handle was issued by
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A classified system: where to find it in the host and what it is
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) host_index: usize,
    pub(crate) type_id: TypeId,
    /// Heap address of the boxed system, compared and never dereferenced
    addr: usize,
    pub(crate) name: String,
}

impl Entry {
    /// Whether `system` is the instance classified into this entry
    pub(crate) fn matches(&self, system: &(dyn System + 'static)) -> bool {
        system.type_id() == self.type_id && system_addr(system) == self.addr
    }
}

fn system_addr(system: &(dyn System + 'static)) -> usize {
    std::ptr::from_ref(system).cast::<()>() as usize
}

/// An ordered group of systems with its enabled mask
#[derive(Clone, Debug)]
pub struct Group {
    step: Step,
    entries: Vec<Entry>,
    enabled: Vec<bool>,
}

impl Group {
    fn new(step: Step) -> Self {
        Self {
            step,
            entries: Vec::new(),
            enabled: Vec::new(),
        }
    }

    fn push(&mut self, entry: Entry, generation: u32) -> SystemHandle {
        let handle = SystemHandle {
            step: self.step,
            index: self.entries.len(),
            generation,
        };
        self.entries.push(entry);
        self.enabled.push(true);
        handle
    }

    /// Which step this group runs at
    pub fn step(&self) -> Step {
        self.step
    }

    /// Number of systems in the group
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group has no systems
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// System names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Indices into the host's system list, in execution order
    pub fn host_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.host_index)
    }

    /// Enabled flags, index-aligned with the entries
    pub fn enabled_mask(&self) -> &[bool] {
        &self.enabled
    }

    /// Entries paired with their enabled flag
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Entry, bool)> {
        self.entries.iter().zip(self.enabled.iter().copied())
    }
}

/// The fixed and variable groups built from a host's system list
///
/// Built once; afterwards only the enabled masks change.
#[derive(Clone, Debug)]
pub struct Partitioning {
    fixed: Group,
    variable: Group,
    /// First handle registered for each concrete type
    by_type: HashMap<TypeId, SystemHandle>,
    generation: u32,
}

impl Partitioning {
    /// Split `systems` by their [`Step`], preserving relative order
    ///
    /// Every system starts enabled.
    pub fn classify(systems: &[Box<dyn System>]) -> Self {
        Self::classify_generation(systems, 0)
    }

    /// [`classify`](Partitioning::classify), stamping handles with `generation`
    pub fn classify_generation(systems: &[Box<dyn System>], generation: u32) -> Self {
        let mut fixed = Group::new(Step::Fixed);
        let mut variable = Group::new(Step::Variable);
        let mut by_type = HashMap::new();

        for (host_index, system) in systems.iter().enumerate() {
            let entry = Entry {
                host_index,
                type_id: (**system).type_id(),
                addr: system_addr(&**system),
                name: system.name().to_string(),
            };
            let type_id = entry.type_id;

            let handle = match system.step() {
                Step::Fixed => fixed.push(entry, generation),
                Step::Variable => variable.push(entry, generation),
            };
            by_type.entry(type_id).or_insert(handle);
        }

        log::debug!(
            "Classified {} systems (generation {}): {} fixed-step, {} variable-step",
            systems.len(),
            generation,
            fixed.len(),
            variable.len()
        );

        Self {
            fixed,
            variable,
            by_type,
            generation,
        }
    }

    /// The group for a step
    pub fn group(&self, step: Step) -> &Group {
        match step {
            Step::Fixed => &self.fixed,
            Step::Variable => &self.variable,
        }
    }

    fn group_mut(&mut self, step: Step) -> &mut Group {
        match step {
            Step::Fixed => &mut self.fixed,
            Step::Variable => &mut self.variable,
        }
    }

    /// Systems run once per tick
    pub fn fixed(&self) -> &Group {
        &self.fixed
    }

    /// Systems run once per frame
    pub fn variable(&self) -> &Group {
        &self.variable
    }

    /// Total number of classified systems
    pub fn len(&self) -> usize {
        self.fixed.len() + self.variable.len()
    }

    /// Whether no systems were classified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle of the first system with this concrete type
    pub fn handle_of(&self, type_id: TypeId) -> Option<SystemHandle> {
        self.by_type.get(&type_id).copied()
    }

    /// Generation stamped on this classification's handles
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether `handle` was issued by this classification
    pub fn owns(&self, handle: SystemHandle) -> bool {
        handle.generation == self.generation
    }

    /// Every handle, fixed group first, each in execution order
    pub fn handles(&self) -> impl Iterator<Item = SystemHandle> + '_ {
        let generation = self.generation;
        let fixed = (0..self.fixed.len()).map(move |index| SystemHandle {
            step: Step::Fixed,
            index,
            generation,
        });
        let variable = (0..self.variable.len()).map(move |index| SystemHandle {
            step: Step::Variable,
            index,
            generation,
        });
        fixed.chain(variable)
    }

    /// Name of the system behind a handle
    pub fn name(&self, handle: SystemHandle) -> Option<&str> {
        if !self.owns(handle) {
            return None;
        }
        self.group(handle.step)
            .entries
            .get(handle.index)
            .map(|e| e.name.as_str())
    }

    /// Enabled flag behind a handle
    ///
    /// `None` if the handle is out of range or from another generation.
    pub fn is_enabled(&self, handle: SystemHandle) -> Option<bool> {
        if !self.owns(handle) {
            return None;
        }
        self.group(handle.step).enabled.get(handle.index).copied()
    }

    /// Write the enabled flag behind a handle
    ///
    /// Returns `false` if the handle is out of range or from another
    /// generation.
    pub fn set_enabled(&mut self, handle: SystemHandle, enabled: bool) -> bool {
        if !self.owns(handle) {
            return false;
        }
        match self.group_mut(handle.step).enabled.get_mut(handle.index) {
            Some(slot) => {
                *slot = enabled;
                true
            }
            None => false,
        }
    }
}
