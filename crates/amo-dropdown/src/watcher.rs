#![forbid(unsafe_code)]

//! Global listener registry and the dismissal watcher built on top of it.
//!
//! The host document is the only resource shared between dropdown
//! instances. Every open instance owns exactly one listener pair there (one
//! pointer listener, one key listener), held as a [`ListenerGuard`]. Dropping
//! the guard removes the pair, so closing, unmounting, and dropping an
//! instance mid-flight all release it.
//!
//! # Invariants
//!
//! 1. An instance has at most one listener pair attached at any time.
//! 2. [`Document::route`] only names instances with a live pair.
//! 3. A guard outliving its document is inert.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use amo_core::event::Event;
use amo_core::geometry::Rect;

/// Identifies one mounted dropdown within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropdown#{}", self.0)
    }
}

/// Which kind of global event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Pointer,
    Key,
}

impl ListenerKind {
    /// The listener kind an event is delivered to. Geometry events go to the
    /// pointer listener, which doubles as the resize/scroll observer.
    pub const fn for_event(event: &Event) -> Self {
        match event {
            Event::Key(_) => Self::Key,
            Event::Pointer(_) | Event::Resize { .. } | Event::Scroll | Event::Layout => {
                Self::Pointer
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: u64,
    owner: InstanceId,
    kind: ListenerKind,
}

#[derive(Debug, Default)]
struct Registry {
    next_instance: u64,
    next_listener: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    fn add(&mut self, owner: InstanceId, kind: ListenerKind) -> u64 {
        self.next_listener += 1;
        let id = self.next_listener;
        self.listeners.push(Listener { id, owner, kind });
        id
    }

    fn remove(&mut self, ids: &[u64]) {
        self.listeners.retain(|l| !ids.contains(&l.id));
    }
}

/// The host document's global listener table.
///
/// Cheap to clone; clones share one table.
#[derive(Debug, Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a newly mounted instance.
    pub fn register_instance(&self) -> InstanceId {
        let mut registry = self.registry.borrow_mut();
        registry.next_instance += 1;
        InstanceId(registry.next_instance)
    }

    /// Attach a pointer + key listener pair for `owner`.
    pub fn attach_pair(&self, owner: InstanceId) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let ids = [
            registry.add(owner, ListenerKind::Pointer),
            registry.add(owner, ListenerKind::Key),
        ];
        amo_core::trace!(instance = %owner, "listener pair attached");
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            owner,
            ids,
        }
    }

    /// Total number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Number of attached listeners of one kind.
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    /// Number of listeners attached on behalf of `owner`.
    pub fn listeners_for(&self, owner: InstanceId) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.owner == owner)
            .count()
    }

    /// Instances whose global listener would receive `event`, in attach order.
    pub fn route(&self, event: &Event) -> Vec<InstanceId> {
        let kind = ListenerKind::for_event(event);
        let registry = self.registry.borrow();
        let mut owners: Vec<InstanceId> = Vec::new();
        for listener in registry.listeners.iter().filter(|l| l.kind == kind) {
            if !owners.contains(&listener.owner) {
                owners.push(listener.owner);
            }
        }
        owners
    }
}

/// Ownership of one attached listener pair. Dropping it detaches the pair.
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    owner: InstanceId,
    ids: [u64; 2],
}

impl ListenerGuard {
    pub fn owner(&self) -> InstanceId {
        self.owner
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("owner", &self.owner)
            .field("ids", &self.ids)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(&self.ids);
            amo_core::trace!(instance = %self.owner, "listener pair detached");
        }
    }
}

/// Why the watcher wants the overlay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dismissal {
    /// Pointer press outside both trigger and panel.
    Outside,
    /// Escape pressed.
    Escape,
    /// Pointer press inside the panel with close-on-content-click enabled.
    ContentClick,
}

/// Watches global input while the overlay is open.
#[derive(Debug, Default)]
pub struct DismissalWatcher {
    guard: Option<ListenerGuard>,
}

impl DismissalWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the listener pair unless already attached.
    pub fn activate(&mut self, document: &Document, owner: InstanceId) {
        if self.guard.is_none() {
            self.guard = Some(document.attach_pair(owner));
        }
    }

    /// Detach the listener pair, if any.
    pub fn deactivate(&mut self) {
        self.guard = None;
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    /// Classify an event against the trigger and panel bounds.
    ///
    /// Presses on the trigger are never a dismissal: the trigger's own click
    /// handler toggles the overlay.
    pub fn inspect(
        &self,
        event: &Event,
        trigger: &Rect,
        panel: &Rect,
        close_on_content_click: bool,
    ) -> Option<Dismissal> {
        if !self.is_active() {
            return None;
        }
        match event {
            Event::Key(key) if key.is_escape() => Some(Dismissal::Escape),
            Event::Pointer(pointer) if pointer.is_press() => {
                let (x, y) = pointer.position();
                if trigger.contains(x, y) {
                    None
                } else if panel.contains(x, y) {
                    close_on_content_click.then_some(Dismissal::ContentClick)
                } else {
                    Some(Dismissal::Outside)
                }
            }
            _ => None,
        }
    }
}
