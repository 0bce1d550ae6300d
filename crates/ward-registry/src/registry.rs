//! The process-wide registry mapping cells to their live lease bindings.

use std::sync::{Arc, Mutex};

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use ward_core::{CellId, Clock, LeaseId, SystemClock};

use crate::lease::Lease;

/// One lease's claim on one cell, with its absolute expiry in millis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Binding {
    pub(crate) lease: LeaseId,
    pub(crate) until: u64,
}

/// The bindings covering one cell. Most cells carry one or two leases, so
/// the list stores two entries inline before spilling to the heap.
type BindingList = SmallVec<[Binding; 2]>;

/// The single shared table: a cell is present iff its binding list is
/// non-empty. The reference count of a cell is the length of its list.
type CellTable = IndexMap<CellId, BindingList>;

struct RegistryInner {
    table: Mutex<CellTable>,
    clock: Arc<dyn Clock>,
}

/// Tracks which cells are currently protected and by whom.
///
/// A `GuardRegistry` is a cheap-to-clone handle over shared state: clone it
/// freely into the acquiring callers and the query callers. All mutation —
/// including the pruning step of [`is_protected`](Self::is_protected) —
/// happens under one internal mutex, so the table is never observed in a
/// half-updated state, and once a lease's [`close`](Lease::close) returns,
/// no later query anywhere can still see its bindings.
///
/// # Example
///
/// ```
/// use ward_core::{CellId, WorldId};
/// use ward_registry::GuardRegistry;
///
/// let registry = GuardRegistry::new();
/// let world = WorldId::new(1);
/// let cell = CellId::new(world, 0, 64, 0);
///
/// let mut lease = registry.acquire([cell], 30_000);
/// assert!(registry.is_protected(&cell));
///
/// lease.close();
/// assert!(!registry.is_protected(&cell));
/// ```
#[derive(Clone)]
pub struct GuardRegistry {
    inner: Arc<RegistryInner>,
}

// Compile-time assertion: the registry handle must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<GuardRegistry>();
};

impl Default for GuardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardRegistry {
    /// Create an empty registry backed by the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty registry reading time from the given clock.
    ///
    /// Tests inject a manually-advanced clock here so that expiry can be
    /// exercised without sleeping.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                table: Mutex::new(IndexMap::new()),
                clock,
            }),
        }
    }

    /// Acquire a new lease covering `cells` for `ttl_millis`.
    ///
    /// Every given cell gains one binding `(lease, now + ttl)` in a single
    /// critical section. Duplicate cells in the input collapse to one
    /// member. A TTL of zero yields a valid, already-expired lease; callers
    /// wanting effectively-unbounded protection pass a large TTL and
    /// [`renew`](Lease::renew). Never fails, including for an empty set.
    pub fn acquire<I>(&self, cells: I, ttl_millis: u64) -> Lease
    where
        I: IntoIterator<Item = CellId>,
    {
        let id = LeaseId::next();
        let until = self.now().saturating_add(ttl_millis);
        let members: IndexSet<CellId> = cells.into_iter().collect();
        {
            let mut table = self.inner.table.lock().unwrap();
            for cell in &members {
                // The id is fresh, so no existing binding can carry it.
                table
                    .entry(*cell)
                    .or_default()
                    .push(Binding { lease: id, until });
            }
        }
        Lease::open(self.clone(), id, members, until)
    }

    /// Whether `cell` is currently covered by at least one unexpired lease.
    ///
    /// Callable concurrently by any number of readers. As a side effect,
    /// prunes bindings whose expiry has passed — this is the only path by
    /// which abandoned (never-closed) leases are reclaimed, so a cell that
    /// is never queried after its last lease expires stays in the table
    /// until some future query visits it.
    pub fn is_protected(&self, cell: &CellId) -> bool {
        let now = self.now();
        let mut table = self.inner.table.lock().unwrap();
        let Some(bindings) = table.get_mut(cell) else {
            return false;
        };
        bindings.retain(|b| b.until >= now);
        if bindings.is_empty() {
            table.swap_remove(cell);
            return false;
        }
        true
    }

    /// Whether any of the given cells is protected.
    ///
    /// For multi-cell host events that are inherently all-or-nothing
    /// (piston motion): one protected cell vetoes the whole event.
    pub fn any_protected<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = CellId>,
    {
        cells.into_iter().any(|c| self.is_protected(&c))
    }

    /// Remove every protected cell from `cells`, keeping the rest.
    ///
    /// For multi-cell host events that degrade gracefully (explosions):
    /// the event proceeds against the surviving cells only.
    pub fn retain_unprotected(&self, cells: &mut Vec<CellId>) {
        cells.retain(|c| !self.is_protected(c));
    }

    /// The number of bindings currently recorded for `cell`, without any
    /// pruning side effect.
    ///
    /// Returns `None` if the cell is untracked. A live entry always has at
    /// least one binding; observing `Some(0)` would mean the table
    /// invariant is broken. Diagnostic — expired bindings still count until
    /// a query prunes them.
    pub fn binding_count(&self, cell: &CellId) -> Option<usize> {
        let table = self.inner.table.lock().unwrap();
        table.get(cell).map(|bindings| bindings.len())
    }

    /// The number of cells currently tracked (including cells whose only
    /// bindings have expired but have not been pruned yet).
    pub fn len(&self) -> usize {
        self.inner.table.lock().unwrap().len()
    }

    /// Whether no cells are tracked.
    pub fn is_empty(&self) -> bool {
        self.inner.table.lock().unwrap().is_empty()
    }

    /// Snapshot of every tracked cell, in no particular order.
    ///
    /// Diagnostic only: the snapshot is stale as soon as the lock drops.
    pub fn tracked_cells(&self) -> Vec<CellId> {
        let table = self.inner.table.lock().unwrap();
        table.keys().copied().collect()
    }

    pub(crate) fn now(&self) -> u64 {
        self.inner.clock.now_millis()
    }

    /// Record or refresh `lease`'s binding on `cell`.
    ///
    /// If the lease already holds a binding there, only its expiry moves;
    /// otherwise a new binding is appended. A binding that was pruned while
    /// the cell stayed in the lease's member set is recreated here.
    pub(crate) fn bind(&self, lease: LeaseId, cell: CellId, until: u64) {
        let mut table = self.inner.table.lock().unwrap();
        let bindings = table.entry(cell).or_default();
        match bindings.iter_mut().find(|b| b.lease == lease) {
            Some(b) => b.until = until,
            None => bindings.push(Binding { lease, until }),
        }
    }

    /// Drop `lease`'s binding on `cell`, removing the cell's table entry
    /// when its last binding goes.
    pub(crate) fn unbind(&self, lease: LeaseId, cell: &CellId) {
        let mut table = self.inner.table.lock().unwrap();
        remove_binding(&mut table, lease, cell);
    }

    /// Drop `lease`'s bindings on every given cell in one critical section.
    pub(crate) fn unbind_all<'a, I>(&self, lease: LeaseId, cells: I)
    where
        I: IntoIterator<Item = &'a CellId>,
    {
        let mut table = self.inner.table.lock().unwrap();
        for cell in cells {
            remove_binding(&mut table, lease, cell);
        }
    }

    /// Overwrite the expiry of `lease`'s binding on every given cell, in
    /// one critical section.
    ///
    /// Only bindings that still exist are touched: a binding already pruned
    /// by a query is not resurrected.
    pub(crate) fn rebind_all<'a, I>(&self, lease: LeaseId, cells: I, until: u64)
    where
        I: IntoIterator<Item = &'a CellId>,
    {
        let mut table = self.inner.table.lock().unwrap();
        for cell in cells {
            if let Some(bindings) = table.get_mut(cell) {
                if let Some(b) = bindings.iter_mut().find(|b| b.lease == lease) {
                    b.until = until;
                }
            }
        }
    }
}

/// Remove `lease`'s binding on `cell` from the table; delete the entry if
/// the binding list empties. Caller holds the table lock.
fn remove_binding(table: &mut CellTable, lease: LeaseId, cell: &CellId) {
    if let Some(bindings) = table.get_mut(cell) {
        bindings.retain(|b| b.lease != lease);
        if bindings.is_empty() {
            table.swap_remove(cell);
        }
    }
}
