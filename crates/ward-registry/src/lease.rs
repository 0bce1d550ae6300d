//! The caller-owned lease handle.

use indexmap::IndexSet;

use ward_core::{CellId, LeaseError, LeaseId};

use crate::registry::GuardRegistry;

/// A time-bounded protection claim over a set of cells.
///
/// The acquiring caller exclusively owns the handle; the registry records
/// only the lease's [`LeaseId`] inside its bindings, never a reference back
/// to the handle. Membership grows via [`add`](Self::add) and shrinks via
/// [`remove`](Self::remove); [`renew`](Self::renew) pushes every member's
/// expiry forward in bulk.
///
/// Closing is the terminal state: [`close`](Self::close) is idempotent,
/// removes every binding this lease holds, and every later mutating call
/// returns [`LeaseError::Closed`]. Dropping the handle closes it, so a
/// lease is released on every exit path even when the caller forgets to
/// close — though a lease that merely *expires* without being closed keeps
/// its table entries until a query prunes them.
pub struct Lease {
    registry: GuardRegistry,
    id: LeaseId,
    members: IndexSet<CellId>,
    /// Expiry hint: the absolute expiry most recently applied via acquire,
    /// an explicit-TTL add, or renew. Default for TTL-less adds.
    until: u64,
    closed: bool,
}

// Compile-time assertion: a lease handle can move between threads.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<Lease>();
};

impl Lease {
    pub(crate) fn open(
        registry: GuardRegistry,
        id: LeaseId,
        members: IndexSet<CellId>,
        until: u64,
    ) -> Self {
        Self {
            registry,
            id,
            members,
            until,
            closed: false,
        }
    }

    /// This lease's process-unique identifier.
    pub fn id(&self) -> LeaseId {
        self.id
    }

    /// Whether the lease has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether `cell` is currently a member of this lease.
    pub fn contains(&self, cell: &CellId) -> bool {
        self.members.contains(cell)
    }

    /// The number of cells this lease covers.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The current expiry hint, in absolute milliseconds.
    pub fn expires_at_millis(&self) -> u64 {
        self.until
    }

    /// Add `cell` to this lease, binding it at the current expiry hint.
    ///
    /// Returns `Ok(true)` if the cell was newly added, `Ok(false)` if it
    /// was already a member — in which case only its expiry binding is
    /// refreshed, with no change to the cell's reference count.
    ///
    /// # Errors
    ///
    /// [`LeaseError::Closed`] if the lease has been closed.
    pub fn add(&mut self, cell: CellId) -> Result<bool, LeaseError> {
        self.add_with_ttl(cell, 0)
    }

    /// Add `cell` to this lease with its own TTL.
    ///
    /// A nonzero `ttl_millis` binds the cell at `now + ttl` and replaces
    /// the lease's expiry hint, so later TTL-less adds inherit it. A zero
    /// TTL behaves exactly like [`add`](Self::add). Return value as for
    /// `add`.
    ///
    /// # Errors
    ///
    /// [`LeaseError::Closed`] if the lease has been closed.
    pub fn add_with_ttl(&mut self, cell: CellId, ttl_millis: u64) -> Result<bool, LeaseError> {
        if self.closed {
            return Err(LeaseError::Closed);
        }
        let until = if ttl_millis == 0 {
            self.until
        } else {
            self.registry.now().saturating_add(ttl_millis)
        };
        self.until = until;
        let added = self.members.insert(cell);
        self.registry.bind(self.id, cell, until);
        Ok(added)
    }

    /// Remove `cell` from this lease, dropping its binding.
    ///
    /// Returns `Ok(true)` iff the cell was a member. The cell's table entry
    /// disappears entirely when this was its last binding.
    ///
    /// # Errors
    ///
    /// [`LeaseError::Closed`] if the lease has been closed.
    pub fn remove(&mut self, cell: &CellId) -> Result<bool, LeaseError> {
        if self.closed {
            return Err(LeaseError::Closed);
        }
        if !self.members.swap_remove(cell) {
            return Ok(false);
        }
        self.registry.unbind(self.id, cell);
        Ok(true)
    }

    /// Push every member's expiry to `now + extra_millis`.
    ///
    /// A bulk replace, not additive accumulation: each binding's expiry is
    /// overwritten with the new value regardless of what it held. Bindings
    /// already pruned by a query are not resurrected. Also updates the
    /// expiry hint.
    ///
    /// # Errors
    ///
    /// [`LeaseError::Closed`] if the lease has been closed.
    pub fn renew(&mut self, extra_millis: u64) -> Result<(), LeaseError> {
        if self.closed {
            return Err(LeaseError::Closed);
        }
        let until = self.registry.now().saturating_add(extra_millis);
        self.until = until;
        self.registry.rebind_all(self.id, &self.members, until);
        Ok(())
    }

    /// Close the lease, removing every binding it holds.
    ///
    /// Idempotent: a second call is a no-op. After closing, all mutating
    /// operations fail with [`LeaseError::Closed`]. Also runs on drop.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.registry.unbind_all(self.id, &self.members);
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.close();
    }
}
