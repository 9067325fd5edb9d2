use nix::unistd::Pid;
use smsh_types::ShellError;
use tracing::debug;

/// Hard ceiling on concurrently tracked children.
pub const JOB_TABLE_CAPACITY: usize = 1000;

/// Bounded registry of every child this shell has spawned and not yet reaped.
///
/// Slots are scanned linearly and filled first-free, not in launch order.
/// Capacity is fixed at construction; running out is a refusal to launch, not
/// a silent growth. A pid is present at most once.
#[derive(Debug)]
pub struct JobTable {
    slots: Vec<Option<Pid>>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::with_capacity(JOB_TABLE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        JobTable {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.slots.contains(&Some(pid))
    }

    /// Track a freshly spawned child. Returns the slot index, or `TableFull`
    /// when every slot is taken. Inserting a pid that is already tracked
    /// returns its existing slot; the table never holds the same pid twice.
    pub fn insert(&mut self, pid: Pid) -> Result<usize, ShellError> {
        if let Some(slot) = self.slots.iter().position(|s| *s == Some(pid)) {
            debug!("pid {} already tracked in slot {}", pid, slot);
            return Ok(slot);
        }
        match self.slots.iter().position(|s| s.is_none()) {
            Some(slot) => {
                self.slots[slot] = Some(pid);
                debug!("tracking pid {} in slot {}", pid, slot);
                Ok(slot)
            }
            None => Err(ShellError::TableFull {
                capacity: self.slots.len(),
            }),
        }
    }

    /// Stop tracking a reaped child. Removing an absent pid is a no-op:
    /// whichever of the foreground waiter, the reaper, or exit cleanup
    /// observes a termination first wins.
    pub fn remove(&mut self, pid: Pid) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(pid) {
                debug!("untracking pid {}", pid);
                *slot = None;
                return;
            }
        }
        debug!("remove: pid {} not tracked", pid);
    }

    /// Every pid still outstanding, for exit cleanup.
    pub fn pids(&self) -> Vec<Pid> {
        self.slots.iter().flatten().copied().collect()
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[test]
    fn insert_uses_first_free_slot() {
        init();
        let mut table = JobTable::with_capacity(3);
        assert_eq!(table.insert(Pid::from_raw(10)).unwrap(), 0);
        assert_eq!(table.insert(Pid::from_raw(11)).unwrap(), 1);
        table.remove(Pid::from_raw(10));
        assert_eq!(table.insert(Pid::from_raw(12)).unwrap(), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_refuses_when_full() {
        init();
        let mut table = JobTable::with_capacity(2);
        table.insert(Pid::from_raw(1)).unwrap();
        table.insert(Pid::from_raw(2)).unwrap();
        assert!(table.is_full());

        let err = table.insert(Pid::from_raw(3)).unwrap_err();
        assert!(matches!(err, ShellError::TableFull { capacity: 2 }));
        assert!(!table.contains(Pid::from_raw(3)));
    }

    #[test]
    fn insert_never_duplicates_a_pid() {
        init();
        let mut table = JobTable::with_capacity(4);
        let slot = table.insert(Pid::from_raw(42)).unwrap();
        assert_eq!(table.insert(Pid::from_raw(42)).unwrap(), slot);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        init();
        let mut table = JobTable::with_capacity(4);
        table.insert(Pid::from_raw(7)).unwrap();
        table.insert(Pid::from_raw(8)).unwrap();

        table.remove(Pid::from_raw(7));
        let after_first = table.pids();
        table.remove(Pid::from_raw(7));
        assert_eq!(table.pids(), after_first);
        assert!(table.contains(Pid::from_raw(8)));
    }

    #[test]
    fn pids_lists_outstanding_jobs() {
        init();
        let mut table = JobTable::with_capacity(4);
        assert!(table.is_empty());
        table.insert(Pid::from_raw(100)).unwrap();
        table.insert(Pid::from_raw(200)).unwrap();
        assert_eq!(table.pids(), vec![Pid::from_raw(100), Pid::from_raw(200)]);
    }
}
