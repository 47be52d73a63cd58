//! Board State
//!
//! Five ordered lanes of tasks plus the local id allocator.
//! Every task id lives in exactly one lane; the lane set is fixed by
//! [`ContainerKey`], so an empty lane still exists.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rand::Rng;

use crate::models::{ContainerKey, TaskId, TaskItem, TaskRecord};

/// Alphabet of locally generated ids (lowercase base-36)
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of locally generated ids. Container literals are ten
/// characters long, so a local id can never be mistaken for one.
const ID_LEN: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    lanes: [Vec<TaskItem>; 5],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of one lane, in display order
    pub fn lane(&self, key: ContainerKey) -> &[TaskItem] {
        &self.lanes[key.index()]
    }

    /// All lanes in board order
    pub fn iter(&self) -> impl Iterator<Item = (ContainerKey, &[TaskItem])> {
        ContainerKey::ALL.into_iter().map(move |key| (key, self.lane(key)))
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }

    /// Every task id currently on the board
    pub fn ids(&self) -> HashSet<&str> {
        self.lanes
            .iter()
            .flatten()
            .map(|item| item.id.as_str())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&TaskItem> {
        self.lanes.iter().flatten().find(|item| item.id == id)
    }

    /// Resolve a drag identifier to the lane that owns it.
    ///
    /// A container literal resolves to itself, a task id to the lane
    /// holding it. `None` is an ordinary outcome (e.g. hovering empty space).
    pub fn locate(&self, id: &str) -> Option<ContainerKey> {
        if let Some(key) = ContainerKey::parse(id) {
            return Some(key);
        }
        ContainerKey::ALL
            .into_iter()
            .find(|key| self.lane(*key).iter().any(|item| item.id == id))
    }

    /// Index of a task within a lane
    pub(crate) fn position(&self, key: ContainerKey, id: &str) -> Option<usize> {
        self.lane(key).iter().position(|item| item.id == id)
    }

    /// Remove a task from a lane, keeping the order of the rest
    pub(crate) fn take(&mut self, key: ContainerKey, id: &str) -> Option<TaskItem> {
        let index = self.position(key, id)?;
        Some(self.lanes[key.index()].remove(index))
    }

    /// Insert at `index`, clamped to the end of the lane
    pub(crate) fn insert(&mut self, key: ContainerKey, index: usize, item: TaskItem) {
        let lane = &mut self.lanes[key.index()];
        let index = index.min(lane.len());
        lane.insert(index, item);
    }

    pub(crate) fn push(&mut self, key: ContainerKey, item: TaskItem) {
        self.lanes[key.index()].push(item);
    }

    /// Move a task inside one lane from `from` to `to` (list move, not swap)
    pub(crate) fn move_within(&mut self, key: ContainerKey, from: usize, to: usize) {
        let lane = &mut self.lanes[key.index()];
        if from >= lane.len() || from == to {
            return;
        }
        let item = lane.remove(from);
        let to = to.min(lane.len());
        lane.insert(to, item);
    }

    /// Create a task in the unassigned lane, dated today (UTC).
    ///
    /// Returns `None` without touching the board when `name` or `note`
    /// is empty.
    pub fn create_task(&mut self, name: &str, note: &str) -> Option<TaskId> {
        let today = Utc::now().date_naive();
        self.create_task_with(name, note, today, &mut rand::thread_rng())
    }

    pub fn create_task_with<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        note: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<TaskId> {
        if name.is_empty() || note.is_empty() {
            return None;
        }
        let id = allocate_id(&self.ids(), rng);
        log::debug!("[BOARD] created task {} in {}", id, ContainerKey::Unassigned);
        self.push(
            ContainerKey::Unassigned,
            TaskItem {
                id: id.clone(),
                name: name.to_string(),
                date: today.format("%Y-%m-%d").to_string(),
                note: note.to_string(),
            },
        );
        Some(id)
    }

    /// Remove a task wherever it lives. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: &str) -> Option<TaskItem> {
        let key = self.locate(id)?;
        self.take(key, id)
    }

    /// Append remote records to the lanes they name.
    ///
    /// Records naming an unknown lane land in the unassigned lane; records
    /// whose id is already on the board are skipped. Returns the number of
    /// tasks added.
    pub fn hydrate(&mut self, records: Vec<TaskRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.get(&record.id).is_some() {
                log::warn!("[BOARD] skipping duplicate task id {}", record.id);
                continue;
            }
            let key = ContainerKey::parse(&record.container).unwrap_or_else(|| {
                log::warn!(
                    "[BOARD] task {} names unknown container {:?}, placing it in {}",
                    record.id,
                    record.container,
                    ContainerKey::Unassigned
                );
                ContainerKey::Unassigned
            });
            self.push(key, TaskItem::from(record));
            added += 1;
        }
        added
    }
}

/// Generate an id not present in `taken`.
///
/// Ids are 9 random base-36 characters (36^9, about 1e14 values). Retries
/// are unbounded; at board scale a second draw is already vanishingly rare.
pub fn allocate_id<R: Rng + ?Sized>(taken: &HashSet<&str>, rng: &mut R) -> TaskId {
    loop {
        let candidate: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}
