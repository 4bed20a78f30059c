use chrono::NaiveDate;
use runlog_core::{
    DateRange, GroupId, UserId, WorkoutEntry, YearMonth, format_date, parse_date,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::persist::JsonFile;

pub type UserWorkouts = BTreeMap<NaiveDate, WorkoutEntry>;
pub type GroupWorkouts = BTreeMap<UserId, UserWorkouts>;
/// Total kilometres per user, formatted with two decimals.
pub type DistanceTotals = BTreeMap<UserId, String>;

/// Composite key. Field order gives group-then-user-then-date ordering, so a
/// group or a user is a contiguous range of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct EntryKey {
    group_id: GroupId,
    user_id: UserId,
    date: NaiveDate,
}

impl EntryKey {
    const fn new(group_id: GroupId, user_id: UserId, date: NaiveDate) -> Self {
        Self {
            group_id,
            user_id,
            date,
        }
    }

    const fn group_range(group_id: GroupId) -> RangeInclusive<Self> {
        Self::new(group_id, UserId::MIN, NaiveDate::MIN)
            ..=Self::new(group_id, UserId::MAX, NaiveDate::MAX)
    }

    const fn user_range(group_id: GroupId, user_id: UserId) -> RangeInclusive<Self> {
        Self::new(group_id, user_id, NaiveDate::MIN)..=Self::new(group_id, user_id, NaiveDate::MAX)
    }
}

type Entries = BTreeMap<EntryKey, WorkoutEntry>;

/// On-disk layout: `{"workouts": {group: {user: {date: entry}}}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WorkoutDocument {
    #[serde(default)]
    workouts: BTreeMap<GroupId, BTreeMap<UserId, BTreeMap<String, WorkoutEntry>>>,
}

impl WorkoutDocument {
    /// Nested maps are built from existing entries only, so no empty group or
    /// user level can reach the file.
    fn from_entries(entries: &Entries) -> Self {
        let mut workouts: BTreeMap<GroupId, BTreeMap<UserId, BTreeMap<String, WorkoutEntry>>> =
            BTreeMap::new();
        for (key, entry) in entries {
            workouts
                .entry(key.group_id)
                .or_default()
                .entry(key.user_id)
                .or_default()
                .insert(format_date(key.date), entry.clone());
        }
        Self { workouts }
    }

    fn into_entries(self, path: &Path) -> Result<Entries> {
        let mut entries = Entries::new();
        for (group_id, users) in self.workouts {
            for (user_id, dates) in users {
                for (key, entry) in dates {
                    let date = parse_date(&key).map_err(|_| StoreError::InvalidDate {
                        path: path.to_path_buf(),
                        key: key.clone(),
                    })?;
                    entries.insert(EntryKey::new(group_id, user_id, date), entry);
                }
            }
        }
        Ok(entries)
    }
}

/// Workout records keyed by (group, user, date), mirrored to one JSON file.
pub struct WorkoutStore {
    file: JsonFile,
    entries: Mutex<Entries>,
}

impl WorkoutStore {
    /// Open the store at `path`, creating an empty document if it is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = JsonFile::new(path.into());
        let document: WorkoutDocument = file.load_or_create()?;
        let entries = document.into_entries(file.path())?;
        info!(
            "Loaded {} workout entries from {}",
            entries.len(),
            file.path().display()
        );
        Ok(Self {
            file,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        debug!("Acquiring workout store lock");
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        self.file.save(&WorkoutDocument::from_entries(entries))?;
        Ok(())
    }

    /// Store `entry`, replacing whatever was recorded for the same key.
    ///
    /// Returns `Ok(false)` without touching the store when the distance or
    /// pace is empty. If the write fails the previous state is restored.
    pub fn insert(
        &self,
        group_id: GroupId,
        user_id: UserId,
        date: NaiveDate,
        entry: WorkoutEntry,
    ) -> Result<bool> {
        if !entry.is_complete() {
            warn!("Invalid workout details: {entry:?}, no insertion performed");
            return Ok(false);
        }

        let key = EntryKey::new(group_id, user_id, date);
        let mut entries = self.lock();
        let previous = entries.insert(key, entry);

        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key, old),
                None => entries.remove(&key),
            };
            return Err(e);
        }

        info!("Workout entry inserted for user {user_id} in group {group_id} on {date}");
        Ok(true)
    }

    /// All entries of one user in a group.
    ///
    /// Fails only when the group has no records at all; a known group with
    /// nothing for this user yields an empty map.
    pub fn get(&self, group_id: GroupId, user_id: UserId) -> Result<UserWorkouts> {
        let entries = self.lock();
        if entries.range(EntryKey::group_range(group_id)).next().is_none() {
            warn!("No workouts found for group: {group_id}");
            return Err(StoreError::GroupNotFound(group_id));
        }

        Ok(entries
            .range(EntryKey::user_range(group_id, user_id))
            .map(|(key, entry)| (key.date, entry.clone()))
            .collect())
    }

    pub fn get_all(&self, group_id: GroupId) -> Result<GroupWorkouts> {
        let entries = self.lock();
        let mut grouped = GroupWorkouts::new();
        for (key, entry) in entries.range(EntryKey::group_range(group_id)) {
            grouped
                .entry(key.user_id)
                .or_default()
                .insert(key.date, entry.clone());
        }

        if grouped.is_empty() {
            warn!("No workouts found for group: {group_id}");
            return Err(StoreError::GroupNotFound(group_id));
        }
        Ok(grouped)
    }

    /// Remove one entry. A missing key is not an error and writes nothing.
    pub fn delete(&self, group_id: GroupId, user_id: UserId, date: NaiveDate) -> Result<bool> {
        let key = EntryKey::new(group_id, user_id, date);
        let mut entries = self.lock();
        let Some(removed) = entries.remove(&key) else {
            debug!("No workout entry for user {user_id} in group {group_id} on {date}");
            return Ok(false);
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key, removed);
            return Err(e);
        }

        info!("Deleted workout entry for user {user_id} in group {group_id} on {date}");
        Ok(true)
    }

    /// Total distance per user for dates inside `range` (inclusive).
    pub fn aggregate_by_range(&self, group_id: GroupId, range: DateRange) -> Result<DistanceTotals> {
        self.aggregate(group_id, |date| range.contains(date))
    }

    /// Total distance per user for dates inside `month`.
    pub fn aggregate_by_month(&self, group_id: GroupId, month: YearMonth) -> Result<DistanceTotals> {
        self.aggregate(group_id, |date| month.contains(date))
    }

    /// Every user with any record in the group appears in the result, with
    /// `0.00` if none of their dates match.
    fn aggregate(
        &self,
        group_id: GroupId,
        include: impl Fn(NaiveDate) -> bool,
    ) -> Result<DistanceTotals> {
        let entries = self.lock();
        let mut sums: BTreeMap<UserId, f64> = BTreeMap::new();

        for (key, entry) in entries.range(EntryKey::group_range(group_id)) {
            let sum = sums.entry(key.user_id).or_insert(0.0);
            if !include(key.date) {
                continue;
            }
            let km = entry
                .distance_km()
                .map_err(|source| StoreError::InvalidDistance {
                    user_id: key.user_id,
                    date: key.date,
                    distance: entry.distance.clone(),
                    source,
                })?;
            debug!("Adding distance {km} for user {} on {}", key.user_id, key.date);
            *sum += km;
        }

        if sums.is_empty() {
            warn!("No workouts found for group: {group_id}");
            return Err(StoreError::GroupNotFound(group_id));
        }

        Ok(sums
            .into_iter()
            .map(|(user_id, km)| (user_id, format!("{km:.2}")))
            .collect())
    }
}
