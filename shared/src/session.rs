use rand::Rng;

use crate::active::{resolve_active_entries, ActiveEntry};
use crate::entry::{Entry, EntryStore, EntrySummary};
use crate::error::WheelResult;
use crate::layout::{compute_layout, Sector};
use crate::pointer::resolve_pointer;
use crate::settings::WheelSettings;
use crate::spin::{SpinAnimator, SpinFrame, SpinStart};
use crate::tags::TagFilterState;
use crate::wheel_data::{starter_entries, WheelData};

/// Everything one open wheel needs: entries, tag filter, settings and the
/// animator. Every entry mutation re-syncs the tag filter.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSession {
    entries: EntryStore,
    tags: TagFilterState,
    settings: WheelSettings,
    animator: SpinAnimator,
    last_winner: Option<ActiveEntry>,
}

impl Default for WheelSession {
    fn default() -> Self {
        Self::new(starter_entries(), WheelSettings::default())
    }
}

impl WheelSession {
    pub fn new(entries: Vec<Entry>, settings: WheelSettings) -> Self {
        let mut session = Self {
            entries: EntryStore::from_entries(entries),
            tags: TagFilterState::new(),
            settings,
            animator: SpinAnimator::new(),
            last_winner: None,
        };
        session.sync_tags();
        session
    }

    pub fn from_data(data: WheelData) -> Self {
        let mut session = Self {
            entries: EntryStore::from_entries(data.wheel_entries),
            tags: TagFilterState::from_parts(data.enabled_tags, data.known_tags),
            settings: data.settings,
            animator: SpinAnimator::new(),
            last_winner: None,
        };
        session.sync_tags();
        session
    }

    /// Restores a session from a stored document, falling back to the starter
    /// wheel when there is nothing usable.
    pub fn restore(stored: Option<&str>) -> Self {
        let data = match stored.map(WheelData::from_json) {
            Some(Ok(data)) => data,
            Some(Err(err)) => {
                log::warn!("discarding stored wheel: {}", err);
                return Self::default();
            }
            None => return Self::default(),
        };

        let mut session = Self::from_data(data);
        if session.entries.is_empty() {
            session.replace_entries(starter_entries());
        }
        session
    }

    /// Starts a new wheel: a single default entry, default settings, and any
    /// running spin dropped.
    pub fn reset(&mut self) {
        log::debug!("resetting wheel");
        *self = Self::from_data(WheelData::default());
    }

    pub fn to_data(&self) -> WheelData {
        WheelData {
            wheel_entries: self.entries.entries().to_vec(),
            enabled_tags: self.tags.enabled_tags().iter().cloned().collect(),
            known_tags: self.tags.known_tags().iter().cloned().collect(),
            settings: self.settings.clone(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.entries()
    }

    pub fn tags(&self) -> &TagFilterState {
        &self.tags
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn summary(&self) -> EntrySummary {
        self.entries.summary()
    }

    pub fn tag_universe(&self) -> Vec<String> {
        self.entries.tag_universe()
    }

    pub fn add_entry(&mut self, entry: Entry) -> usize {
        let index = self.entries.push(entry);
        self.sync_tags();
        index
    }

    pub fn insert_entry(&mut self, index: usize, entry: Entry) -> WheelResult<()> {
        self.entries.insert(index, entry)?;
        self.sync_tags();
        Ok(())
    }

    pub fn update_entry(&mut self, index: usize, entry: Entry) -> WheelResult<Entry> {
        let old = self.entries.update(index, entry)?;
        self.sync_tags();
        Ok(old)
    }

    pub fn remove_entry(&mut self, index: usize) -> WheelResult<Entry> {
        let removed = self.entries.remove(index)?;
        self.sync_tags();
        Ok(removed)
    }

    pub fn move_entry(&mut self, from: usize, to: usize) -> WheelResult<()> {
        self.entries.move_entry(from, to)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = EntryStore::from_entries(entries);
        self.sync_tags();
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.tags.toggle(tag)
    }

    pub fn active_entries(&self) -> Vec<ActiveEntry> {
        resolve_active_entries(self.entries.entries(), self.tags.enabled_tags())
    }

    /// Sectors to paint. While spinning this is the layout frozen at spin
    /// start, so the painted wheel matches the landing plan.
    pub fn layout(&self) -> Vec<Sector> {
        match self.animator.current() {
            Some(spin) => spin.sectors().to_vec(),
            None => compute_layout(&self.active_entries()),
        }
    }

    pub fn angle(&self) -> f64 {
        self.animator.angle()
    }

    pub fn is_spinning(&self) -> bool {
        self.animator.is_spinning()
    }

    /// Winner of the most recent completed spin. Its `index` refers to the
    /// entry list as it was when that spin started.
    pub fn last_winner(&self) -> Option<&ActiveEntry> {
        self.last_winner.as_ref()
    }

    pub fn spin<F>(&mut self, rng: F) -> WheelResult<SpinStart>
    where
        F: FnMut() -> f64,
    {
        let config = self.settings.spin_config();
        let started = self
            .animator
            .spin(self.entries.entries(), self.tags.enabled_tags(), config, rng)?;
        if let SpinStart::Started { .. } = started {
            self.last_winner = None;
        }
        Ok(started)
    }

    pub fn advance(&mut self, elapsed_ms: f64) -> Option<SpinFrame> {
        let frame = self.animator.advance(elapsed_ms)?;
        if let Some(winner) = &frame.winner {
            self.last_winner = Some(winner.clone());
        }
        Some(frame)
    }

    pub fn cancel_spin(&mut self) -> bool {
        self.animator.cancel()
    }

    /// The active entry under the pointer right now, or `None` when the
    /// wheel is empty.
    pub fn pointer_entry(&self) -> WheelResult<Option<ActiveEntry>> {
        let sectors = self.layout();
        if sectors.is_empty() {
            return Ok(None);
        }
        let sector = resolve_pointer(&sectors, self.animator.angle())?;
        Ok(Some(sector.entry.clone()))
    }

    fn sync_tags(&mut self) {
        self.tags.sync(self.entries.entries());
    }
}
