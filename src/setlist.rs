#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::{Subdivision, TimeSignature};
use crate::synth::SoundType;

/// A saved song: everything needed to recall its tempo and feel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetlistEntry {
    pub name: String,
    pub bpm: u16,
    pub time_signature: TimeSignature,
    pub subdivision: Subdivision,
    pub sound_type: SoundType,
    pub accent_first_beat: bool,
}

/// Ordered list of saved songs plus the one last recalled.
#[derive(Debug, Clone, Default)]
pub struct Setlist {
    entries: Vec<SetlistEntry>,
    current: Option<usize>,
}

impl Setlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used when the user saves without typing one
    pub fn default_name(&self) -> String {
        format!("Song {}", self.entries.len() + 1)
    }

    /// Append an entry; a blank name is replaced with [`Setlist::default_name`].
    /// Returns the new entry's index.
    pub fn push(&mut self, mut entry: SetlistEntry) -> usize {
        let name = entry.name.trim().to_string();
        entry.name = if name.is_empty() {
            self.default_name()
        } else {
            name
        };
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Mark `index` as the current song and return it
    pub fn select(&mut self, index: usize) -> Option<&SetlistEntry> {
        let entry = self.entries.get(index)?;
        self.current = Some(index);
        Some(entry)
    }

    /// Remove an entry, keeping `current` pointing at the same song
    pub fn remove(&mut self, index: usize) -> Option<SetlistEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    pub fn entries(&self) -> &[SetlistEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SetlistEntry> {
        self.entries.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&SetlistEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str, bpm: u16) -> SetlistEntry {
        SetlistEntry {
            name: name.to_string(),
            bpm,
            time_signature: TimeSignature::FOUR_FOUR,
            subdivision: Subdivision::QUARTER,
            sound_type: SoundType::Click,
            accent_first_beat: true,
        }
    }

    #[test]
    fn blank_names_get_numbered() {
        let mut list = Setlist::new();
        list.push(song("  ", 100));
        list.push(song("Ballad ", 72));
        list.push(song("", 140));

        let names: Vec<_> = list.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Song 1", "Ballad", "Song 3"]);
    }

    #[test]
    fn remove_tracks_current() {
        let mut list = Setlist::new();
        for bpm in [90, 100, 110, 120] {
            list.push(song("", bpm));
        }

        list.select(2);
        list.remove(0);
        assert_eq!(list.current().map(|e| e.bpm), Some(110));

        list.remove(2);
        assert_eq!(list.current_index(), Some(1));

        list.remove(1);
        assert_eq!(list.current_index(), None);
    }

    #[test]
    fn select_out_of_range_keeps_current() {
        let mut list = Setlist::new();
        list.push(song("a", 90));
        list.select(0);
        assert!(list.select(5).is_none());
        assert_eq!(list.current_index(), Some(0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut list = Setlist::new();
        list.push(song("a", 90));
        list.select(0);
        list.clear();
        assert!(list.is_empty());
        assert!(list.current().is_none());
    }
}
