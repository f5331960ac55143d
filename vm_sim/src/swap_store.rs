/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::BTreeMap;

use crate::page::PageKey;

/// Placeholder secondary storage for evicted pages. Unbounded; no actual
/// page data is stored or moved.
#[derive(Debug, Default)]
pub(crate) struct SwapStore {
    entries: BTreeMap<PageKey, String>,
}

impl SwapStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a placeholder payload for `key`. Swapping the same key out
    /// twice overwrites the placeholder, it does not duplicate it.
    pub(crate) fn store(&mut self, key: PageKey) {
        let payload = format!("page {} of process {}", key.page, key.pid);
        self.entries.insert(key, payload);
    }

    /// Remove the entry for `key`, signaling a swap-in. Returns whether
    /// the key was present.
    pub(crate) fn retrieve(&mut self, key: &PageKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub(crate) fn contains(&self, key: &PageKey) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn entries(&self) -> &BTreeMap<PageKey, String> {
        &self.entries
    }
}

#[cfg(test)]
mod test {
    use super::SwapStore;
    use crate::page::PageKey;

    #[test]
    fn test_store_and_retrieve_round_trip() {
        let mut swap = SwapStore::new();
        let key = PageKey::new("editor", 3);

        swap.store(key.clone());
        assert!(swap.contains(&key));
        assert_eq!(swap.len(), 1);

        assert!(swap.retrieve(&key));
        assert!(!swap.contains(&key));
        assert_eq!(swap.len(), 0);

        // retrieving again is a no-op
        assert!(!swap.retrieve(&key));
    }

    #[test]
    fn test_payload_names_page_and_process() {
        let mut swap = SwapStore::new();
        let key = PageKey::new("editor", 3);
        swap.store(key.clone());

        let payload = swap.entries().get(&key).unwrap();
        assert!(payload.contains('3'));
        assert!(payload.contains("editor"));
    }
}
