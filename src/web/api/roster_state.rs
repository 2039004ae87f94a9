use indexmap::IndexMap;

/// A roster managed by Rocket, along with what the endpoints need to know
/// around it: whether the first load happened yet, and the badge batch
/// imported from a file but not yet written to the records server.
#[derive(Default)]
pub struct RosterState<R> {
    roster: R,
    pending_batch: Option<IndexMap<u32, String>>,
    loaded: bool,
}

impl<R> RosterState<R> {
    pub fn roster(&self) -> &R {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut R {
        &mut self.roster
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn set_pending_batch(&mut self, batch: IndexMap<u32, String>) {
        self.pending_batch = Some(batch);
    }

    /// The batch is consumed whole: once a write-back starts, a stale batch
    /// must not survive it, whatever the outcome.
    pub fn take_pending_batch(&mut self) -> Option<IndexMap<u32, String>> {
        self.pending_batch.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_consume_pending_batch() {
        let mut state = RosterState::<()>::default();
        assert!(!state.loaded());

        state.mark_loaded();
        state.set_pending_batch(IndexMap::from([(11, "0102030405".to_owned())]));

        assert!(state.loaded());
        assert_eq!(
            Some(IndexMap::from([(11, "0102030405".to_owned())])),
            state.take_pending_batch()
        );
        assert_eq!(None, state.take_pending_batch());
    }
}
