use crate::session::CloseTicket;

/// Pending close tickets with the time each one becomes due.
///
/// Tickets are redeemed in due order. Several can be pending at once when
/// the user cancels, re-opens and cancels again quickly; the session itself
/// decides which of them are stale.
#[derive(Debug, Default)]
pub struct CloseSchedule {
    pending: Vec<(u64, CloseTicket)>,
}

impl CloseSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, ticket: CloseTicket, now_ms: u64, delay_ms: u64) {
        self.pending.push((now_ms.saturating_add(delay_ms), ticket));
        self.pending.sort_by_key(|(due, _)| *due);
    }

    /// Remove and return every ticket due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<CloseTicket> {
        let split = self.pending.iter().take_while(|(due, _)| *due <= now_ms).count();
        self.pending.drain(..split).map(|(_, ticket)| ticket).collect()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|(due, _)| *due)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EditSession;
    use crate::store::GridStore;

    #[test]
    fn tickets_fire_only_after_delay() {
        let mut grid = GridStore::new();
        grid.set_dimensions(1, 1);
        let mut session = EditSession::new();
        session.open(&grid, 0);

        let mut schedule = CloseSchedule::new();
        schedule.schedule(session.cancel().unwrap(), 1_000, 300);
        assert_eq!(schedule.next_due(), Some(1_300));
        assert!(schedule.take_due(1_299).is_empty());

        let due = schedule.take_due(1_300);
        assert_eq!(due.len(), 1);
        assert!(session.finish_close(due[0]));
        assert!(schedule.is_empty());
    }

    #[test]
    fn stale_ticket_fires_but_does_not_close_new_session() {
        let mut grid = GridStore::new();
        grid.set_dimensions(1, 2);
        let mut session = EditSession::new();
        let mut schedule = CloseSchedule::new();

        session.open(&grid, 0);
        schedule.schedule(session.cancel().unwrap(), 0, 300);
        session.open(&grid, 1);
        schedule.schedule(session.cancel().unwrap(), 100, 300);

        let first = schedule.take_due(300);
        assert_eq!(first.len(), 1);
        assert!(!session.finish_close(first[0]));
        assert!(session.is_closing());

        let second = schedule.take_due(400);
        assert!(session.finish_close(second[0]));
        assert!(!session.is_visible());
    }

    #[test]
    fn due_order_is_earliest_first() {
        let mut schedule = CloseSchedule::new();
        let grid = {
            let mut g = GridStore::new();
            g.set_dimensions(1, 1);
            g
        };
        let mut session = EditSession::new();
        session.open(&grid, 0);
        let late = session.cancel().unwrap();
        session.open(&grid, 0);
        let early = session.cancel().unwrap();

        schedule.schedule(late, 500, 300);
        schedule.schedule(early, 0, 300);
        assert_eq!(schedule.take_due(10_000), vec![early, late]);
    }
}
