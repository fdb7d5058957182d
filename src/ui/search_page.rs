//! State of the debounce search page.

use std::time::{Duration, Instant};

use crate::bites::debounce::Debounced;
use crate::bites::search::{
    filter_records, results_caption, EmptyQueryPolicy, SearchRecord, SEARCHING_GRACE_MS,
    SEARCH_DATA,
};
use crate::config::SearchConfig;

pub struct SearchPage {
    input: String,
    query: Debounced<String>,
    policy: EmptyQueryPolicy,
    searching_until: Option<Instant>,
    results: Vec<&'static SearchRecord>,
}

impl SearchPage {
    pub fn new(config: &SearchConfig) -> Self {
        let policy = config.empty_query;
        Self {
            input: String::new(),
            query: Debounced::new(String::new(), config.debounce()),
            policy,
            searching_until: None,
            results: filter_records("", SEARCH_DATA, policy),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, ch: char, now: Instant) {
        self.input.push(ch);
        self.input_changed(now);
    }

    /// Remove the last character. Returns false when the input was already empty.
    pub fn pop_char(&mut self, now: Instant) -> bool {
        if self.input.pop().is_none() {
            return false;
        }
        self.input_changed(now);
        true
    }

    pub fn clear(&mut self, now: Instant) {
        if self.input.is_empty() {
            return;
        }
        self.input.clear();
        self.input_changed(now);
    }

    fn input_changed(&mut self, now: Instant) {
        self.query.set(self.input.clone(), now);
        let grace = Duration::from_millis(SEARCHING_GRACE_MS);
        self.searching_until = Some(now + self.query.delay() + grace);
    }

    /// Advance timers. Returns true if anything visible changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(term) = self.query.poll(now) {
            self.results = filter_records(&term, SEARCH_DATA, self.policy);
            tracing::debug!(term = %term, count = self.results.len(), "search settled");
            changed = true;
        }
        if matches!(self.searching_until, Some(until) if now >= until) {
            self.searching_until = None;
            changed = true;
        }
        changed
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.query.deadline(), self.searching_until]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn is_searching(&self) -> bool {
        self.searching_until.is_some()
    }

    pub fn settled_term(&self) -> &str {
        self.query.settled()
    }

    pub fn results(&self) -> &[&'static SearchRecord] {
        &self.results
    }

    pub fn caption(&self) -> String {
        results_caption(&self.input, self.results.len())
    }

    /// Shown in place of the list when a non-blank search found nothing.
    pub fn empty_message(&self) -> Option<String> {
        if self.input.trim().is_empty() || !self.results.is_empty() || self.is_searching() {
            return None;
        }
        Some(format!("No results found for \"{}\"", self.input))
    }
}

impl Drop for SearchPage {
    fn drop(&mut self) {
        self.query.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn type_str(page: &mut SearchPage, text: &str, start: Instant, step: Duration) -> Instant {
        let mut now = start;
        for ch in text.chars() {
            page.push_char(ch, now);
            now += step;
        }
        now - step
    }

    #[test]
    fn results_follow_settled_query() {
        let start = Instant::now();
        let mut page = SearchPage::new(&SearchConfig::default());
        let last = type_str(&mut page, "rea", start, ms(50));

        assert!(!page.poll(last + ms(299)));
        assert!(page.results().is_empty());
        assert!(page.is_searching());

        assert!(page.poll(last + ms(300)));
        assert_eq!(page.settled_term(), "rea");
        let names: Vec<_> = page.results().iter().map(|r| r.name).collect();
        assert_eq!(names, ["React"]);
        assert!(page.is_searching());

        assert!(page.poll(last + ms(400)));
        assert!(!page.is_searching());
        assert_eq!(page.caption(), "Found 1 result");
    }

    #[test]
    fn deadline_tracks_debounce_then_grace() {
        let start = Instant::now();
        let mut page = SearchPage::new(&SearchConfig::default());
        assert_eq!(page.next_deadline(), None);

        page.push_char('v', start);
        assert_eq!(page.next_deadline(), Some(start + ms(300)));
        page.poll(start + ms(300));
        assert_eq!(page.next_deadline(), Some(start + ms(400)));
        page.poll(start + ms(400));
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn empty_state_uses_raw_input() {
        let start = Instant::now();
        let mut page = SearchPage::new(&SearchConfig::default());
        page.push_char('z', start);
        page.push_char('q', start);
        page.poll(start + ms(400));
        assert_eq!(page.empty_message().as_deref(), Some("No results found for \"zq\""));
        assert_eq!(page.caption(), "Found 0 results");
    }

    #[test]
    fn backspace_on_empty_input_reports_nothing_removed() {
        let mut page = SearchPage::new(&SearchConfig::default());
        assert!(!page.pop_char(Instant::now()));
        assert_eq!(page.caption(), "Start typing to search");
    }

    #[test]
    fn show_all_policy_lists_everything_up_front() {
        let config = SearchConfig {
            empty_query: EmptyQueryPolicy::ShowAll,
            ..SearchConfig::default()
        };
        let page = SearchPage::new(&config);
        assert_eq!(page.results().len(), SEARCH_DATA.len());
    }
}
