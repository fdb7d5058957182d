//! Static dataset and case-insensitive filter for the debounce search page.

use serde::{Deserialize, Serialize};

/// Delay between the last keystroke and the search actually running.
pub const DEBOUNCE_DELAY_MS: u64 = 300;

/// Extra time the "searching" spinner stays up after the debounce delay.
pub const SEARCHING_GRACE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
}

const fn record(id: u32, name: &'static str, category: &'static str) -> SearchRecord {
    SearchRecord { id, name, category }
}

pub static SEARCH_DATA: &[SearchRecord] = &[
    record(1, "React", "Framework"),
    record(2, "Vue", "Framework"),
    record(3, "Svelte", "Framework"),
    record(4, "Angular", "Framework"),
    record(5, "TypeScript", "Language"),
    record(6, "JavaScript", "Language"),
    record(7, "Rust", "Language"),
    record(8, "Tailwind CSS", "Styling"),
    record(9, "Sass", "Styling"),
    record(10, "Styled Components", "Styling"),
    record(11, "Vite", "Build Tool"),
    record(12, "Webpack", "Build Tool"),
    record(13, "esbuild", "Build Tool"),
    record(14, "Jest", "Testing"),
    record(15, "Vitest", "Testing"),
    record(16, "Playwright", "Testing"),
    record(17, "Redux", "State Management"),
    record(18, "Zustand", "State Management"),
    record(19, "Next.js", "Meta Framework"),
    record(20, "Remix", "Meta Framework"),
    record(21, "ESLint", "Tooling"),
    record(22, "Prettier", "Tooling"),
];

/// What a blank query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    #[default]
    NoResults,
    ShowAll,
}

/// Records whose name or category contains `term`, ignoring case.
///
/// Original order is kept. A blank term is handled per `policy`.
pub fn filter_records<'a>(
    term: &str,
    records: &'a [SearchRecord],
    policy: EmptyQueryPolicy,
) -> Vec<&'a SearchRecord> {
    if term.trim().is_empty() {
        return match policy {
            EmptyQueryPolicy::NoResults => Vec::new(),
            EmptyQueryPolicy::ShowAll => records.iter().collect(),
        };
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Caption shown above the result list.
pub fn results_caption(raw_term: &str, count: usize) -> String {
    if raw_term.trim().is_empty() {
        return "Start typing to search".to_string();
    }
    let suffix = if count == 1 { "" } else { "s" };
    format!("Found {count} result{suffix}")
}
