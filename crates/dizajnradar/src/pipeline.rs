use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dates::{DEFAULT_STALE_AFTER_DAYS, is_old_by_title, is_stale};
use crate::types::Competition;

const DEFAULT_KEY_PREFIX_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub stale_after_days: i64,
    pub key_prefix_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            key_prefix_len: DEFAULT_KEY_PREFIX_LEN,
        }
    }
}

pub fn run(records: Vec<Competition>, today: NaiveDate, config: &PipelineConfig) -> Vec<Competition> {
    let fresh = drop_stale(records, today, config.stale_after_days);
    dedup(fresh, config.key_prefix_len)
}

pub fn drop_stale(
    records: Vec<Competition>,
    today: NaiveDate,
    stale_after_days: i64,
) -> Vec<Competition> {
    let before = records.len();
    let fresh: Vec<Competition> = records
        .into_iter()
        .filter(|record| {
            if is_stale(record.deadline, today, stale_after_days) {
                log::info!("Dropping stale record '{}'", record.title);
                return false;
            }
            if is_old_by_title(&record.title, today) {
                log::info!("Dropping old-by-title record '{}'", record.title);
                return false;
            }
            true
        })
        .collect();
    log::info!("Staleness filter: {} -> {} records", before, fresh.len());
    fresh
}

pub fn normalization_key(title: &str, prefix_len: usize) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | 'č' | 'ć' | 'ž' | 'š' | 'đ'))
        .take(prefix_len)
        .collect()
}

// First seen wins, except that a later record carrying a deadline replaces a
// kept record without one.
pub fn dedup(records: Vec<Competition>, key_prefix_len: usize) -> Vec<Competition> {
    let before = records.len();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Competition> = Vec::new();
    for record in records {
        let key = normalization_key(&record.title, key_prefix_len);
        match positions.get(&key) {
            Some(&at) => {
                if record.deadline.is_some() && unique[at].deadline.is_none() {
                    unique[at] = record;
                }
            }
            None => {
                positions.insert(key, unique.len());
                unique.push(record);
            }
        }
    }
    log::info!("Deduplication: {} -> {} records", before, unique.len());
    unique
}
