//! Aggregates shown above the leads table and on the overview page.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::lead::Lead;
use crate::status::LeadStatus;

/// Length of the growth chart window, in days.
pub const GROWTH_WINDOW_DAYS: u32 = 30;

/// How many leads the overview's "recent" list shows.
pub const RECENT_LIMIT: usize = 5;

/// Headline numbers for the stats grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    /// Leads still in the `new` status.
    pub new_inquiries: usize,
    /// Most frequently chosen neighborhood, `None` without leads.
    pub top_neighborhood: Option<String>,
}

/// One day on the growth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    /// Axis label, e.g. `Oct 6`.
    pub label: String,
    pub count: usize,
}

/// Compute the stats grid over `leads`, which are expected newest first.
pub fn compute_stats(leads: &[Lead]) -> LeadStats {
    LeadStats {
        total: leads.len(),
        new_inquiries: leads.iter().filter(|l| l.status == LeadStatus::New).count(),
        top_neighborhood: top_neighborhood(leads),
    }
}

/// Label chosen most often across all leads. Ties go to the label that was
/// seen first while walking `leads` in order.
pub fn top_neighborhood(leads: &[Lead]) -> Option<String> {
    // (label, count) in first-seen order.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for label in leads.iter().flat_map(|l| l.neighborhoods.iter()) {
        match counts.iter_mut().find(|(seen, _)| *seen == label.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((label, n));
        }
    }
    best.map(|(label, _)| label.to_string())
}

/// Daily lead counts for the [`GROWTH_WINDOW_DAYS`] days ending `today`,
/// oldest first. Days without leads are present with a zero count.
pub fn growth_series(leads: &[Lead], today: NaiveDate) -> Vec<GrowthPoint> {
    (0..GROWTH_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| GrowthPoint {
            date,
            label: date.format("%b %-d").to_string(),
            count: leads
                .iter()
                .filter(|l| l.created_at.date_naive() == date)
                .count(),
        })
        .collect()
}

/// The first `limit` leads of a newest-first list.
pub fn recent(leads: &[Lead], limit: usize) -> &[Lead] {
    &leads[..leads.len().min(limit)]
}
