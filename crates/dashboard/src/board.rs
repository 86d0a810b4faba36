//! The admin leads table.
//!
//! Holds a cached copy of every lead, newest first. The cache is only ever
//! replaced wholesale by a reload: on mount, after a status change, and on
//! every change-feed signal. Filtering, export and stats work on the cache
//! and never fetch.

use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;
use estate_core::export::{build_csv, export_filename, EMPTY_EXPORT};
use estate_core::filter::BudgetFilter;
use estate_core::lead::{sort_newest_first, Lead};
use estate_core::stats::{
    compute_stats, growth_series, recent, GrowthPoint, LeadStats, RECENT_LIMIT,
};
use estate_core::status::LeadStatus;
use estate_core::types::LeadId;
use estate_events::{ChangeFeed, Subscription};
use tokio::sync::broadcast;

use crate::backend::LeadBackend;
use crate::clipboard::Clipboard;
use crate::notice::Notice;

const RELOAD_EVENT_CAPACITY: usize = 16;

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    /// `leads-export-YYYY-MM-DD.csv`.
    pub filename: String,
    pub content: String,
    pub notice: Notice,
}

/// Everything the overview page and stats grid show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub stats: LeadStats,
    pub growth: Vec<GrowthPoint>,
    pub recent: Vec<Lead>,
}

struct Shared {
    backend: Arc<dyn LeadBackend>,
    leads: RwLock<Vec<Lead>>,
    /// Lead count after each completed reload.
    reloads: broadcast::Sender<usize>,
    /// Notices raised by reloads nobody awaited.
    background_notices: Mutex<Vec<Notice>>,
}

impl Shared {
    async fn reload(&self) -> Result<usize, Notice> {
        let mut fresh = self
            .backend
            .list_leads()
            .await
            .map_err(|e| Notice::error("Error loading leads", e.to_string()))?;
        sort_newest_first(&mut fresh);
        let count = fresh.len();
        if let Ok(mut leads) = self.leads.write() {
            *leads = fresh;
        }
        // Nobody listening is fine.
        let _ = self.reloads.send(count);
        tracing::debug!(count, "Leads reloaded");
        Ok(count)
    }

    fn push_notice(&self, notice: Notice) {
        if let Ok(mut notices) = self.background_notices.lock() {
            notices.push(notice);
        }
    }
}

pub struct LeadBoard {
    shared: Arc<Shared>,
    filter: BudgetFilter,
    subscription: Option<Subscription>,
}

impl LeadBoard {
    /// Fetch once, then reload on every signal from `feed` until the board
    /// is dropped or [`unmount`](Self::unmount)ed.
    ///
    /// A failed initial fetch leaves the board empty and records a notice
    /// (see [`take_notices`](Self::take_notices)); the subscription is
    /// opened regardless so a later change can recover.
    pub async fn mount(backend: Arc<dyn LeadBackend>, feed: &dyn ChangeFeed) -> Self {
        let (reloads, _) = broadcast::channel(RELOAD_EVENT_CAPACITY);
        let shared = Arc::new(Shared {
            backend,
            leads: RwLock::new(Vec::new()),
            reloads,
            background_notices: Mutex::new(Vec::new()),
        });

        if let Err(notice) = shared.reload().await {
            shared.push_notice(notice);
        }

        let on_change_shared = Arc::clone(&shared);
        let subscription = feed.subscribe(Arc::new(move || {
            let shared = Arc::clone(&on_change_shared);
            tokio::spawn(async move {
                if let Err(notice) = shared.reload().await {
                    tracing::warn!(error = %notice.description, "Background reload failed");
                    shared.push_notice(notice);
                }
            });
        }));

        Self {
            shared,
            filter: BudgetFilter::All,
            subscription: Some(subscription),
        }
    }

    /// Release the change subscription. Dropping the board does the same.
    pub fn unmount(mut self) {
        self.subscription.take();
    }

    pub fn is_live(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Replace the cache with a fresh full listing. Returns the lead count.
    pub async fn reload(&self) -> Result<usize, Notice> {
        self.shared.reload().await
    }

    /// Every reload completed from now on, as the resulting lead count.
    pub fn reload_events(&self) -> broadcast::Receiver<usize> {
        self.shared.reloads.subscribe()
    }

    /// Drain notices raised by background reloads.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.shared
            .background_notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    pub fn budget_filter(&self) -> BudgetFilter {
        self.filter
    }

    /// Change the filter. Works on the cache; nothing is fetched.
    pub fn set_budget_filter(&mut self, filter: BudgetFilter) {
        self.filter = filter;
    }

    /// Every cached lead, newest first.
    pub fn leads(&self) -> Vec<Lead> {
        self.shared
            .leads
            .read()
            .map(|l| l.clone())
            .unwrap_or_default()
    }

    /// Cached leads passing the current filter, newest first.
    pub fn visible(&self) -> Vec<Lead> {
        self.leads()
            .into_iter()
            .filter(|l| self.filter.matches(l))
            .collect()
    }

    /// Set one lead's status, then reload.
    pub async fn update_status(&self, id: LeadId, status: LeadStatus) -> Notice {
        match self.shared.backend.update_status(id, status).await {
            Ok(_) => {
                if let Err(notice) = self.shared.reload().await {
                    return notice;
                }
                Notice::success("Status updated", format!("Lead marked as {status}"))
            }
            Err(e) => Notice::error("Error updating status", e.to_string()),
        }
    }

    /// Export the visible leads. An empty selection is refused.
    pub fn export_csv(&self, today: NaiveDate) -> Result<CsvDownload, Notice> {
        let visible = self.visible();
        let content = build_csv(&visible).map_err(|_| Notice::error("Export failed", EMPTY_EXPORT))?;
        Ok(CsvDownload {
            filename: export_filename(today),
            content,
            notice: Notice::success(
                "Export complete",
                format!("{} leads exported to CSV", visible.len()),
            ),
        })
    }

    /// Copy an email address. No server interaction.
    pub fn copy_email(&self, clipboard: &dyn Clipboard, email: &str) -> Notice {
        match clipboard.write_text(email) {
            Ok(()) => Notice::success("Email copied", email),
            Err(e) => {
                tracing::warn!(error = %e, "Email copy failed");
                Notice::error("Failed to copy", "Please copy the email manually.")
            }
        }
    }

    /// Aggregates over every cached lead, ignoring the filter.
    pub fn stats(&self, today: NaiveDate) -> BoardStats {
        let leads = self.leads();
        BoardStats {
            stats: compute_stats(&leads),
            growth: growth_series(&leads, today),
            recent: recent(&leads, RECENT_LIMIT).to_vec(),
        }
    }
}
