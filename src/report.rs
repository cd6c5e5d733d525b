use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::fetch::fetch_pull_requests;
use crate::filter::{filter_by_authors, keep_recently_merged};
use crate::github::{OrderDirection, PrState, PullRequestSource, RepositoryRef};
use crate::output::{enrich, ReportEntry};
use crate::render::{Bindings, Renderer};

/// What to put in one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub repos: Vec<RepositoryRef>,
    /// Author allow-list; empty means everyone
    pub users: Vec<String>,
    /// When set, also list PRs merged fewer than this many days ago
    pub merged_days: Option<i64>,
    /// Template name passed to the renderer
    pub template: String,
}

/// Runs fetch, filter, enrich and render once.
pub struct ReportGenerator<S, R> {
    source: S,
    renderer: R,
}

impl<S: PullRequestSource, R: Renderer> ReportGenerator<S, R> {
    pub fn new(source: S, renderer: R) -> Self {
        Self { source, renderer }
    }

    /// Build the report, measuring ages against the current time
    pub fn generate(&self, request: &ReportRequest) -> Result<String> {
        self.generate_at(request, Utc::now())
    }

    pub fn generate_at(&self, request: &ReportRequest, now: DateTime<Utc>) -> Result<String> {
        let open = self.open_entries(request, now)?;

        match request.merged_days {
            None => self.render(&request.template, &open, None, None),
            Some(days) => {
                let merged = self.merged_entries(request, days, now)?;
                self.render(&request.template, &open, Some(merged.as_slice()), Some(now))
            }
        }
    }

    fn open_entries(&self, request: &ReportRequest, now: DateTime<Utc>) -> Result<Vec<ReportEntry>> {
        let prs = fetch_pull_requests(&self.source, &request.repos, PrState::Open, OrderDirection::Asc)?;
        debug!("Fetched {} open PRs", prs.len());

        let prs = filter_by_authors(prs, &request.users);
        info!("{} open PRs after author filter", prs.len());

        Ok(enrich(prs, now))
    }

    fn merged_entries(
        &self,
        request: &ReportRequest,
        max_age_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReportEntry>> {
        let prs = fetch_pull_requests(&self.source, &request.repos, PrState::Merged, OrderDirection::Desc)?;
        debug!("Fetched {} merged PRs", prs.len());

        let prs = filter_by_authors(prs, &request.users);
        let prs = keep_recently_merged(prs, max_age_days, now);
        info!("{} PRs merged in the last {} days", prs.len(), max_age_days);

        Ok(enrich(prs, now))
    }

    /// Render open PRs, plus merged PRs and a timestamp in extended mode.
    ///
    /// Basic mode binds `prs`; extended mode binds `open_prs`, `merged_prs`
    /// and `generated_at`.
    pub fn render(
        &self,
        template: &str,
        open: &[ReportEntry],
        merged: Option<&[ReportEntry]>,
        generated_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let mut bindings = Bindings::new();
        match merged {
            None => bindings.insert("prs", &open)?,
            Some(merged) => {
                bindings.insert("open_prs", &open)?;
                bindings.insert("merged_prs", &merged)?;
            }
        }
        if let Some(generated_at) = generated_at {
            bindings.insert("generated_at", &generated_at.format("%Y-%m-%d %H:%M UTC").to_string())?;
        }

        self.renderer.render(template, &bindings)
    }
}
