use crate::core::search::ProposalQuery;
use crate::core::summary::build_summary;
use crate::domain::model::{VoteResource, VotingSummary};
use crate::domain::ports::VoteSource;
use crate::utils::error::{ExplorerError, Result};
use chrono::NaiveDate;

/// 列表篩選條件
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub since: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl ListFilter {
    pub fn apply(&self, resources: Vec<VoteResource>) -> Vec<VoteResource> {
        let limit = self.limit.unwrap_or(usize::MAX);
        resources
            .into_iter()
            .filter(|r| match (self.since, r.vote_date()) {
                (Some(since), Some(date)) => date >= since,
                // 沒有日期的資源無法比較，排除
                (Some(_), None) => false,
                (None, _) => true,
            })
            .take(limit)
            .collect()
    }
}

pub struct VoteExplorer<V: VoteSource> {
    source: V,
    language: String,
}

impl<V: VoteSource> VoteExplorer<V> {
    pub fn new(source: V, language: impl Into<String>) -> Self {
        Self {
            source,
            language: language.into(),
        }
    }

    pub async fn list_votes(&self, filter: &ListFilter) -> Result<Vec<VoteResource>> {
        let resources = self.source.fetch_catalogue().await?;
        let total = resources.len();
        let filtered = filter.apply(resources);
        tracing::info!("Listed {} of {} vote resources", filtered.len(), total);
        Ok(filtered)
    }

    pub async fn find_proposal(&self, proposal_name: &str) -> Result<VoteResource> {
        let query = ProposalQuery::parse(proposal_name)?;
        self.find_with_query(&query).await
    }

    pub async fn summarize(&self, proposal_name: &str) -> Result<VotingSummary> {
        let query = ProposalQuery::parse(proposal_name)?;
        let resource = self.find_with_query(&query).await?;

        let download_url =
            resource
                .download_url
                .as_deref()
                .ok_or_else(|| ExplorerError::ResultsMissingError {
                    message: format!(
                        "resource '{}' has no download URL",
                        resource.description_or_default()
                    ),
                })?;

        tracing::info!("Found matching proposal. Fetching results from: {}", download_url);
        let document = self.source.fetch_results(download_url).await?;

        build_summary(&document, &query, &self.language)
    }

    async fn find_with_query(&self, query: &ProposalQuery) -> Result<VoteResource> {
        tracing::info!("Searching for proposal containing: '{}'", query.term());

        let resources = self.source.fetch_catalogue().await?;
        let found = query
            .find_in(&resources)
            .cloned()
            .ok_or_else(|| ExplorerError::ProposalNotFoundError {
                proposal: query.original().to_string(),
            })?;

        tracing::debug!("Found match: {}", found.description_or_default());
        Ok(found)
    }
}
