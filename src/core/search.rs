use crate::domain::model::VoteResource;
use crate::utils::error::{ExplorerError, Result};

const LISTING_PREFIX: &str = "federal proposals:";

/// Search term derived from a proposal name.
///
/// Accepts both the catalogue listing form
/// (`Federal proposals: 1. Popular Initiative 'Name'`) and a bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalQuery {
    original: String,
    term: String,
}

impl ProposalQuery {
    pub fn parse(proposal_name: &str) -> Result<Self> {
        let term = if proposal_name.contains('\'') {
            // 取第一對單引號之間的文字
            proposal_name
                .split('\'')
                .nth(1)
                .unwrap_or_default()
                .to_lowercase()
                .trim()
                .to_string()
        } else {
            proposal_name
                .to_lowercase()
                .replace(LISTING_PREFIX, "")
                .trim()
                .to_string()
        };

        if term.is_empty() {
            return Err(ExplorerError::ValidationError {
                message: format!("Proposal name '{}' yields an empty search term", proposal_name),
            });
        }

        Ok(Self {
            original: proposal_name.to_string(),
            term,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.term)
    }

    /// 回傳描述包含搜尋字詞的第一筆資源
    pub fn find_in<'a>(&self, resources: &'a [VoteResource]) -> Option<&'a VoteResource> {
        resources.iter().find(|resource| {
            let description = resource.description.as_deref().unwrap_or_default();
            tracing::debug!("Checking resource: {}", description);
            self.matches(description)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resource(description: &str) -> VoteResource {
        VoteResource {
            date: Some("2025-02-09".to_string()),
            description: Some(description.to_string()),
            descriptions: BTreeMap::new(),
            download_url: Some(format!("https://example.com/{}.json", description.len())),
            format: Some("JSON".to_string()),
            last_modified: None,
        }
    }

    #[test]
    fn test_quoted_name_uses_text_between_first_quotes() {
        let query = ProposalQuery::parse(
            "Federal proposals: 1. Popular Initiative 'For a responsible economy within our planet's limits'",
        )
        .unwrap();
        // the apostrophe in "planet's" closes the quoted part
        assert_eq!(query.term(), "for a responsible economy within our planet");
    }

    #[test]
    fn test_plain_name_strips_listing_prefix() {
        let query = ProposalQuery::parse("Federal Proposals:   Biodiversity Initiative ").unwrap();
        assert_eq!(query.term(), "biodiversity initiative");

        let query = ProposalQuery::parse("For a responsible economy").unwrap();
        assert_eq!(query.term(), "for a responsible economy");
    }

    #[test]
    fn test_lone_quote_takes_rest_of_input() {
        let query = ProposalQuery::parse("Initiative 'Pension ").unwrap();
        assert_eq!(query.term(), "pension");
    }

    #[test]
    fn test_empty_term_is_rejected() {
        assert!(ProposalQuery::parse("   ").is_err());
        assert!(ProposalQuery::parse("Federal proposals:").is_err());
        assert!(ProposalQuery::parse("''").is_err());
    }

    #[test]
    fn test_find_first_matching_resource() {
        let resources = vec![
            resource("Federal proposals: 1. Biodiversity Initiative"),
            resource("Federal proposals: 1. Popular Initiative 'For a responsible economy within our planet's limits'"),
            resource("Federal proposals: 2. Another responsible economy vote"),
        ];

        let query = ProposalQuery::parse("responsible economy").unwrap();
        let found = query.find_in(&resources).unwrap();
        assert_eq!(found, &resources[1]);

        let query = ProposalQuery::parse("Motorway expansion").unwrap();
        assert!(query.find_in(&resources).is_none());
    }

    #[test]
    fn test_resource_without_description_never_matches() {
        let mut r = resource("x");
        r.description = None;
        let query = ProposalQuery::parse("x").unwrap();
        assert!(query.find_in(&[r]).is_none());
    }
}
