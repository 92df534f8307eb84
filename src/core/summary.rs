use crate::core::search::ProposalQuery;
use crate::domain::model::{CantonSummary, VotingSummary};
use crate::domain::results::{BallotResult, CantonResults, Proposal, ResultsDocument};
use crate::utils::error::{ExplorerError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

const FALLBACK_LANGUAGE: &str = "de";
const NO_TITLE: &str = "Title not available";

/// 從結果文件建立摘要
pub fn build_summary(
    document: &ResultsDocument,
    query: &ProposalQuery,
    language: &str,
) -> Result<VotingSummary> {
    let proposals = document
        .schweiz
        .as_ref()
        .map(|national| national.vorlagen.as_slice())
        .unwrap_or_default();

    if proposals.is_empty() {
        return Err(ExplorerError::ResultsMissingError {
            message: "document has no national proposals".to_string(),
        });
    }

    let raw_date = document
        .abstimmtag
        .as_deref()
        .ok_or_else(|| ExplorerError::ResultsMissingError {
            message: "document has no vote day".to_string(),
        })?;
    let date = parse_vote_day(raw_date)?;

    let proposal = select_proposal(proposals, query);
    let titles: BTreeMap<String, String> = proposal
        .titles
        .iter()
        .map(|t| (t.lang_key.clone(), t.text.clone()))
        .collect();

    let title = titles
        .get(language)
        .or_else(|| titles.get(FALLBACK_LANGUAGE))
        .cloned()
        .unwrap_or_else(|| NO_TITLE.to_string());

    let pending = |field: &str| ExplorerError::ResultsPendingError {
        message: format!("'{}' is not available for '{}'", field, title),
    };

    let result = &proposal.result;
    let accepted = proposal.accepted.ok_or_else(|| pending("vorlageAngenommen"))?;
    let turnout = result
        .turnout_percent
        .ok_or_else(|| pending("stimmbeteiligungInProzent"))?;
    let yes_percentage = result.yes_percent.ok_or_else(|| pending("jaStimmenInProzent"))?;
    let yes_votes = result.yes_votes.ok_or_else(|| pending("jaStimmenAbsolut"))?;
    let no_votes = result.no_votes.ok_or_else(|| pending("neinStimmenAbsolut"))?;
    let eligible_voters = result
        .eligible_voters
        .ok_or_else(|| pending("anzahlStimmberechtigte"))?;

    let cantons = proposal.cantons.iter().filter_map(canton_summary).collect();

    Ok(VotingSummary {
        title,
        date,
        accepted,
        turnout,
        yes_percentage,
        yes_votes,
        no_votes,
        eligible_voters,
        all_titles: titles,
        cantons,
    })
}

/// 投票日必須是 8 位數字 YYYYMMDD；chrono 的 %d 也接受單一位數
fn parse_vote_day(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ExplorerError::ResultsMissingError {
        message: format!("invalid vote day '{}': {}", raw, reason),
    };

    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected YYYYMMDD".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d").map_err(|e| invalid(e.to_string()))
}

/// 一個投票日可能有多個提案，優先選擇標題符合搜尋字詞者
fn select_proposal<'a>(proposals: &'a [Proposal], query: &ProposalQuery) -> &'a Proposal {
    proposals
        .iter()
        .find(|p| p.titles.iter().any(|t| query.matches(&t.text)))
        .unwrap_or_else(|| {
            if proposals.len() > 1 {
                tracing::warn!(
                    "No proposal title contains '{}', using the first of {} proposals",
                    query.term(),
                    proposals.len()
                );
            }
            &proposals[0]
        })
}

fn canton_summary(canton: &CantonResults) -> Option<CantonSummary> {
    let BallotResult {
        turnout_percent,
        yes_percent,
        yes_votes,
        no_votes,
        ..
    } = &canton.result;

    let canton_id = canton.id.as_ref().map(|id| match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    Some(CantonSummary {
        canton_id,
        name: canton.name.clone(),
        yes_percentage: (*yes_percent)?,
        turnout: (*turnout_percent)?,
        yes_votes: (*yes_votes)?,
        no_votes: (*no_votes)?,
    })
}
