use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 公開資料集中的一筆聯邦投票資源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResource {
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    pub download_url: Option<String>,
    pub format: Option<String>,
    pub last_modified: Option<String>,
}

impl VoteResource {
    /// `coverage` 欄位通常是 YYYY-MM-DD，解析失敗時回傳 None
    pub fn vote_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("No description available")
    }

    pub fn date_or_default(&self) -> &str {
        self.date.as_deref().unwrap_or("No date available")
    }

    pub fn download_url_or_default(&self) -> &str {
        self.download_url.as_deref().unwrap_or("No URL available")
    }

    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or("Unknown format")
    }

    pub fn last_modified_or_default(&self) -> &str {
        self.last_modified.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonSummary {
    pub canton_id: Option<String>,
    pub name: String,
    pub yes_percentage: f64,
    pub turnout: f64,
    pub yes_votes: u64,
    pub no_votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingSummary {
    pub title: String,
    pub date: NaiveDate,
    pub accepted: bool,
    pub turnout: f64,
    pub yes_percentage: f64,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub eligible_voters: u64,
    pub all_titles: BTreeMap<String, String>,
    #[serde(default)]
    pub cantons: Vec<CantonSummary>,
}

impl VotingSummary {
    pub fn no_percentage(&self) -> f64 {
        100.0 - self.yes_percentage
    }

    /// 贊成的州數（國民與州的雙重多數時有用）
    pub fn cantons_in_favour(&self) -> usize {
        self.cantons
            .iter()
            .filter(|c| c.yes_percentage > 50.0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(date: Option<&str>) -> VoteResource {
        VoteResource {
            date: date.map(str::to_string),
            description: None,
            descriptions: BTreeMap::new(),
            download_url: None,
            format: None,
            last_modified: None,
        }
    }

    #[test]
    fn test_vote_date_parsing() {
        assert_eq!(
            resource(Some("2024-03-03")).vote_date(),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
        assert_eq!(
            resource(Some("2024-03-03T00:00:00")).vote_date(),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
        assert_eq!(resource(Some("sometime")).vote_date(), None);
        assert_eq!(resource(None).vote_date(), None);
    }

    #[test]
    fn test_display_defaults() {
        let r = resource(None);
        assert_eq!(r.date_or_default(), "No date available");
        assert_eq!(r.description_or_default(), "No description available");
        assert_eq!(r.download_url_or_default(), "No URL available");
        assert_eq!(r.format_or_default(), "Unknown format");
        assert_eq!(r.last_modified_or_default(), "Unknown");
    }
}
