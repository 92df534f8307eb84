use crate::domain::model::{VoteResource, VotingSummary};
use std::fmt;

const SEPARATOR_WIDTH: usize = 50;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// 千分位格式，例如 1234567 -> 1,234,567
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 目錄的文字報表
pub struct CatalogueReport<'a>(pub &'a [VoteResource]);

impl fmt::Display for CatalogueReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available voting data:")?;
        writeln!(f, "{}", separator())?;

        for resource in self.0 {
            writeln!(f, "Date: {}", resource.date_or_default())?;
            writeln!(f, "Description: {}", resource.description_or_default())?;
            writeln!(f, "Download URL: {}", resource.download_url_or_default())?;
            writeln!(f, "Format: {}", resource.format_or_default())?;
            writeln!(f, "Last Modified: {}", resource.last_modified_or_default())?;
            writeln!(f, "{}", separator())?;
        }

        if self.0.is_empty() {
            writeln!(f, "No votes found.")?;
        }
        Ok(())
    }
}

/// 單一提案的文字報表
pub struct SummaryReport<'a>(pub &'a VotingSummary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Voting Summary:")?;
        writeln!(f, "{}", separator())?;
        writeln!(f, "Title: {}", summary.title)?;
        writeln!(f, "Date: {}", summary.date.format("%Y-%m-%d"))?;
        writeln!(
            f,
            "Result: {}",
            if summary.accepted { "Accepted" } else { "Rejected" }
        )?;
        writeln!(f, "Turnout: {:.1}%", summary.turnout)?;
        writeln!(f, "Yes Percentage: {:.1}%", summary.yes_percentage)?;
        writeln!(f, "No Percentage: {:.1}%", summary.no_percentage())?;
        writeln!(f, "Yes Votes: {}", group_thousands(summary.yes_votes))?;
        writeln!(f, "No Votes: {}", group_thousands(summary.no_votes))?;
        writeln!(f, "Eligible Voters: {}", group_thousands(summary.eligible_voters))?;

        if !summary.all_titles.is_empty() {
            writeln!(f)?;
            writeln!(f, "Titles in all languages:")?;
            for (lang, title) in &summary.all_titles {
                writeln!(f, "{}: {}", lang.to_uppercase(), title)?;
            }
        }

        if !summary.cantons.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Cantons ({} of {} in favour):",
                summary.cantons_in_favour(),
                summary.cantons.len()
            )?;
            for canton in &summary.cantons {
                writeln!(
                    f,
                    "  {:<24} Yes {:>5.1}%  Turnout {:>5.1}%",
                    canton.name, canton.yes_percentage, canton.turnout
                )?;
            }
        }
        Ok(())
    }
}

pub fn render_catalogue(resources: &[VoteResource]) -> String {
    CatalogueReport(resources).to_string()
}

pub fn render_summary(summary: &VotingSummary) -> String {
    SummaryReport(summary).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CantonSummary;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(5561117), "5,561,117");
    }

    #[test]
    fn test_render_catalogue_uses_placeholders() {
        let resources = vec![VoteResource {
            date: Some("2024-11-24".to_string()),
            description: None,
            descriptions: BTreeMap::new(),
            download_url: None,
            format: None,
            last_modified: None,
        }];

        let text = render_catalogue(&resources);
        assert!(text.contains("Date: 2024-11-24"));
        assert!(text.contains("Description: No description available"));
        assert!(text.contains("Download URL: No URL available"));
        assert!(text.contains("Format: Unknown format"));
        assert!(text.contains("Last Modified: Unknown"));

        assert!(render_catalogue(&[]).contains("No votes found."));
    }

    #[test]
    fn test_render_summary() {
        let mut all_titles = BTreeMap::new();
        all_titles.insert("de".to_string(), "Umweltverantwortungsinitiative".to_string());
        all_titles.insert("en".to_string(), "Responsible economy".to_string());

        let summary = VotingSummary {
            title: "Responsible economy".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 9).unwrap(),
            accepted: false,
            turnout: 37.96,
            yes_percentage: 30.24,
            yes_votes: 604_000,
            no_votes: 1_395_000,
            eligible_voters: 5_561_117,
            all_titles,
            cantons: vec![CantonSummary {
                canton_id: Some("1".to_string()),
                name: "Zürich".to_string(),
                yes_percentage: 33.1,
                turnout: 40.0,
                yes_votes: 100,
                no_votes: 200,
            }],
        };

        let text = render_summary(&summary);
        assert!(text.contains("Date: 2025-02-09"));
        assert!(text.contains("Result: Rejected"));
        assert!(text.contains("Turnout: 38.0%"));
        assert!(text.contains("Yes Percentage: 30.2%"));
        assert!(text.contains("No Percentage: 69.8%"));
        assert!(text.contains("Yes Votes: 604,000"));
        assert!(text.contains("Eligible Voters: 5,561,117"));
        assert!(text.contains("DE: Umweltverantwortungsinitiative"));
        assert!(text.contains("Cantons (0 of 1 in favour):"));
    }
}
