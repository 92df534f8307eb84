//! Wire format of the per-vote result documents linked from the catalogue.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsDocument {
    /// 投票日，格式 YYYYMMDD
    pub abstimmtag: Option<String>,
    pub schweiz: Option<NationalResults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NationalResults {
    #[serde(default)]
    pub vorlagen: Vec<Proposal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "vorlagenId")]
    pub id: Option<u64>,
    #[serde(rename = "vorlagenTitel", default)]
    pub titles: Vec<LocalizedTitle>,
    #[serde(rename = "vorlageAngenommen")]
    pub accepted: Option<bool>,
    #[serde(rename = "resultat", default)]
    pub result: BallotResult,
    #[serde(rename = "kantone", default)]
    pub cantons: Vec<CantonResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedTitle {
    #[serde(rename = "langKey")]
    pub lang_key: String,
    pub text: String,
}

/// 計票中時欄位可能是 null
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallotResult {
    #[serde(rename = "stimmbeteiligungInProzent")]
    pub turnout_percent: Option<f64>,
    #[serde(rename = "jaStimmenInProzent")]
    pub yes_percent: Option<f64>,
    #[serde(rename = "jaStimmenAbsolut")]
    pub yes_votes: Option<u64>,
    #[serde(rename = "neinStimmenAbsolut")]
    pub no_votes: Option<u64>,
    #[serde(rename = "anzahlStimmberechtigte")]
    pub eligible_voters: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantonResults {
    /// 發布時有時是字串、有時是數字
    #[serde(rename = "geoLevelnummer")]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "geoLevelname")]
    pub name: String,
    #[serde(rename = "resultat", default)]
    pub result: BallotResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_document_with_nulls() {
        let json = serde_json::json!({
            "abstimmtag": "20240609",
            "schweiz": {
                "vorlagen": [{
                    "vorlagenId": 6720,
                    "vorlagenTitel": [{"langKey": "de", "text": "Prämien-Entlastungs-Initiative"}],
                    "vorlageAngenommen": null,
                    "resultat": {
                        "stimmbeteiligungInProzent": null,
                        "jaStimmenInProzent": null,
                        "jaStimmenAbsolut": null,
                        "neinStimmenAbsolut": null,
                        "anzahlStimmberechtigte": 5561117
                    }
                }]
            }
        });

        let doc: ResultsDocument = serde_json::from_value(json).unwrap();
        let national = doc.schweiz.unwrap();
        let proposal = &national.vorlagen[0];
        assert_eq!(proposal.id, Some(6720));
        assert_eq!(proposal.accepted, None);
        assert_eq!(proposal.result.eligible_voters, Some(5561117));
        assert!(proposal.result.yes_percent.is_none());
        assert!(proposal.cantons.is_empty());
    }

    #[test]
    fn test_parse_document_without_national_level() {
        let doc: ResultsDocument =
            serde_json::from_value(serde_json::json!({"abstimmtag": "20240609"})).unwrap();
        assert!(doc.schweiz.is_none());
    }
}
