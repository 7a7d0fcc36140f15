use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::{title_or_name, ContentDetailXml, ContentListItemXml, MimeField};
use crate::site_ref::SiteRef;
use crate::timestamp::parse_timestamp;
use crate::xml::parse_u64;

/// An analysis: a set of relevance-driven properties reported by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub id: u64,
    pub resource: String,
    pub site: SiteRef,
    pub name: String,
    pub title: String,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub description: String,
    pub relevance: Vec<String>,
    pub category: String,
    pub source: String,
    pub source_release_date: String,
    pub delay: String,
    pub mime_fields: Vec<MimeField>,
    pub properties: Vec<AnalysisProperty>,
}

/// One `<Property>` of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisProperty {
    #[serde(rename(deserialize = "@Name"))]
    pub name: String,
    #[serde(rename(deserialize = "@ID"))]
    pub id: String,
    #[serde(rename(deserialize = "@EvaluationPeriod"))]
    pub evaluation_period: String,
    /// Relevance expression.
    #[serde(rename(deserialize = "$text"))]
    pub relevance: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AnalysisListXml {
    #[serde(rename = "Analysis")]
    pub items: Vec<ContentListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AnalysisDetailResponseXml {
    #[serde(rename = "Analysis")]
    pub analysis: ContentDetailXml,
}

impl Analysis {
    pub(crate) fn from_list_item(item: ContentListItemXml, site: &SiteRef) -> Self {
        Self {
            id: parse_u64(&item.id),
            resource: item.resource,
            site: site.clone(),
            title: item.name.clone(),
            name: item.name,
            last_modified: parse_timestamp(&item.last_modified),
            description: String::new(),
            relevance: Vec::new(),
            category: String::new(),
            source: String::new(),
            source_release_date: String::new(),
            delay: String::new(),
            mime_fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub(crate) fn from_detail(detail: ContentDetailXml, id: u64, resource: String, site: &SiteRef) -> Self {
        Self {
            id,
            resource,
            site: site.clone(),
            name: detail.title.clone(),
            title: detail.title,
            last_modified: None,
            description: detail.description,
            relevance: detail.relevance,
            category: detail.category,
            source: detail.source,
            source_release_date: detail.source_release_date,
            delay: detail.delay,
            mime_fields: detail.mime_fields,
            properties: detail.properties,
        }
    }

    /// Label for display; the title, else the short name.
    pub fn label(&self) -> String {
        title_or_name(self.title.clone(), &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_ref::SiteType;
    use crate::xml::decode;

    fn site() -> SiteRef {
        SiteRef::new("BES Inventory and License", SiteType::External).unwrap()
    }

    #[test]
    fn test_list_item_title_defaults_to_name() {
        let xml: AnalysisListXml = decode(
            br#"<BESAPI>
                  <Analysis Resource="https://h/api/analysis/external/BES%20Inventory/17" LastModified="Tue, 05 Mar 2024 10:00:00 +0000">
                    <Name>Application Information (Windows)</Name>
                    <ID>17</ID>
                  </Analysis>
                </BESAPI>"#,
            "analysis",
        )
        .unwrap();

        let analyses: Vec<Analysis> = xml
            .items
            .into_iter()
            .map(|item| Analysis::from_list_item(item, &site()))
            .collect();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].id, 17);
        assert_eq!(analyses[0].title, "Application Information (Windows)");
        assert_eq!(analyses[0].title, analyses[0].name);
        assert_eq!(analyses[0].site, site());
        assert!(analyses[0].last_modified.is_some());
    }

    #[test]
    fn test_detail() {
        let xml: AnalysisDetailResponseXml = decode(
            br#"<BES>
                  <Analysis>
                    <Title>Hardware Information</Title>
                    <Description><![CDATA[<p>Collects hardware data.</p>]]></Description>
                    <Relevance>windows of operating system</Relevance>
                    <Relevance>version of client &gt;= "9"</Relevance>
                    <Category>Inventory</Category>
                    <Source>Internal</Source>
                    <MIMEField><Name>x-fixlet-modification-time</Name><Value>Tue, 05 Mar 2024 10:00:00 +0000</Value></MIMEField>
                    <Property Name="BIOS" ID="1" EvaluationPeriod="PT1H">bios of computer</Property>
                    <Property Name="RAM" ID="2">size of ram</Property>
                  </Analysis>
                </BES>"#,
            "analysis",
        )
        .unwrap();

        let analysis = Analysis::from_detail(xml.analysis, 17, "https://h/api/analysis/master/17".into(), &site());
        assert_eq!(analysis.id, 17);
        assert_eq!(analysis.name, "Hardware Information");
        assert_eq!(analysis.description, "<p>Collects hardware data.</p>");
        assert_eq!(analysis.relevance.len(), 2);
        assert_eq!(analysis.relevance[1], r#"version of client >= "9""#);
        assert_eq!(analysis.mime_fields[0].name, "x-fixlet-modification-time");
        assert_eq!(analysis.properties.len(), 2);
        assert_eq!(analysis.properties[0].evaluation_period, "PT1H");
        assert_eq!(analysis.properties[1].relevance, "size of ram");
        assert_eq!(analysis.label(), "Hardware Information");
    }
}
