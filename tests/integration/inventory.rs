//! Sites discovered from the server drive the scoped listings.

use super::common::{start, xml};
use bigfix_api::{SiteFilter, SiteType};
use futures::{stream, StreamExt};
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const SITES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<BESAPI xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="BESAPI.xsd">
  <ExternalSite Resource="http://bigfix/api/site/external/BES%20Support">
    <Name>BES Support</Name>
    <DisplayName>BES Support</DisplayName>
    <GatherURL>http://sync.bigfix.com/cgi-bin/bfgather/bessupport</GatherURL>
  </ExternalSite>
  <ExternalSite Resource="http://bigfix/api/site/external/Retired">
    <Name>Retired</Name>
  </ExternalSite>
  <ActionSite Resource="http://bigfix/api/site/master">
    <Name>ActionSite</Name>
  </ActionSite>
</BESAPI>"#;

#[tokio::test]
async fn test_tasks_across_discovered_sites() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .and(basic_auth("bigfix", "s3cret"))
        .and(header("accept", "application/xml"))
        .respond_with(xml(SITES))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/external/BES%20Support"))
        .respond_with(xml(
            r#"<BESAPI>
                 <Task Resource="http://bigfix/api/task/external/BES%20Support/168" LastModified="Thu, 7 Mar 2024 14:02:11 +0000"><Name>Restart Needed</Name><ID>168</ID></Task>
                 <Task Resource="http://bigfix/api/task/external/BES%20Support/169"><Name>Clear Cache</Name><ID>169</ID></Task>
               </BESAPI>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/external/Retired"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Resource not found"))
        .expect(1)
        .mount(&server)
        .await;
    // `action` sites list by name, unlike `master`.
    Mock::given(method("GET"))
        .and(path("/api/tasks/action/ActionSite"))
        .respond_with(xml(r#"<BESAPI><Task><Name>Custom</Name><ID>3</ID></Task></BESAPI>"#))
        .expect(1)
        .mount(&server)
        .await;

    let sites = client.list_sites().await.unwrap();
    assert_eq!(sites.len(), 3);

    let tasks: Vec<_> = client
        .tasks_in_sites(stream::iter(sites), SiteFilter::all())
        .collect()
        .await;
    let tasks: Vec<_> = tasks.into_iter().collect::<Result<_, _>>().unwrap();

    let labels: Vec<(&str, u64, &str)> = tasks
        .iter()
        .map(|t| (t.site.name(), t.id, t.title.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("BES Support", 168, "Restart Needed"),
            ("BES Support", 169, "Clear Cache"),
            ("ActionSite", 3, "Custom"),
        ]
    );
    assert!(tasks[0].last_modified.is_some());
    assert!(tasks.iter().all(|t| !t.site.name().is_empty()));
}

#[tokio::test]
async fn test_site_type_filter() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(xml(SITES))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analyses/action/ActionSite"))
        .respond_with(xml(r#"<BESAPI><Analysis><Name>Custom Inventory</Name><ID>11</ID></Analysis></BESAPI>"#))
        .expect(1)
        .mount(&server)
        .await;

    let sites = client.list_sites().await.unwrap();
    let analyses: Vec<_> = client
        .analyses_in_sites(
            stream::iter(sites),
            SiteFilter::all().with_site_type(SiteType::Action),
        )
        .collect()
        .await;

    assert_eq!(analyses.len(), 1);
    let analysis = analyses.into_iter().next().unwrap().unwrap();
    assert_eq!(analysis.title, "Custom Inventory");
    assert_eq!(analysis.site.site_type(), SiteType::Action);
}

#[tokio::test]
async fn test_computer_detail_end_to_end() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/computer/1082"))
        .respond_with(xml(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<BESAPI>
  <Computer Resource="http://bigfix/api/computer/1082">
    <Property Name="Computer Name">WIN-APP-01</Property>
    <Property Name="Last Report Time">Mon, 2 Jan 2006 15:04:05 -0700</Property>
    <Property Name="Client Settings">_BESClient_Resource_WorkIdle=20</Property>
    <Property Name="Subscribed Sites">http://sync.bigfix.com/cgi-bin/bfgather/bessupport</Property>
    <Property Name="Subscribed Sites">http://bigfix:52311/cgi-bin/bfgather/actionsite</Property>
    <Property Name="Installed Applications">7-Zip</Property>
  </Computer>
</BESAPI>"#,
        ))
        .mount(&server)
        .await;

    let computer = client.get_computer(1082).await.unwrap();
    assert_eq!(computer.name, "WIN-APP-01");
    assert_eq!(computer.resource, "http://bigfix/api/computer/1082");
    assert_eq!(
        computer.last_report_time.unwrap().to_rfc3339(),
        "2006-01-02T15:04:05-07:00"
    );
    assert_eq!(computer.client_settings[0].name, "_BESClient_Resource_WorkIdle");
    assert_eq!(computer.client_settings[0].value, "20");
    assert_eq!(computer.subscribed_sites.len(), 2);
    assert_eq!(computer.other_properties[0].name, "Installed Applications");
}

#[tokio::test]
async fn test_missing_entities_degrade_to_none() {
    let (server, client) = start().await;

    Mock::given(method("GET"))
        .and(path("/api/fixlet/external/BES%20Support/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Fixlet not found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/role/4"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let fixlet = client.optional(client.get_fixlet("BES Support", "external", 999).await);
    assert!(fixlet.unwrap().is_none());

    let role = client.optional(client.get_role(4).await);
    let err = role.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(401));
}
