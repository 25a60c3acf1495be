use blogsync::api::{ApiClient, FeedSource};
use blogsync::auth::Credentials;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_xml(next: Option<&str>) -> String {
    let next_link = next
        .map(|href| format!(r#"<link rel="next" href="{}"/>"#, href))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:app="http://www.w3.org/2007/app">
  <link rel="first" href="https://example.com/first"/>
  {next_link}
  <title>Test blog</title>
  <entry>
    <id>tag:blog.hatena.ne.jp,2013:blog-alice-1-100</id>
    <link rel="alternate" type="text/html" href="https://alice.example.com/entry/1"/>
    <author><name>alice</name></author>
    <title>Hello World</title>
    <updated>2023-06-01T10:00:00+09:00</updated>
    <published>2023-06-01T10:00:00+09:00</published>
    <app:edited>2023-06-02T10:00:00+09:00</app:edited>
    <content type="text/x-markdown">Hi there</content>
    <category term="intro"/>
    <app:control>
      <app:draft>no</app:draft>
      <app:preview>yes</app:preview>
    </app:control>
    <hatenablog:customurl xmlns:hatenablog="http://www.hatena.ne.jp/info/xmlns#hatenablog">hello-world</hatenablog:customurl>
  </entry>
</feed>"#
    )
}

#[tokio::test]
async fn test_fetch_page_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alice/blog/atom/entry"))
        .and(header("Authorization", "Basic YWxpY2U6a2V5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(feed_xml(Some("https://example.com/page2")), "application/atom+xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();

    // Run blocking client in a blocking context
    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(Credentials::new("alice", "key"), Some(uri))
            .unwrap()
            .disable_throttle();
        let url = client.entries_url("blog");
        client.fetch_page(&url)
    })
    .await
    .unwrap();

    let page = result.unwrap();
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].title, "Hello World");
    assert_eq!(page.entries[0].tags, vec!["intro".to_string()]);
    assert_eq!(page.next.as_deref(), Some("https://example.com/page2"));
    assert_eq!(
        page.entries[0].edited.as_deref(),
        Some("2023-06-02T10:00:00+09:00")
    );
    assert!(!page.entries[0].draft);
    assert!(page.entries[0].preview);
    assert_eq!(page.entries[0].custom_url.as_deref(), Some("hello-world"));
}

#[tokio::test]
async fn test_api_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alice/blog/atom/entry"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(Credentials::new("alice", "wrong"), Some(uri))
            .unwrap()
            .disable_throttle();
        let url = client.entries_url("blog");
        client.fetch_page(&url)
    })
    .await
    .unwrap();

    match result {
        Err(blogsync::Error::Api {
            status, message, ..
        }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alice/blog/atom/entry"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<feed><entry></feed>"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(Credentials::new("alice", "key"), Some(uri))
            .unwrap()
            .disable_throttle();
        let url = client.entries_url("blog");
        client.fetch_page(&url)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(blogsync::Error::Parse(_))));
}
