//! Crawling a mock marketplace over HTTP.

use mockito::Matcher;
use sources::{JobSource, JobTileSchema, MarketplaceSpider};
use url::Url;

fn tile(id: &str, title: &str) -> String {
    format!(
        r#"<article data-test="job-tile">
             <h2><a href="/jobs/~{id}">{title}</a></h2>
             <p class="mb-0">Description for {title}</p>
             <span data-test="budget">$1,000</span>
             <span data-test="posted-on">3 hours ago</span>
           </article>"#
    )
}

fn page(tiles: &[String]) -> String {
    format!("<html><body>{}</body></html>", tiles.join("\n"))
}

fn spider_for(server: &mockito::ServerGuard) -> MarketplaceSpider {
    let search_url = Url::parse(&format!("{}/nx/search/jobs", server.url())).unwrap();
    MarketplaceSpider::new(search_url).unwrap().without_page_delay()
}

#[tokio::test]
async fn test_paginates_and_deduplicates() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::Regex("^q=rust$".into()))
        .with_status(200)
        .with_body(page(&[tile("1", "Rust API"), tile("2", "Rust CLI")]))
        .create_async()
        .await;
    let second = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(page(&[tile("2", "Rust CLI"), tile("3", "Rust WASM")]))
        .create_async()
        .await;

    let jobs = spider_for(&server).fetch_jobs("rust", 2).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;

    let titles: Vec<&str> = jobs.iter().map(|j| j.title()).collect();
    assert_eq!(titles, vec!["Rust API", "Rust CLI", "Rust WASM"]);
    assert_eq!(
        jobs[0].job_url().as_str(),
        format!("{}/jobs/~1", server.url())
    );
    assert_eq!(jobs[0].budget_value().known(), Some(1000.0));
}

#[tokio::test]
async fn test_empty_page_stops_pagination() {
    let mut server = mockito::Server::new_async().await;
    let _first = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::Regex("^q=rust$".into()))
        .with_status(200)
        .with_body(page(&[tile("1", "Rust API")]))
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(page(&[]))
        .create_async()
        .await;
    let third = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_body(page(&[tile("9", "Never fetched")]))
        .expect(0)
        .create_async()
        .await;

    let jobs = spider_for(&server).fetch_jobs("rust", 5).await.unwrap();

    third.assert_async().await;
    assert_eq!(jobs.len(), 1);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _first = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::Regex("^q=rust$".into()))
        .with_status(503)
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(page(&[tile("5", "Recovered")]))
        .create_async()
        .await;

    let jobs = spider_for(&server).fetch_jobs("rust", 2).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "Recovered");
}

#[tokio::test]
async fn test_json_response_and_records_without_url() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"jobs": [
                {"title": "Has link", "job_url": "/jobs/~7", "skills": "Python, SQL"},
                {"title": "No link"}
            ]}"#,
        )
        .create_async()
        .await;

    let jobs = spider_for(&server).fetch_jobs("python", 1).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].skills(), ["Python", "SQL"]);
}

#[tokio::test]
async fn test_custom_schema() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nx/search/jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"<html><body>
                 <li class="posting">
                   <a class="link" href="/gigs/42">Go microservice</a>
                   <div class="summary">gRPC and Postgres</div>
                   <em class="price">$3,000</em>
                   <span class="where">Germany</span>
                   <b class="tag">Go</b><b class="tag">gRPC</b>
                 </li>
               </body></html>"#,
        )
        .create_async()
        .await;

    let schema = JobTileSchema {
        card: "li.posting".into(),
        title: "a.link".into(),
        description: "div.summary".into(),
        budget: "em.price".into(),
        hourly_rate: "em.hourly".into(),
        client_location: "span.where".into(),
        posted_time: "time".into(),
        url: "a.link".into(),
        url_attribute: "href".into(),
        skills: "b.tag".into(),
    };
    let spider = spider_for(&server).with_schema(&schema).unwrap();

    let jobs = spider.fetch_jobs("go", 1).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "Go microservice");
    assert_eq!(jobs[0].job_url().as_str(), format!("{}/gigs/42", server.url()));
    assert_eq!(jobs[0].budget_value().known(), Some(3000.0));
    assert_eq!(jobs[0].client_location(), Some("Germany"));
    assert_eq!(jobs[0].skills(), ["Go", "gRPC"]);
}
