//! Search URL construction.

use url::Url;

/// Default marketplace search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.upwork.com/nx/search/jobs";

/// Build the URL of one search results page.
///
/// The query is form-encoded into `q`; `page` is only added for pages
/// after the first, matching how the marketplace links its own pagination.
pub fn build_search_url(base: &Url, query: &str, page: u32) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear().append_pair("q", query);
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    url
}
