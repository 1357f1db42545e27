//! Query-string construction for the listing endpoint

use crate::contract::{ListParams, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Build the listing query pairs in the order the backend documents them.
///
/// Defaults are filled in for page, page size, nsfw, sort and order. `q` and
/// `tags` are only sent when non-empty, `rating` only when set.
pub fn list_query(params: &ListParams) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(8);

    pairs.push(("page", params.page.unwrap_or(DEFAULT_PAGE).to_string()));
    pairs.push((
        "pageSize",
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
    ));
    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        pairs.push(("q", q.to_string()));
    }
    if !params.tags.is_empty() {
        pairs.push(("tags", params.tags.join(",")));
    }
    pairs.push(("nsfw", params.nsfw.unwrap_or_default().as_str().to_string()));
    pairs.push(("sort", params.sort.unwrap_or_default().as_str().to_string()));
    pairs.push(("order", params.order.unwrap_or_default().as_str().to_string()));
    if let Some(rating) = params.rating {
        pairs.push(("rating", rating.to_string()));
    }

    pairs
}

/// Render the pairs as an `application/x-www-form-urlencoded` string
pub fn encode(pairs: &[(&'static str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish()
}
