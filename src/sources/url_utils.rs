use url::Url;

const GITHUB_HOST: &str = "github.com";
const RAW_HOST: &str = "https://raw.githubusercontent.com/";

/// Rewrites a GitHub file page (`github.com/{owner}/{repo}/blob/{ref}/{path}`) to the raw
/// content URL so the CSV itself is downloaded instead of the HTML viewer.
pub fn to_raw_url(url: &Url) -> Url {
    if url.host_str() != Some(GITHUB_HOST) {
        return url.clone();
    }

    let Some(segments) = url.path_segments().map(|s| s.collect::<Vec<_>>()) else {
        return url.clone();
    };

    match segments.as_slice() {
        [owner, repo, "blob", rest @ ..] if !rest.is_empty() => {
            let raw = format!("{RAW_HOST}{owner}/{repo}/{}", rest.join("/"));
            Url::parse(&raw).unwrap_or_else(|_| url.clone())
        }
        _ => url.clone(),
    }
}
