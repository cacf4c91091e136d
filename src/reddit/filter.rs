//! Post filtering heuristics.

use crate::reddit::types::Post;

/// Hosts whose image URLs follow a known pattern.
pub const ALLOWED_HOSTS: [&str; 7] = [
    "imgur.com",
    "iob.imgur.com",
    "i.imgur.com",
    "i.redd.it",
    "i.reddituploads.com",
    "cdn.awwni.me",
    "a.pomf.cat",
];

/// URL suffixes accepted from any host.
const IMAGE_SUFFIXES: [&str; 3] = ["jpg", "jpeg", "png"];

/// Marker that request posts carry in their title.
const REQUEST_MARKER: &str = "[request]";

/// Decide whether a post should be downloaded.
///
/// Accepted posts link to an allow-listed host or directly to an image file,
/// are not self posts, and are not requests. Requests are recognised by the
/// title marker only: the flair is inspected but its verdict is replaced by
/// the title check, so a "Request" or "Fulfilled" flair alone does not reject.
pub fn is_acceptable(post: &Post) -> bool {
    let has_approved_host = ALLOWED_HOSTS.iter().any(|host| post.url.contains(host))
        || IMAGE_SUFFIXES.iter().any(|suffix| post.url.ends_with(suffix));

    let mut is_request = post
        .flair_text
        .as_deref()
        .map(|flair| {
            let flair = flair.to_lowercase();
            flair.contains("request") || flair.contains("fulfilled")
        })
        .unwrap_or(false);
    if is_request {
        tracing::trace!("Flair marks '{}' as a request", post.title);
    }
    is_request = post.title.to_lowercase().contains(REQUEST_MARKER);

    has_approved_host && !post.is_self_post && !is_request
}

/// Keep the acceptable posts, preserving feed order.
pub fn filter_posts(posts: Vec<Post>) -> Vec<Post> {
    let total = posts.len();
    let accepted: Vec<Post> = posts
        .into_iter()
        .filter(|post| {
            let keep = is_acceptable(post);
            if !keep {
                tracing::debug!("Rejected post: {} ({})", post.title, post.url);
            }
            keep
        })
        .collect();

    tracing::info!("Accepted {} of {} posts", accepted.len(), total);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(url: &str, title: &str) -> Post {
        Post::new(url, title)
    }

    #[test]
    fn test_self_posts_rejected() {
        for url in [
            "https://i.imgur.com/abc.jpg",
            "https://example.com/x.png",
            "https://www.reddit.com/r/wallpapers/comments/1",
        ] {
            let mut p = post(url, "Nice wall");
            p.is_self_post = true;
            assert!(!is_acceptable(&p), "{}", url);
        }
    }

    #[test]
    fn test_request_title_rejected() {
        let p = post("https://imgur.com/abc", "[REQUEST] Make this 4k please");
        assert!(!is_acceptable(&p));

        let p = post("https://i.redd.it/abc.png", "Anyone have this? [Request]");
        assert!(!is_acceptable(&p));
    }

    #[test]
    fn test_host_or_suffix_required() {
        assert!(is_acceptable(&post("https://i.imgur.com/abc.jpg", "Forest")));
        assert!(is_acceptable(&post("https://cdn.awwni.me/abc.jpg", "Forest")));
        assert!(is_acceptable(&post("https://example.com/abc.jpeg", "Forest")));
        assert!(!is_acceptable(&post("https://example.com/abc.gif", "Forest")));
        assert!(!is_acceptable(&post("https://example.com/page", "Forest")));
    }

    #[test]
    fn test_flair_alone_does_not_reject() {
        // Pins the current behaviour: the title check replaces the flair verdict
        let mut p = post("https://i.imgur.com/abc.png", "Lake at night");
        p.flair_text = Some("Request".into());
        assert!(is_acceptable(&p));

        p.flair_text = Some("FULFILLED".into());
        assert!(is_acceptable(&p));
    }

    #[test]
    fn test_mixed_feed_keeps_only_plain_image() {
        let mut self_post = post("https://imgur.com/a/xyz", "Discussion");
        self_post.is_self_post = true;
        let request = post("https://imgur.com/abc", "[Request] upscale");
        let plain = post("https://example.com/walls/dunes.png", "Dunes");

        let accepted = filter_posts(vec![self_post, request, plain.clone()]);
        assert_eq!(accepted, vec![plain]);
    }
}
