//! Filename derivation for downloaded images and album directories.

/// Extensions recognised as direct image links.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Extension appended when a URL carries none we recognise.
const FALLBACK_EXTENSION: &str = ".jpg";

/// Directory name used when an album title sanitizes to nothing.
const UNTITLED_ALBUM: &str = "untitled";

/// Longest directory name, in bytes, common filesystems accept.
const MAX_DIR_NAME_BYTES: usize = 255;

/// Naming convention for one image host.
struct HostRule {
    host: &'static str,
    tag: &'static str,
    /// Extension to use instead of the one in the URL.
    fixed_extension: Option<&'static str>,
}

/// Host rules in precedence order; the first match wins.
///
/// Imgur is absent on purpose: imgur images are named from API metadata
/// by the imgur downloader.
const HOST_RULES: &[HostRule] = &[
    HostRule {
        host: "i.redd.it",
        tag: "reddit",
        fixed_extension: None,
    },
    // These URLs are long and never contain the file extension
    HostRule {
        host: "i.reddituploads.com",
        tag: "reddit",
        fixed_extension: Some(".png"),
    },
    HostRule {
        host: "cdn.awwni.me",
        tag: "awwnime",
        fixed_extension: None,
    },
    HostRule {
        host: "a.pomf.cat",
        tag: "apomfcat",
        fixed_extension: None,
    },
];

/// Derive the destination filename for an image URL.
///
/// Known hosts produce `<id> - <tag><ext>`. Anything else keeps the final path
/// segment when it already ends in an image extension, and otherwise gets `.jpg`
/// appended whether or not that is the real format.
pub fn derive_filename(url: &str) -> String {
    if let Some(rule) = HOST_RULES.iter().find(|rule| url.contains(rule.host)) {
        let (id, extension) = split_identifier(url);
        let extension = rule
            .fixed_extension
            .or(extension)
            .unwrap_or(FALLBACK_EXTENSION);

        return normalize_extension(&format!(
            "{} - {}{}",
            id,
            rule.tag,
            extension.to_lowercase()
        ));
    }

    let segment = last_segment(url);
    if IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        segment.to_string()
    } else {
        format!("{}{}", segment, FALLBACK_EXTENSION)
    }
}

/// Filename for an image served by imgur, from its id and MIME type.
///
/// `image/jpeg` becomes `.jpg`; other subtypes are used as the extension as-is.
pub fn imgur_filename(image_id: &str, mime_type: &str) -> String {
    let subtype = mime_type
        .strip_prefix("image/")
        .unwrap_or(mime_type)
        .trim();
    let subtype = if subtype.is_empty() { "jpg" } else { subtype };

    normalize_extension(&format!("{} - imgur.{}", image_id, subtype))
}

/// Turn an album title into a single filesystem-safe directory name.
///
/// A trailing separator is dropped and the remaining path separators become
/// underscores, so the album always lands directly under the albums directory.
/// Long titles are cut to [`MAX_DIR_NAME_BYTES`] on a character boundary.
pub fn album_dir_name(title: &str) -> String {
    let title = title.strip_suffix('/').unwrap_or(title);

    let sanitized: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = truncate_bytes(&sanitized, MAX_DIR_NAME_BYTES).trim();
    match trimmed {
        "" => UNTITLED_ALBUM.to_string(),
        "." | ".." => trimmed.replace('.', "_"),
        _ => trimmed.to_string(),
    }
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn normalize_extension(name: &str) -> String {
    name.replace(".jpeg", ".jpg")
}

/// Everything after the last `/` of the path; query and fragment are ignored.
fn last_segment(url: &str) -> &str {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or(url);
    path.rfind('/').map_or(path, |idx| &path[idx + 1..])
}

/// Split the final path segment into an identifier and an optional extension
/// (with its dot).
fn split_identifier(url: &str) -> (&str, Option<&str>) {
    let segment = last_segment(url);

    match segment.rfind('.') {
        Some(idx) if idx > 0 => (&segment[..idx], Some(&segment[idx..])),
        _ => (segment, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reddit_hosted_image() {
        assert_eq!(
            derive_filename("https://i.redd.it/abc123.png"),
            "abc123 - reddit.png"
        );
        assert_eq!(
            derive_filename("https://i.redd.it/abc123.jpeg"),
            "abc123 - reddit.jpg"
        );
    }

    #[test]
    fn test_reddituploads_uses_png() {
        assert_eq!(
            derive_filename("https://i.reddituploads.com/4f2a9b?fit=max&h=1536&w=1536&s=e1"),
            "4f2a9b - reddit.png"
        );
    }

    #[test]
    fn test_awwnime_and_pomf() {
        assert_eq!(
            derive_filename("https://cdn.awwni.me/zq8r.JPEG"),
            "zq8r - awwnime.jpg"
        );
        assert_eq!(
            derive_filename("https://a.pomf.cat/xkcdq.png"),
            "xkcdq - apomfcat.png"
        );
    }

    #[test]
    fn test_slash_in_query_is_not_a_path_separator() {
        assert_eq!(
            derive_filename("https://i.reddituploads.com/4f2a9b?fit=max&s=ab/cd"),
            "4f2a9b - reddit.png"
        );
        assert_eq!(
            derive_filename("https://cdn.awwni.me/zq8r.png?ref=https://x.org/y"),
            "zq8r - awwnime.png"
        );
        assert_eq!(
            derive_filename("https://i.redd.it/abc.jpg#frag/ment"),
            "abc - reddit.jpg"
        );
    }

    #[test]
    fn test_host_rule_never_yields_jpeg() {
        let urls = [
            "https://i.redd.it/a.jpeg",
            "https://i.redd.it/b.jpeg.jpeg",
            "https://cdn.awwni.me/c.jpeg?x=1",
            "https://a.pomf.cat/d",
            "https://i.reddituploads.com/e.jpeg",
        ];
        for url in urls {
            assert!(!derive_filename(url).contains(".jpeg"), "{}", url);
        }
    }

    #[test]
    fn test_host_rule_without_extension() {
        assert_eq!(derive_filename("https://i.redd.it/noext"), "noext - reddit.jpg");
    }

    #[test]
    fn test_fallback_keeps_image_segment() {
        assert_eq!(
            derive_filename("https://example.com/walls/sunset.png"),
            "sunset.png"
        );
        assert_eq!(
            derive_filename("https://example.com/walls/sunset.jpeg"),
            "sunset.jpeg"
        );
        assert_eq!(derive_filename("https://example.com/a/b/c.jpg"), "c.jpg");
    }

    #[test]
    fn test_fallback_appends_jpg() {
        assert_eq!(
            derive_filename("https://example.com/image/12345"),
            "12345.jpg"
        );
        // Wrong extension is a known limitation of the fallback
        assert_eq!(
            derive_filename("https://example.com/image.gif"),
            "image.gif.jpg"
        );
    }

    #[test]
    fn test_imgur_filename() {
        assert_eq!(imgur_filename("AbCdE", "image/jpeg"), "AbCdE - imgur.jpg");
        assert_eq!(imgur_filename("AbCdE", "image/png"), "AbCdE - imgur.png");
        assert_eq!(imgur_filename("AbCdE", ""), "AbCdE - imgur.jpg");
    }

    #[test]
    fn test_album_dir_name() {
        assert_eq!(album_dir_name("Mountains at dawn"), "Mountains at dawn");
        assert_eq!(album_dir_name("Day/Night pair/"), "Day_Night pair");
        assert_eq!(album_dir_name("What? A: test"), "What_ A_ test");
        assert_eq!(album_dir_name(".."), "__");
        assert_eq!(album_dir_name("   "), "untitled");
        assert_eq!(album_dir_name("  Padded  "), "Padded");
    }

    #[test]
    fn test_long_album_title_fits_one_component() {
        let name = album_dir_name(&"A".repeat(300));
        assert_eq!(name.len(), MAX_DIR_NAME_BYTES);

        // Two-byte characters straddling the limit are dropped whole
        let name = album_dir_name(&"é".repeat(200));
        assert_eq!(name, "é".repeat(127));

        let name = album_dir_name(&format!("{} tail", "w".repeat(254)));
        assert_eq!(name, "w".repeat(254));

        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(album_dir_name(&"A".repeat(300)))).unwrap();
    }
}
