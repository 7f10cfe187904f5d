use std::sync::LazyLock;

use regex::Regex;

static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?\w+;").expect("invalid regex: entity"));
static RE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("invalid regex: script"));
static RE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("invalid regex: style"));
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("invalid regex: tag"));

fn entity(reference: &str) -> Option<&'static str> {
    match reference {
        "&amp;" | "&#038;" => Some("&"),
        "&lt;" => Some("<"),
        "&gt;" => Some(">"),
        "&quot;" | "&#8220;" | "&#8221;" => Some("\""),
        "&#039;" | "&#8217;" | "&apos;" => Some("'"),
        "&#8211;" | "&ndash;" => Some("–"),
        "&#8212;" | "&mdash;" => Some("—"),
        "&nbsp;" => Some(" "),
        _ => None,
    }
}

pub fn decode_entities(s: &str) -> String {
    RE_ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let reference = &caps[0];
            entity(reference).unwrap_or(reference).to_string()
        })
        .into_owned()
}

pub fn strip_tags(html: &str) -> String {
    let without_script = RE_SCRIPT.replace_all(html, " ");
    let without_style = RE_STYLE.replace_all(&without_script, " ");
    let text = RE_TAG.replace_all(&without_style, " ");
    squash_whitespace(&text)
}

pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("Natje&#269;aj &amp; izlo&#382;ba"),
            "Natje&#269;aj & izlo&#382;ba",
            "unknown numeric references pass through"
        );
        assert_eq!(decode_entities("A &amp; B &#8211; C"), "A & B – C");
        assert_eq!(decode_entities("&quot;ZGRAF&quot;"), "\"ZGRAF\"");
    }

    #[test]
    fn test_decode_entities_idempotent() {
        let once = decode_entities("Rok &ndash; 5. prosinca &amp; dalje");
        assert_eq!(decode_entities(&once), once);
    }

    #[test]
    fn test_strip_tags() {
        let html = "<div><h2>Naslov</h2>\n  <p>Rok: <b>26. siječnja 2026.</b></p></div>";
        assert_eq!(strip_tags(html), "Naslov Rok: 26. siječnja 2026.");
    }

    #[test]
    fn test_strip_tags_drops_script_and_style() {
        let html = "<p>before</p><script>var x = \"1 May 2020\";</script><style>.a{}</style><p>after</p>";
        assert_eq!(strip_tags(html), "before after");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("čćžšđ", 3), "čćž");
        assert_eq!(take_chars("ab", 10), "ab");
    }
}
