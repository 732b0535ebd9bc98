// Hash indicator extraction from free-form document text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a hex-encoded SHA-256 digest.
pub const INDICATOR_LEN: usize = 64;

// Contiguous 64-char run first, then the same digest written as 32 byte pairs.
// Byte pairs must be whitespace-separated and bounded on both sides, so shorter
// hashes and labels like "SHA256" never get glued into a 64-char value.
// Whitespace class is ASCII only: tab, LF, FF, CR, space.
static HASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[a-f0-9]{64}|\b[a-f0-9]{2}(?:[\t\n\x0C\r ]+[a-f0-9]{2}){31}\b)")
        .expect("Failed to create hash regex")
});

/// Flattens line breaks into spaces and squeezes double spaces.
///
/// The squeeze is a single non-overlapping pass, so a run of three spaces
/// ends up as two. Downstream matching is tuned to this output.
pub fn normalize_text(text: &str) -> String {
    text.replace('\n', " ")
        .replace('\r', " ")
        .replace("  ", " ")
}

/// Returns every 64-character hex indicator found in `text`, lowercased,
/// in order of appearance. Repeated indicators are kept.
pub fn extract_hashes(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);

    HASH_REGEX
        .find_iter(&normalized)
        .filter_map(|m| {
            let clean: String = m
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            (clean.len() == INDICATOR_LEN).then_some(clean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn byte_pairs(hex: &str, sep: &str) -> String {
        hex.as_bytes()
            .chunks(2)
            .map(|pair| std::str::from_utf8(pair).unwrap())
            .collect::<Vec<_>>()
            .join(sep)
    }

    #[test]
    fn empty_text_has_no_indicators() {
        assert!(extract_hashes("").is_empty());
    }

    #[test]
    fn short_hex_runs_are_ignored() {
        let text = "md5 d41d8cd98f00b204e9800998ecf8427e and sha1 da39a3ee5e6b4b0d3255bfef95601890afd80709";
        assert!(extract_hashes(text).is_empty());
    }

    #[test]
    fn consecutive_md5_hashes_are_not_joined() {
        let text = "d41d8cd98f00b204e9800998ecf8427e\n0cc175b9c0f1b6a831c399e269772661";
        assert!(extract_hashes(text).is_empty());
    }

    #[test]
    fn ioc_table_row_yields_only_sha256() {
        let row = format!(
            "d41d8cd98f00b204e9800998ecf8427e da39a3ee5e6b4b0d3255bfef95601890afd80709 {}",
            HASH
        );
        assert_eq!(extract_hashes(&row), vec![HASH.to_string()]);
    }

    #[test]
    fn grouped_hex_without_pair_separators_is_ignored() {
        let quads: Vec<&str> = HASH
            .as_bytes()
            .chunks(4)
            .map(|q| std::str::from_utf8(q).unwrap())
            .collect();
        assert!(extract_hashes(&quads.join(" ")).is_empty());
    }

    #[test]
    fn isolated_hash_is_found() {
        let text = format!("Dropper SHA256: {} (observed 2024-03-01)", HASH);
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);
    }

    #[test]
    fn uppercase_hash_is_lowercased() {
        let text = format!("hash={}", HASH.to_uppercase());
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);
    }

    #[test]
    fn repeated_hash_is_not_deduplicated() {
        let text = format!("{}\nseen again: {}", HASH, HASH);
        assert_eq!(extract_hashes(&text), vec![HASH.to_string(), HASH.to_string()]);
    }

    #[test]
    fn order_of_appearance_is_kept() {
        let other = "a".repeat(64);
        let text = format!("{} then {}", other, HASH);
        assert_eq!(extract_hashes(&text), vec![other, HASH.to_string()]);
    }

    #[test]
    fn byte_pair_form_matches_contiguous_form() {
        let spaced = byte_pairs(&HASH.to_uppercase(), " ");
        let text = format!("Hex dump: {} end", spaced);
        assert_eq!(extract_hashes(&text), extract_hashes(HASH));
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);
    }

    #[test]
    fn byte_pairs_split_across_lines_are_joined() {
        let spaced = byte_pairs(HASH, " ");
        let (first, second) = spaced.split_at(48);
        let text = format!("{}\r\n{}", first, second);
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);
    }

    #[test]
    fn algorithm_label_is_not_glued_to_hash() {
        let text = format!("SHA256 {}", HASH);
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);

        let spaced = format!("sha256 {}", byte_pairs(HASH, " "));
        assert_eq!(extract_hashes(&spaced), vec![HASH.to_string()]);
    }

    #[test]
    fn long_hex_run_yields_leading_64_chars() {
        let text = format!("{}abcdef", HASH);
        assert_eq!(extract_hashes(&text), vec![HASH.to_string()]);
    }

    #[test]
    fn normalize_flattens_line_breaks() {
        assert_eq!(normalize_text("a\r\nb"), "a b");
        assert_eq!(normalize_text("a\nb\rc"), "a b c");
    }

    #[test]
    fn normalize_squeezes_in_a_single_pass() {
        assert_eq!(normalize_text("a  b"), "a b");
        assert_eq!(normalize_text("a   b"), "a  b");
        assert_eq!(normalize_text("a    b"), "a  b");
    }
}
