//! Visible text of an element

use lumen_layout::VirtualNode;
use lumen_layout::visibility::is_visible;

/// Rendered text under `node`, whitespace collapsed and trimmed
///
/// Hidden subtrees contribute nothing.
pub fn visible_text<N: VirtualNode>(node: N) -> String {
    let mut raw = String::new();
    collect_text(node, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text<N: VirtualNode>(node: N, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.text() {
            out.push_str(text);
        } else if child.is_element() && is_visible(child) {
            // Block boundaries separate words, inline ones do not
            let block = child.style().is_some_and(|s| s.display.is_block_like());
            if block {
                out.push(' ');
            }
            collect_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// Symbol, punctuation and private-use ranges whose glyphs rarely carry
/// readable text, plus everything outside the Basic Multilingual Plane
pub fn is_non_bmp(c: char) -> bool {
    matches!(c as u32, 0x1D00..=0x1DBF | 0x2000..=0x2BFF | 0xE000..=0xF8FF | 0x10000..)
}

/// Whether every non-space character of `text` is a [`is_non_bmp`] one
pub fn has_only_non_bmp(text: &str) -> bool {
    let mut chars = text.chars().filter(|c| !c.is_whitespace()).peekable();
    chars.peek().is_some() && chars.all(is_non_bmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_bmp_ranges() {
        assert!(is_non_bmp('\u{20A0}'));
        assert!(is_non_bmp('\u{25D3}'));
        assert!(is_non_bmp('\u{E000}'));
        assert!(is_non_bmp('\u{1F600}'));
        assert!(!is_non_bmp('A'));
        assert!(!is_non_bmp('\u{00E9}'));
    }

    #[test]
    fn test_only_non_bmp() {
        assert!(has_only_non_bmp("\u{20A0} \u{20A1} \u{20A2}"));
        assert!(!has_only_non_bmp("\u{20A0} A"));
        assert!(!has_only_non_bmp("   "));
    }
}
