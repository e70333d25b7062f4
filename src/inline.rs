use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::InlineSpan;

// Pass order is the tie-break rule for ambiguous delimiter runs: links,
// then bold, then italic, then inline code. Each body pattern excludes its
// own delimiter, so `***x***` becomes `*` + bold "x" + `*`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link pattern"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("italic pattern"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code pattern"));

/// Parse one line of text into an ordered sequence of inline spans.
///
/// Total over all inputs; unmatched delimiters stay literal text. Regions
/// claimed by an earlier pass are never revisited by a later one.
pub fn format(text: &str) -> Vec<InlineSpan> {
    let mut spans = vec![InlineSpan::Text(text.to_string())];
    spans = sweep(spans, &LINK_RE, |caps| InlineSpan::Link {
        label: caps[1].to_string(),
        href: caps[2].to_string(),
    });
    spans = sweep(spans, &BOLD_RE, |caps| InlineSpan::bold(&caps[1]));
    spans = sweep(spans, &ITALIC_RE, |caps| InlineSpan::italic(&caps[1]));
    spans = sweep(spans, &CODE_RE, |caps| {
        InlineSpan::Code(caps[1].to_string())
    });
    spans
}

/// Run one substitution pass over the surviving text segments.
fn sweep<F>(spans: Vec<InlineSpan>, re: &Regex, make: F) -> Vec<InlineSpan>
where
    F: Fn(&Captures) -> InlineSpan,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            InlineSpan::Text(text) => {
                let mut last = 0;
                for caps in re.captures_iter(&text) {
                    let m = caps.get(0).expect("whole match");
                    if m.start() > last {
                        out.push(InlineSpan::Text(text[last..m.start()].to_string()));
                    }
                    out.push(make(&caps));
                    last = m.end();
                }
                if last < text.len() {
                    out.push(InlineSpan::Text(text[last..].to_string()));
                }
            }
            other => out.push(other),
        }
    }
    out
}
