//! Checks the model's reply against the markdown template it was asked for.
//!
//! The model is only *told* to produce `N. **name**: reason` lines; nothing
//! forces it to. A reply that doesn't contain the three numbered entries is
//! still published, but wrapped so the issue reads sensibly.

const HEADING: &str = "# 오늘 뭐 먹지?";
const FALLBACK_NOTE: &str = "> 추천 결과가 약속된 형식과 달라 원문을 그대로 옮깁니다.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub number: u32,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecommendation {
    text: String,
    items: Vec<MenuItem>,
}

impl MenuRecommendation {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let items = segments(&text).filter_map(parse_item).collect();
        Self { text, items }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Entries 1, 2 and 3 are all present.
    pub fn is_well_formed(&self) -> bool {
        (1..=3).all(|n| self.items.iter().any(|item| item.number == n))
    }

    /// Issue body: the reply verbatim when it follows the template, otherwise
    /// the reply under a heading and a short note.
    pub fn issue_body(&self) -> String {
        if self.is_well_formed() {
            return self.text.clone();
        }

        let heading = if self.text.trim_start().starts_with(HEADING) {
            String::new()
        } else {
            format!("{HEADING}\n\n")
        };
        format!("{heading}{FALLBACK_NOTE}\n\n{}", self.text)
    }
}

/// Split on newlines and the `<br>` variants the template uses.
fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| {
        line.split("</br>")
            .flat_map(|s| s.split("<br/>"))
            .flat_map(|s| s.split("<br />"))
            .flat_map(|s| s.split("<br>"))
    })
}

/// `1. **name**: reason`, also accepting `1. **name:** reason`.
fn parse_item(segment: &str) -> Option<MenuItem> {
    let (number, rest) = segment.trim().split_once('.')?;
    let number: u32 = number.trim().parse().ok()?;

    let rest = rest.trim_start().strip_prefix("**")?;
    let (name, rest) = rest.split_once("**")?;

    let (name, reason) = match rest.trim_start().strip_prefix(':') {
        Some(reason) => (name.trim(), reason),
        None => (name.trim().strip_suffix(':')?.trim_end(), rest),
    };
    let reason = reason.trim();

    if name.is_empty() || reason.is_empty() {
        return None;
    }

    Some(MenuItem {
        number,
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
