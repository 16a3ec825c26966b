#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "_",
        }
    }
}

/// Wraps `selected` in the emphasis marker, or unwraps it if it is already
/// wrapped. Surrounding whitespace stays outside the markers.
pub fn toggle_emphasis(selected: &str, emphasis: Emphasis) -> String {
    let marker = emphasis.marker();
    let trimmed_start = selected.trim_start();
    let leading = &selected[..selected.len() - trimmed_start.len()];
    let core = trimmed_start.trim_end();
    let trailing = &trimmed_start[core.len()..];

    let toggled = match core
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_suffix(marker))
    {
        Some(inner) if core.len() >= marker.len() * 2 => inner.to_string(),
        _ => format!("{marker}{core}{marker}"),
    };

    format!("{leading}{toggled}{trailing}")
}
