use eframe::egui::Color32;

/// Lifecycle of one fetch-backed view. Exactly one variant is active at
/// a time; a new activation restarts at `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    /// Transition out of `Loading` from the outcome of the single fetch
    /// issued at activation.
    pub fn resolve(outcome: Result<T, String>) -> Self {
        match outcome {
            Ok(value) => Self::Loaded(value),
            Err(message) => Self::Failed(message),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Converts a `#rrggbb` palette entry into an egui color. Malformed
/// input falls back to gray instead of poisoning the frame.
pub fn hex_color32(hex: &str) -> Color32 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Color32::GRAY;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color32::from_rgb(r, g, b),
        _ => Color32::GRAY,
    }
}
