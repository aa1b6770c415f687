//! Loading indicator payload and style types.

use std::borrow::Cow;

/// Event key the default [`LoadingTracker`](crate::LoadingTracker) publishes on.
pub const LOADING_EVENT: &str = "loading";

/// Visual style carried with every loading state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingStyle {
    /// Text shown next to the spinner.
    pub text: Cow<'static, str>,
    /// CSS background of the overlay.
    pub background: Cow<'static, str>,
}

impl Default for LoadingStyle {
    fn default() -> Self {
        Self {
            text: Cow::Borrowed("Loading..."),
            background: Cow::Borrowed("rgba(0, 0, 0, 0.7)"),
        }
    }
}

impl LoadingStyle {
    /// Overwrites the fields set in `options`.
    pub fn merge(&mut self, options: LoadingOptions) {
        if let Some(text) = options.text {
            self.text = text;
        }
        if let Some(background) = options.background {
            self.background = background;
        }
    }
}

/// Partial style update; `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingOptions {
    /// New label, if any.
    pub text: Option<Cow<'static, str>>,
    /// New backdrop color, if any.
    pub background: Option<Cow<'static, str>>,
}

impl LoadingOptions {
    /// Sets the label to apply.
    pub fn with_text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the backdrop color to apply (any CSS color string).
    pub fn with_background(mut self, background: impl Into<Cow<'static, str>>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// Payload broadcast on every loading state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingState {
    /// Whether the indicator should be shown.
    pub visible: bool,
    /// Whether the spinner animates; always equal to `visible`.
    pub spinning: bool,
    /// Label shown next to the spinner.
    pub text: Cow<'static, str>,
    /// Backdrop color behind the indicator.
    pub background: Cow<'static, str>,
}

impl LoadingState {
    pub(crate) fn shown(style: &LoadingStyle) -> Self {
        Self::with_style(true, style)
    }

    pub(crate) fn hidden(style: &LoadingStyle) -> Self {
        Self::with_style(false, style)
    }

    fn with_style(on: bool, style: &LoadingStyle) -> Self {
        Self {
            visible: on,
            spinning: on,
            text: style.text.clone(),
            background: style.background.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut style = LoadingStyle::default();
        style.merge(LoadingOptions::default().with_text("Saving..."));

        assert_eq!(style.text, "Saving...");
        assert_eq!(style.background, "rgba(0, 0, 0, 0.7)");
    }

    #[test]
    fn test_states_copy_style() {
        let style = LoadingStyle::default();
        let on = LoadingState::shown(&style);
        let off = LoadingState::hidden(&style);

        assert!(on.visible && on.spinning);
        assert!(!off.visible && !off.spinning);
        assert_eq!(on.text, off.text);
    }
}
