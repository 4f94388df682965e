//! Progress bar styling options.

use indicatif::{ProgressBar, ProgressStyle};

/// Style options for the batch bar and the per-transfer bars.
///
/// By default both bars are hidden; [`StyleOptions::visible`] gives a batch
/// bar that stays on screen and transfer bars that clear once done.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Options for the bar counting finished tasks.
    pub(crate) main: ProgressBarOpts,
    /// Options for the bar of a single transfer.
    pub(crate) child: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::hidden()
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(main: ProgressBarOpts, child: ProgressBarOpts) -> Self {
        Self { main, child }
    }

    /// Both bars hidden.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Visible bars with the default templates.
    pub fn visible() -> Self {
        Self {
            main: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_BAR_WITH_POSITION.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
                enabled: true,
                clear: false,
            },
            child: ProgressBarOpts::with_transfer_style(),
        }
    }

    /// Return `false` if neither the main nor the child bar is enabled.
    pub fn is_enabled(&self) -> bool {
        self.main.enabled || self.child.enabled
    }

    /// Get a reference to the main progress bar options.
    pub fn main(&self) -> &ProgressBarOpts {
        &self.main
    }

    /// Get a reference to the child progress bar options.
    pub fn child(&self) -> &ProgressBarOpts {
        &self.child
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set, at least 3 characters for the
    /// "filled", "current", and "to do" states.
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template representing the bar and its position.
    ///
    ///`███████████████████████████████████████ 11/12 (99%) eta 00:00:02`
    pub const TEMPLATE_BAR_WITH_POSITION: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue}";
    /// Template for a single transfer, labelled with the resource name.
    ///
    /// `|==========..........| 211.23 KiB/1.02 MiB file.bin`
    pub const TEMPLATE_TRANSFER: &'static str =
        "|{bar:10}| {bytes:>11}/{total_bytes:<11} {msg}";
    /// Template for a transfer of unknown size.
    pub const TEMPLATE_TRANSFER_UNKNOWN: &'static str = "{spinner} {bytes:>11} {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use equals signs and dots: `"=>."`.
    pub const CHARS_ASCII: &'static str = "=>.";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = &self.template {
            if let Ok(templated) = ProgressStyle::default_bar().template(template) {
                style = templated;
            }
        }
        if let Some(progress_chars) = &self.progress_chars {
            style = style.progress_chars(progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] of `len` based on the provided options.
    pub fn to_progress_bar(&self, len: Option<u64>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        match len {
            Some(len) => ProgressBar::new(len).with_style(self.to_progress_style()),
            None => {
                let style = ProgressStyle::default_spinner()
                    .template(Self::TEMPLATE_TRANSFER_UNKNOWN)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                ProgressBar::no_length().with_style(style)
            }
        }
    }

    /// Options for a labelled transfer bar.
    pub fn with_transfer_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_TRANSFER.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_ASCII.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
