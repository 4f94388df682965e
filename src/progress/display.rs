//! Progress bar coordination for a run.

use super::style::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Coordinates the batch bar and the per-transfer bars of one run.
///
/// Progress output never affects a transfer: bars are drawn best-effort and
/// everything is hidden when the style options disable them.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
    show_main_progress: bool,
}

impl ProgressDisplay {
    /// Create a display for `total_tasks` tasks.
    ///
    /// The batch bar is only shown when there is more than one task.
    pub fn new(style_options: StyleOptions, total_tasks: usize) -> Self {
        let multi = if style_options.is_enabled() {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let show_main_progress = total_tasks > 1 && style_options.main().enabled;

        let main = if show_main_progress {
            let main = multi.add(
                style_options
                    .main()
                    .to_progress_bar(Some(total_tasks as u64)),
            );
            main.tick();
            main
        } else {
            ProgressBar::hidden()
        };

        Self {
            multi,
            main,
            style_options,
            show_main_progress,
        }
    }

    /// A display that draws nothing.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden(), 0)
    }

    /// Create the bar of one transfer.
    ///
    /// `total` is the declared size when known, `position` the offset a
    /// resumed transfer starts from.
    pub fn start_transfer(&self, label: &str, total: Option<u64>, position: u64) -> ProgressBar {
        let pb = self
            .style_options
            .child()
            .to_progress_bar(total)
            .with_position(position)
            .with_message(label.to_string());
        if pb.is_hidden() {
            return pb;
        }
        self.multi.add(pb)
    }

    /// Finish a transfer bar based on configuration.
    pub fn finish_transfer(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }

    /// Count one finished task on the batch bar.
    pub fn task_finished(&self) {
        self.main.inc(1);
    }

    /// Finish the batch bar.
    pub fn finish(&self) {
        if self.show_main_progress {
            if self.style_options.main().clear {
                self.main.finish_and_clear();
            } else {
                self.main.finish();
            }
        }
    }
}
