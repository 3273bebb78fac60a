//! Terminal progress bars for the generation pipeline.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use plugkit_core::application::ports::{ProgressEvent, ProgressObserver};
use plugkit_core::error::Stage;

const BYTES_TEMPLATE: &str = "{spinner:.green} {msg:<12} [{bar:30.cyan/blue}] {bytes}/{total_bytes}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg:<12} {bytes}";
const COUNT_TEMPLATE: &str = "{spinner:.green} {msg:<12} [{bar:30.cyan/blue}] {pos}/{len}";

/// One bar per stage, replaced when the next stage starts.
#[derive(Default)]
pub struct BarObserver {
    current: Mutex<Option<(Stage, ProgressBar)>>,
}

impl BarObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn label(stage: Stage) -> &'static str {
    match stage {
        Stage::Fetch => "Downloading",
        Stage::Materialize => "Extracting",
        Stage::Substitute => "Renaming",
        Stage::Cleanup => "Cleaning up",
    }
}

fn bar_for(event: &ProgressEvent) -> ProgressBar {
    let (bar, template) = match (event.stage, event.total) {
        (Stage::Fetch, Some(total)) => (ProgressBar::new(total), BYTES_TEMPLATE),
        (Stage::Fetch, None) => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
        (_, total) => (ProgressBar::new(total.unwrap_or(0)), COUNT_TEMPLATE),
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(label(event.stage));
    bar
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, event: ProgressEvent) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        match current.as_ref() {
            Some((stage, bar)) if *stage == event.stage => bar.set_position(event.current),
            _ => {
                if let Some((_, old)) = current.take() {
                    old.finish_and_clear();
                }
                let bar = bar_for(&event);
                bar.set_position(event.current);
                *current = Some((event.stage, bar));
            }
        }
    }

    fn on_stage_end(&self, stage: Stage) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if current.as_ref().is_some_and(|(s, _)| *s == stage) {
            if let Some((_, bar)) = current.take() {
                bar.finish_and_clear();
            }
        }
    }
}
