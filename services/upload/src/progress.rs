//! Upload progress reporting

use tracing::info;

/// Step of an upload, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStage {
    Preparing,
    Uploading,
    Saving,
    Done,
}

impl ProgressStage {
    pub fn percent(&self) -> u8 {
        match self {
            ProgressStage::Preparing => 0,
            ProgressStage::Uploading => 30,
            ProgressStage::Saving => 70,
            ProgressStage::Done => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStage::Preparing => "Preparing upload...",
            ProgressStage::Uploading => "Uploading image...",
            ProgressStage::Saving => "Saving photo details...",
            ProgressStage::Done => "Done!",
        }
    }
}

/// Receives progress updates while an upload runs
pub trait ProgressSink {
    fn update(&mut self, stage: ProgressStage);
}

/// Logs each stage
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn update(&mut self, stage: ProgressStage) {
        info!("[{:>3}%] {}", stage.percent(), stage.label());
    }
}

/// Keeps every stage it is given
impl ProgressSink for Vec<ProgressStage> {
    fn update(&mut self, stage: ProgressStage) {
        self.push(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages() {
        let stages = [
            ProgressStage::Preparing,
            ProgressStage::Uploading,
            ProgressStage::Saving,
            ProgressStage::Done,
        ];

        let percents: Vec<u8> = stages.iter().map(ProgressStage::percent).collect();
        assert_eq!(percents, [0, 30, 70, 100]);
        assert_eq!(ProgressStage::Saving.label(), "Saving photo details...");
        assert!(stages.windows(2).all(|w| w[0] < w[1]));
    }
}
