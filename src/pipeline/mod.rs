//! Main narration pipeline orchestration
//!
//! Coordinates segmentation, bounded parallel synthesis and assembly

mod assemble;
mod narrator;
mod scheduler;

pub use assemble::assemble;
pub use narrator::{NarrationResult, Narrator};
pub use scheduler::Scheduler;

/// Pipeline stage enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Segmentation,
    Synthesis,
    Assembly,
}

impl PipelineStage {
    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Segmentation => "Segmentation",
            PipelineStage::Synthesis => "Synthesis",
            PipelineStage::Assembly => "Assembly",
        }
    }

    /// Get all stages in order
    pub fn all() -> Vec<PipelineStage> {
        vec![
            PipelineStage::Segmentation,
            PipelineStage::Synthesis,
            PipelineStage::Assembly,
        ]
    }
}

/// Estimate spoken duration in seconds
pub fn estimate_duration(text: &str, chars_per_second: f32) -> f32 {
    text.chars().count() as f32 / chars_per_second
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let names: Vec<&str> = PipelineStage::all().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Segmentation", "Synthesis", "Assembly"]);
    }

    #[test]
    fn test_estimate_duration() {
        assert_eq!(estimate_duration("abcdefghij", 5.0), 2.0);
        assert_eq!(estimate_duration("", 15.0), 0.0);
    }
}
