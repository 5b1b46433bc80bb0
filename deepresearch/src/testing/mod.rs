//! Testing utilities for the research pipeline.
//!
//! This module provides:
//! - Mock text-generation and search providers with call recording
//! - Scripted stages for exercising the runner

mod mocks;

pub use mocks::{
    MockSearchProvider, MockTextGenerator, PanickingStage, RecordedGeneration, ScriptedStage,
};
