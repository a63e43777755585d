/*!
 * # storyshape - Story Shapes from Sentiment Trajectories
 *
 * A Rust library for deriving the emotional trajectory of a narrative text.
 *
 * ## Features
 *
 * - Boilerplate-aware, token-budget-driven segmentation of story text
 * - Sentiment scoring of each segment through an external classifier
 * - Rolling-average smoothing with a configurable window and stride
 * - Rendering of the smoothed trajectory as an SVG story shape
 * - Configurable boundary markers (Project Gutenberg defaults)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `story_processor`: Story reading and token-budget segmentation
 * - `trajectory`: Sentiment trajectory pipeline:
 *   - `trajectory::rolling`: Rolling window and averaging
 *   - `trajectory::stream`: Segment scoring adapter
 * - `providers`: Clients satisfying the external contracts:
 *   - `providers::inference`: Text-classification endpoint client
 *   - `providers::tokens`: Token counter implementations
 *   - `providers::mock`: Scripted scorers for testing
 * - `render`: SVG story-shape rendering
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod render;
pub mod story_processor;
pub mod trajectory;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TrajectoryError};
pub use providers::{Sentiment, SentimentLabel, SentimentScorer, TokenCounter};
pub use story_processor::{BoundaryMarkers, StorySegmenter};
pub use trajectory::{
    RollingAverager, TrajectoryOptions, build_trajectory, build_trajectory_with_progress,
    rolling_average,
};
