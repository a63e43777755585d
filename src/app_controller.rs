use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;

use crate::app_config::{Config, ScorerProvider, TokenizerKind};
use crate::file_utils::FileManager;
use crate::providers::inference::InferenceScorer;
use crate::providers::mock::MockScorer;
use crate::providers::tokens::{
    HeuristicTokenCounter, PretrainedTokenCounter, WhitespaceTokenCounter,
};
use crate::providers::{SentimentScorer, TokenCounter};
use crate::render::ShapeRenderer;
use crate::trajectory::{self, TrajectoryOptions};

// @module: Application controller for story shape generation

/// Main application controller: wires config, providers, pipeline and renderer
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Build the token counter selected by the configuration
    fn build_counter(&self) -> Result<Box<dyn TokenCounter>> {
        match self.config.tokenizer.kind {
            TokenizerKind::Heuristic => Ok(Box::new(HeuristicTokenCounter)),
            TokenizerKind::Whitespace => Ok(Box::new(WhitespaceTokenCounter)),
            TokenizerKind::Pretrained => {
                let counter = PretrainedTokenCounter::from_file(&self.config.tokenizer.path)?;
                Ok(Box::new(counter))
            }
        }
    }

    /// Build the sentiment scorer selected by the configuration
    fn build_scorer(&self) -> Result<Arc<dyn SentimentScorer>> {
        match self.config.scorer.provider {
            ScorerProvider::Inference => Ok(Arc::new(InferenceScorer::new(
                self.config.scorer.api_key.clone(),
                self.config.scorer.endpoint.clone(),
                self.config.scorer.model.clone(),
                self.config.scorer.max_chars_per_request,
                self.config.scorer.timeout_secs,
            ))),
            ScorerProvider::Mock => {
                warn!("Using the mock scorer; every segment scores positive 0.9");
                Ok(Arc::new(MockScorer::working()))
            }
        }
    }

    /// Trajectory options derived from the configuration
    fn trajectory_options(&self) -> TrajectoryOptions {
        TrajectoryOptions::new(
            self.config.segment_length,
            self.config.window_length,
            self.config.stride,
        )
        .with_markers(self.config.markers.to_markers())
    }

    /// Run the main workflow for one story file
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        title: Option<&str>,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::ensure_dir(&output_dir)?;

        let shape_path = FileManager::generate_shape_path(&input_file, &output_dir);
        if FileManager::file_exists(&shape_path) && !force_overwrite {
            warn!(
                "Shape already exists: {:?}. Use -f to force overwrite.",
                shape_path
            );
            return Ok(());
        }

        let counter = self.build_counter()?;
        let scorer = self.build_scorer()?;

        debug!(
            "Testing connection to the {} scorer",
            self.config.scorer.provider.display_name()
        );
        scorer
            .test_connection()
            .await
            .context("Scorer connection test failed")?;

        info!("Building trajectory for {:?}", input_file);
        let reader = FileManager::open_story(&input_file)?;

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));

        let options = self.trajectory_options();
        let pb = progress.clone();
        let trajectory = trajectory::build_trajectory_with_progress(
            reader,
            counter.as_ref(),
            scorer,
            &options,
            move |count| pb.set_message(format!("Scored {} segments", count)),
        )
        .await
        .context("Failed to build trajectory")?;
        progress.finish_and_clear();

        if trajectory.is_empty() {
            warn!(
                "Empty trajectory for {:?} (no story body between markers?)",
                input_file
            );
        }

        let title = title
            .map(|t| t.to_string())
            .unwrap_or_else(|| FileManager::story_title(&input_file));
        ShapeRenderer::default().render_to_file(&trajectory, &title, &shape_path)?;

        info!(
            "Done: {} trajectory points in {:.1}s -> {:?}",
            trajectory.len(),
            start_time.elapsed().as_secs_f64(),
            shape_path
        );
        Ok(())
    }

    /// Run the workflow for every story file under a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Scanning {:?} for story files", input_dir);
        let mut processed_count = 0;

        for entry in WalkDir::new(&input_dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !FileManager::is_story_file(path) {
                continue;
            }

            info!("Processing story: {:?}", path);
            let output_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            if let Err(e) = self
                .run(path.to_path_buf(), output_dir, None, force_overwrite)
                .await
            {
                error!("Error processing {:?}: {}", path, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} stories", processed_count);
        Ok(())
    }
}
