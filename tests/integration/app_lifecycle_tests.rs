/*!
 * Full app lifecycle tests using the offline mock provider
 */

use std::fs;

use anyhow::Result;

use storyshape::app_config::{Config, ScorerProvider, TokenizerKind};
use storyshape::app_controller::Controller;
use storyshape::file_utils::FileManager;

use crate::common;

fn offline_config() -> Config {
    let mut config = Config::default();
    config.scorer.provider = ScorerProvider::Mock;
    config.tokenizer.kind = TokenizerKind::Whitespace;
    config.segment_length = 1;
    config.window_length = 3;
    config.stride = 1;
    config
}

/// Test a full run over one story file producing a shape SVG
#[tokio::test]
async fn test_controller_withMockProvider_shouldWriteShape() -> Result<()> {
    let story = common::write_story(common::nine_word_body())?;
    let output_dir = story.dir.path().to_path_buf();

    let controller = Controller::with_config(offline_config())?;
    controller
        .run(story.path.clone(), output_dir.clone(), Some("Test Story"), false)
        .await?;

    let shape_path = FileManager::generate_shape_path(&story.path, &output_dir);
    let svg = fs::read_to_string(&shape_path)?;
    assert!(svg.contains("<polyline"));
    assert!(svg.contains("TEST STORY"));
    Ok(())
}

/// Test that an existing shape is preserved unless overwrite is forced
#[tokio::test]
async fn test_controller_withExistingShape_shouldRespectForceFlag() -> Result<()> {
    let story = common::write_story(common::nine_word_body())?;
    let output_dir = story.dir.path().to_path_buf();
    let shape_path = FileManager::generate_shape_path(&story.path, &output_dir);

    fs::write(&shape_path, "placeholder")?;

    let controller = Controller::with_config(offline_config())?;

    // Without force the placeholder survives
    controller
        .run(story.path.clone(), output_dir.clone(), None, false)
        .await?;
    assert_eq!(fs::read_to_string(&shape_path)?, "placeholder");

    // With force it is replaced by a real shape
    controller
        .run(story.path.clone(), output_dir.clone(), None, true)
        .await?;
    assert!(fs::read_to_string(&shape_path)?.starts_with("<svg"));
    Ok(())
}

/// Test processing a directory of stories
#[tokio::test]
async fn test_controller_withStoryFolder_shouldShapeEveryTxt() -> Result<()> {
    let story = common::write_story(common::nine_word_body())?;
    let dir = story.dir.path().to_path_buf();

    // A second story and one non-story file in the same directory
    let other = dir.join("another.txt");
    fs::copy(&story.path, &other)?;
    fs::write(dir.join("notes.md"), "not a story")?;

    let controller = Controller::with_config(offline_config())?;
    controller.run_folder(dir.clone(), false).await?;

    assert!(FileManager::file_exists(dir.join("story.shape.svg")));
    assert!(FileManager::file_exists(dir.join("another.shape.svg")));
    assert!(!FileManager::file_exists(dir.join("notes.shape.svg")));
    Ok(())
}

/// Test that a missing input file is an error
#[tokio::test]
async fn test_controller_withMissingInput_shouldFail() -> Result<()> {
    let controller = Controller::with_config(offline_config())?;
    let result = controller
        .run(
            "definitely/not/here.txt".into(),
            ".".into(),
            None,
            false,
        )
        .await;
    assert!(result.is_err());
    Ok(())
}
