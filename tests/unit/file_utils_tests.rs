/*!
 * Tests for file and folder utilities
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use storyshape::file_utils::FileManager;

/// Test shape output path derivation from the story file stem
#[test]
fn test_generate_shape_path_withStoryFile_shouldAppendShapeSuffix() {
    let path = FileManager::generate_shape_path("stories/beowulf.txt", "shapes");
    assert_eq!(path, PathBuf::from("shapes/beowulf.shape.svg"));
}

/// Test default title derivation
#[test]
fn test_story_title_withStoryFile_shouldUseStem() {
    assert_eq!(FileManager::story_title("stories/beowulf.txt"), "beowulf");
    assert_eq!(FileManager::story_title("moby_dick.text"), "moby_dick");
}

/// Test story file detection by extension
#[test]
fn test_is_story_file_withVariousExtensions_shouldMatchTextOnly() -> Result<()> {
    let dir = TempDir::new()?;
    let txt = dir.path().join("a.txt");
    let upper = dir.path().join("b.TXT");
    let srt = dir.path().join("c.srt");
    for path in [&txt, &upper, &srt] {
        fs::write(path, "content")?;
    }

    assert!(FileManager::is_story_file(&txt));
    assert!(FileManager::is_story_file(&upper));
    assert!(!FileManager::is_story_file(&srt));
    assert!(!FileManager::is_story_file(dir.path()));
    assert!(!FileManager::is_story_file(dir.path().join("missing.txt")));
    Ok(())
}

/// Test directory creation is idempotent
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateOnce() -> Result<()> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("a/b/c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));
    // Second call is a no-op
    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test buffered story opening surfaces missing files as errors
#[test]
fn test_open_story_withMissingFile_shouldFail() {
    let result = FileManager::open_story("definitely/not/here.txt");
    assert!(result.is_err());
}
