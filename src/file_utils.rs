use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

/// Extensions treated as story text files when scanning a directory
const STORY_EXTENSIONS: [&str; 2] = ["txt", "text"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Open a story file for buffered line-by-line reading
    pub fn open_story<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let path = path.as_ref();
        let file =
            File::open(path).context(format!("Failed to open story file: {:?}", path))?;
        Ok(BufReader::new(file))
    }

    // @checks: Story text extension
    pub fn is_story_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| STORY_EXTENSIONS.contains(&e.to_lowercase().as_str()))
    }

    // @generates: Output path for the rendered shape
    // @params: input_file, output_dir
    pub fn generate_shape_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(".shape.svg");

        output_dir.join(output_filename)
    }

    /// Default title for a story: its file stem
    pub fn story_title<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "story".to_string())
    }
}
