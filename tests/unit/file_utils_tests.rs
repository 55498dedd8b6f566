/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use subedit::file_utils::{FileManager, FileType};

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path swaps the extension and directory
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/movie.en.srt");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, "vtt"),
        Path::new("/tmp/output/movie.en.vtt")
    );
    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, ".srt"),
        Path::new("/tmp/output/movie.en.srt")
    );
}

/// Test that find_files walks subdirectories and returns sorted results
#[test]
fn test_find_files_withNestedDirectories_shouldFindMatchingExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    fs::create_dir_all(&nested)?;
    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_subtitle(&nested, "a.SRT")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;

    let found = FileManager::find_files(temp_dir.path(), "srt")?;

    assert_eq!(found.len(), 2);
    assert!(found.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(found.iter().all(|path| !path.ends_with("notes.txt")));
    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("deep").join("file.vtt");

    FileManager::write_to_file(&target, "WEBVTT\n\n")?;

    assert_eq!(FileManager::read_to_string(&target)?, "WEBVTT\n\n");
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() {
    let error = FileManager::read_to_string("missing_subtitles.srt").unwrap_err();
    assert!(error.to_string().contains("missing_subtitles.srt"));
}

#[tokio::test]
async fn test_read_to_string_async_shouldMatchBlockingRead() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "async.srt")?;

    let content = FileManager::read_to_string_async(&path).await?;

    assert_eq!(content, FileManager::read_to_string(&path)?);
    Ok(())
}

#[test]
fn test_video_mime_withKnownExtensions_shouldMapToPlayerTypes() {
    assert_eq!(FileManager::video_mime("clip.MP4"), Some("video/mp4"));
    assert_eq!(FileManager::video_mime("clip.webm"), Some("video/webm"));
    assert_eq!(FileManager::video_mime("clip.srt"), None);
    assert_eq!(FileManager::video_mime("no_extension"), None);
}

/// Test file type detection by extension and by content
#[test]
fn test_detect_file_type_withVariousFiles_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let sniffed = common::create_test_subtitle(temp_dir.path(), "movie.txt")?;
    let video = common::create_test_file(temp_dir.path(), "movie.mkv", "")?;
    let other = common::create_test_file(temp_dir.path(), "readme.md", "# hello")?;

    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&sniffed)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("absent.srt")).is_err());
    Ok(())
}
