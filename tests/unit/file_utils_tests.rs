/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use bibsort::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "bib.txt", "content")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files and directories
#[test]
fn test_file_exists_withMissingFileOrDirectory_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that read_to_string returns file content unchanged
#[test]
fn test_read_to_string_withValidFile_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "\\begin{thebibliography}{00}\r\n\u{e9}t\u{e9}\n";
    let test_file = common::create_test_file(temp_dir.path(), "bib.txt", content)?;

    assert_eq!(FileManager::read_to_string(&test_file)?, content);

    Ok(())
}

/// Test that reading a missing file reports the path
#[test]
fn test_read_to_string_withMissingFile_shouldFailWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("nope.txt");

    let error = FileManager::read_to_string(&missing).unwrap_err();

    assert!(format!("{}", error).contains("nope.txt"));

    Ok(())
}

/// Test that write_to_file creates parent directories and overwrites
#[test]
fn test_write_to_file_withNestedPath_shouldCreateAndOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("nested").join("sorted_bib.txt");

    FileManager::write_to_file(&target, "first")?;
    FileManager::write_to_file(&target, "second")?;

    assert_eq!(std::fs::read_to_string(&target)?, "second");

    Ok(())
}

/// Test that ensure_dir accepts an empty relative parent
#[test]
fn test_ensure_dir_withEmptyPath_shouldSucceed() {
    assert!(FileManager::ensure_dir("").is_ok());
}
