//! Shared helpers for integration tests.
//!
//! [`FakeTranscoder`] stands in for `convert`/`ffmpeg`: it writes a small
//! payload to the output and can be told to fail for particular sources.

#![allow(dead_code)]

use mediaprep_av::{Error, Transcoder};
use mediaprep_common::VariantParams;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct FakeTranscoder {
    /// Sources whose file name contains one of these strings fail.
    pub fail_on: Vec<String>,
    /// Every (input, params) the transcoder was asked to produce.
    pub calls: RefCell<Vec<(PathBuf, VariantParams)>>,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: vec![name.to_string()],
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transcoder for FakeTranscoder {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        params: &VariantParams,
    ) -> mediaprep_av::Result<()> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), params.clone()));

        let name = input.file_name().unwrap().to_string_lossy();
        if self.fail_on.iter().any(|f| name.contains(f.as_str())) {
            return Err(Error::tool_failed("fake", "corrupt input"));
        }

        fs::write(output, params.label())?;
        Ok(())
    }
}

/// Create `rel` under `root` (with parents) holding `contents`.
pub fn touch(root: &Path, rel: &str, contents: &[u8]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

/// Every file below `root`, relative, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
