#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// A Distance-mode export with messy headers, a subject block behind the
/// delivery-of-lecture anchor, and a text column that ends the block.
pub const DISTANCE_CSV: &str = "\
Timestamp, Programme ,Rate the Overall Experience,Learner Support Centre,Ease of Admission Process, Delivery of Lecture ,S1,S2,Remarks,S3
2024-01-05,B.Ed,4,HQ Centre,5,4,Maths,Physics,good,5
2024-01-06,B.Ed,5,HQ Centre,4,5,4,3,,4
2024-01-07,B.Ed,3,City Centre,,3,5,4,fine,3
";

/// An Online-mode export covering only a subset of the Distance columns.
pub const ONLINE_CSV: &str = "\
Timestamp,Rate the Overall Experience,Delivery of Lecture
2024-02-01,1,1
2024-02-02,2,2
";

pub fn write_standard_fixtures(workspace: &TestWorkspace) -> Vec<PathBuf> {
    vec![
        workspace.write("distance_bed.csv", DISTANCE_CSV),
        workspace.write("online_mca.csv", ONLINE_CSV),
    ]
}
