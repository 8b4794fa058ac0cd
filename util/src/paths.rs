use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Resolve a possibly relative path against the current directory.
pub fn absolutize<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Layout of everything the server writes under its media root.
///
/// ```text
/// {root}/exercises/md/*.md
/// {root}/exercises/json/*.json
/// {root}/ppt_outlines/*.md
/// {root}/ppt_files/*.pptx
/// {root}/course_materials/course_{id}/*
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: absolutize(root.into()),
        }
    }

    /// Storage rooted at the configured `MEDIA_ROOT`.
    pub fn from_config() -> Self {
        Self::new(config::media_root())
    }

    pub fn exercises_md_dir(&self) -> PathBuf {
        self.root.join("exercises").join("md")
    }

    pub fn exercises_json_dir(&self) -> PathBuf {
        self.root.join("exercises").join("json")
    }

    pub fn ppt_outlines_dir(&self) -> PathBuf {
        self.root.join("ppt_outlines")
    }

    pub fn ppt_files_dir(&self) -> PathBuf {
        self.root.join("ppt_files")
    }

    pub fn course_materials_root(&self) -> PathBuf {
        self.root.join("course_materials")
    }

    pub fn course_material_dir(&self, course_id: i64) -> PathBuf {
        self.course_materials_root()
            .join(format!("course_{course_id}"))
    }

    /// Creates every directory of the layout.
    pub fn ensure_layout(&self) -> io::Result<()> {
        for dir in [
            self.exercises_md_dir(),
            self.exercises_json_dir(),
            self.ppt_outlines_dir(),
            self.ppt_files_dir(),
            self.course_materials_root(),
        ] {
            ensure_dir(dir)?;
        }
        Ok(())
    }
}
