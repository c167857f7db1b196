use crate::api::EditorApi;
use crate::config::EditorConfig;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp directory with an `EditorApi` over the real filesystem.
pub struct TestEnv {
    // Dropping the TempDir deletes the directory.
    pub _temp_dir: TempDir,
    pub api: EditorApi<FileStore>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            api: EditorApi::new(FileStore::new(), config),
            root,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("failed to read test file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_edit_save_cycle() {
        let mut env = TestEnv::new();
        let path = env.write("doc.txt", "first\n");

        env.api.load(&path).unwrap();
        env.api.append("second").unwrap();
        env.api.save(crate::api::save_target(None)).unwrap();

        assert_eq!(env.read("doc.txt"), "first\nsecond\n");
        assert!(!env.api.workspace().active().unwrap().is_dirty());
    }
}
