// Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Scratch repository with a commit clock so history order is deterministic
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }
        TestRepo {
            dir,
            repo,
            clock: 1_600_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit a change to README.md on HEAD
    pub fn commit(&mut self, message: &str) -> Oid {
        self.clock += 60;
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");

        fs::write(self.path().join("README.md"), message).expect("Could not write file");
        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find commit");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Could not find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Could not create branch");
    }

    /// Write a file inside the working tree and return its path
    pub fn write_file(&self, name: &str, content: &str) -> std::path::PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Could not write file");
        path
    }
}
