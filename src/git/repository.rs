use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository as Git2Repo, Sort};

use crate::error::{Result, VersionTagError};
use crate::git::TagSource;

/// Tag source backed by libgit2
pub struct Git2TagSource {
    repo: Git2Repo,
}

impl Git2TagSource {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2TagSource { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2TagSource { repo }
    }

    /// Map every tagged commit to the names of the tags pointing at it.
    ///
    /// Annotated tags are peeled to their commit. Tags on trees or blobs never
    /// show up in a commit walk and are left out.
    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            if let Ok(commit) = reference.peel_to_commit() {
                tags.entry(commit.id()).or_default().push(name.to_string());
            }
        }

        for names in tags.values_mut() {
            names.sort();
        }

        Ok(tags)
    }
}

impl TagSource for Git2TagSource {
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>> {
        let tags = self.tags_by_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        match reference {
            Some(reference) => {
                let commit = self
                    .repo
                    .revparse_single(reference)
                    .and_then(|object| object.peel_to_commit())
                    .map_err(|e| {
                        VersionTagError::vcs(format!(
                            "Cannot resolve reference '{}': {}",
                            reference,
                            e.message()
                        ))
                    })?;
                revwalk.push(commit.id())?;
            }
            None => revwalk.push_head()?,
        }

        let mut history = Vec::new();
        for oid in revwalk {
            if let Some(names) = tags.get(&oid?) {
                history.extend(names.iter().cloned());
            }
        }

        Ok(history)
    }

    fn list_all_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str, seconds: i64) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &git2::Time::new(seconds, 0))
            .unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Git2Repo, name: &str, oid: Oid) {
        repo.tag_lightweight(name, &repo.find_object(oid, None).unwrap(), false)
            .unwrap();
    }

    #[test]
    fn test_history_tags_newest_first() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let first = commit(&repo, "first", 1_000);
        tag(&repo, "v1.0.0", first);
        let second = commit(&repo, "second", 2_000);
        tag(&repo, "v1.1.0", second);
        tag(&repo, "nightly", second);

        let source = Git2TagSource::from_git2(repo);
        let tags = source.list_history_tags(None).unwrap();
        assert_eq!(tags, vec!["nightly", "v1.1.0", "v1.0.0"]);
    }

    #[test]
    fn test_history_tags_limited_by_reference() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let first = commit(&repo, "first", 1_000);
        tag(&repo, "v1.0.0", first);
        let second = commit(&repo, "second", 2_000);
        tag(&repo, "v1.1.0", second);

        let source = Git2TagSource::from_git2(repo);
        let tags = source.list_history_tags(Some("v1.0.0")).unwrap();
        assert_eq!(tags, vec!["v1.0.0"]);
        assert_eq!(source.list_all_tags().unwrap().len(), 2);
    }

    #[test]
    fn test_annotated_tags_are_peeled() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let first = commit(&repo, "first", 1_000);
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        repo.tag(
            "v2.0.0",
            &repo.find_object(first, None).unwrap(),
            &sig,
            "release",
            false,
        )
        .unwrap();

        let source = Git2TagSource::from_git2(repo);
        assert_eq!(source.list_history_tags(None).unwrap(), vec!["v2.0.0"]);
    }

    #[test]
    fn test_unknown_reference_is_vcs_error() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit(&repo, "first", 1_000);

        let source = Git2TagSource::from_git2(repo);
        let err = source.list_history_tags(Some("no-such-ref")).unwrap_err();
        assert!(matches!(err, VersionTagError::Vcs(_)));
        assert!(err.to_string().contains("no-such-ref"));
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        // discover walks upward, so only assert the error type when it fails
        if let Err(err) = Git2TagSource::open(dir.path()) {
            assert!(matches!(err, VersionTagError::Git(_)));
        }
    }
}
