//! Change-frequency extraction using libgit2
//!
//! Walks recent history and counts how often each tracked source path was
//! touched, producing the hotspot list the scorer and report consume. A
//! project without usable history yields an empty list, never an error.

use crate::models::Hotspot;
use git2::{DiffOptions, Repository, Sort};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// History walk cap. Keeps hotspot collection bounded on large repos.
const MAX_COMMITS: usize = 500;

/// Collect the `max` most frequently changed files under `root`.
///
/// Counts per-file touches across up to [`MAX_COMMITS`] commits reachable
/// from HEAD, comparing each commit against its first parent (root commits
/// diff against the empty tree). Ties break by path so output is stable.
pub fn collect_hotspots(root: &Path, max: usize) -> Vec<Hotspot> {
    match try_collect(root, max) {
        Ok(hotspots) => hotspots,
        Err(e) => {
            debug!("Skipping git hotspots: {}", e);
            Vec::new()
        }
    }
}

fn try_collect(root: &Path, max: usize) -> Result<Vec<Hotspot>, git2::Error> {
    let repo = Repository::discover(root)?;
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push_head()?;

    let mut touches: HashMap<String, usize> = HashMap::new();
    let mut walked = 0usize;

    for oid in revwalk {
        if walked >= MAX_COMMITS {
            break;
        }
        walked += 1;

        let commit = repo.find_commit(oid?)?;
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut diff_opts = DiffOptions::new();
        let diff =
            repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;

        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path().and_then(|p| p.to_str()) {
                *touches.entry(path.replace('\\', "/")).or_insert(0) += 1;
            }
        }
    }

    debug!("Walked {} commits for hotspot counts", walked);

    let mut hotspots: Vec<Hotspot> = touches
        .into_iter()
        .map(|(path, commits)| Hotspot { path, commits })
        .collect();
    hotspots.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.path.cmp(&b.path)));
    hotspots.truncate(max);
    Ok(hotspots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn commit_file(repo: &Repository, dir: &Path, name: &str, content: &str, msg: &str) {
        fs::write(dir.join(name), content).expect("write");
        let mut index = repo.index().expect("index");
        index.add_path(Path::new(name)).expect("add");
        index.write().expect("index write");
        let tree_id = index.write_tree().expect("tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        let sig = git2::Signature::now("test", "test@example.com").expect("sig");
        let parent = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, msg, &tree, &parents)
            .expect("commit");
    }

    #[test]
    fn test_counts_touches_per_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Repository::init(dir.path()).expect("init");

        commit_file(&repo, dir.path(), "a.js", "1", "one");
        commit_file(&repo, dir.path(), "a.js", "2", "two");
        commit_file(&repo, dir.path(), "b.js", "1", "three");

        let hotspots = collect_hotspots(dir.path(), 10);
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].path, "a.js");
        assert_eq!(hotspots[0].commits, 2);
        assert_eq!(hotspots[1].path, "b.js");
        assert_eq!(hotspots[1].commits, 1);
    }

    #[test]
    fn test_cap_keeps_top_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Repository::init(dir.path()).expect("init");

        commit_file(&repo, dir.path(), "hot.js", "1", "one");
        commit_file(&repo, dir.path(), "hot.js", "2", "two");
        commit_file(&repo, dir.path(), "cold.js", "1", "three");

        let hotspots = collect_hotspots(dir.path(), 1);
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].path, "hot.js");
    }

    #[test]
    fn test_non_repo_yields_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(collect_hotspots(dir.path(), 10).is_empty());
    }

    #[test]
    fn test_empty_repo_yields_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        Repository::init(dir.path()).expect("init");
        assert!(collect_hotspots(dir.path(), 10).is_empty());
    }
}
