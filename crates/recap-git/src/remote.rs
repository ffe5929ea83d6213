//! Cached clones of remote origins

use std::path::{Path, PathBuf};

use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, RemoteCallbacks};
use tracing::{info, instrument};

use recap_core::error::GitError;

use crate::repository::{GitRepo, Result};

/// Directory remote origins are cloned into
///
/// One subdirectory per origin, named by a sanitized form of the URL.
pub fn cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("recap"))
}

/// Open the cached clone of an origin, cloning it first if needed
///
/// Clones are bare: only history is needed, never a worktree.
#[instrument]
pub fn clone_or_open(origin: &str) -> Result<GitRepo> {
    let cache = cache_dir().ok_or_else(|| {
        GitError::OpenFailed("no cache directory available on this platform".to_string())
    })?;
    let path = cache.join(sanitize_origin(origin));

    if path.exists() {
        return GitRepo::open(&path);
    }

    std::fs::create_dir_all(&cache).map_err(|e| GitError::CloneFailed {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;

    info!(origin, path = %path.display(), "cloning origin into cache");
    RepoBuilder::new()
        .fetch_options(default_fetch_options())
        .bare(true)
        .clone(origin, &path)
        .map_err(|e| GitError::CloneFailed {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

    GitRepo::open(&path)
}

impl GitRepo {
    /// Fetch a branch from origin into its remote-tracking ref
    #[instrument(skip(self), fields(branch))]
    pub fn fetch_branch(&self, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote("origin")
            .map_err(|_| GitError::RemoteNotFound("origin".to_string()))?;

        let refspec = format!("refs/heads/{0}:refs/remotes/origin/{0}", branch);
        remote
            .fetch(&[&refspec], Some(&mut default_fetch_options()), None)
            .map_err(|e| GitError::FetchFailed {
                branch: branch.to_string(),
                reason: e.to_string(),
            })?;

        info!(branch, "fetched branch");
        Ok(())
    }
}

/// Fetch options authenticating through the ssh agent
fn default_fetch_options() -> FetchOptions<'static> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, _allowed_types| {
        Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
    });

    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks);
    options
}

/// Turn an origin URL into a directory name
fn sanitize_origin(origin: &str) -> String {
    origin
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
