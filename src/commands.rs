//! Implementations of the CLI subcommands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use gistpress_config::{Config, auth, persistence, settings};
use gistpress_github::{ClientOptions, GitHubClient};
use gistpress_protocol::{Post, PostId, failure_message};
use gistpress_sync::{
    Credentials, FileStore, MemoryStore, PostStore, SyncOutcome, SyncStatus, SyncTrigger,
    Synchronizer, canonical_post,
};
use secrecy::SecretString;
use tracing::{info, warn};

/// Loads the configuration from `path`, or from the default locations.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };

    match path.map(Path::to_path_buf).or_else(persistence::find_config_file) {
        Some(found) => info!(path = %found.display(), "loaded configuration"),
        None => info!("no configuration file found, using defaults"),
    }

    Ok(config)
}

fn build_client(config: &Config) -> anyhow::Result<GitHubClient> {
    let options = ClientOptions::default()
        .with_base_url(config.api.base_url.clone())
        .with_timeout(config.api.timeout());
    GitHubClient::new(options).context("failed to create GitHub client")
}

fn open_store(config: &Config) -> anyhow::Result<FileStore> {
    let store = match &config.data_dir {
        Some(dir) => FileStore::with_path(dir.clone()),
        None => FileStore::new(),
    };
    store.context("failed to open post state directory")
}

fn read_post(path: &Path) -> anyhow::Result<Post> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse post record in {}", path.display()))
}

/// Mirrors the post stored in `post_path` into its gist.
///
/// A revision is mirrored through its parent record, read from
/// `parent_path`. API failures are recorded with the post and logged; they
/// never fail the command. Only unreadable input or an unusable state
/// directory does.
pub async fn sync(
    config: &Config,
    post_path: &Path,
    parent_path: Option<&Path>,
    autosave: bool,
) -> anyhow::Result<()> {
    let saved = read_post(post_path)?;
    let parent = parent_path.map(read_post).transpose()?;

    let saved_id = saved.id;
    let post = match canonical_post(saved, parent) {
        Ok(post) => post,
        Err(reason) => {
            info!(post = %saved_id, %reason, "skipping save");
            println!("Post {saved_id}: skipped ({reason})");
            return Ok(());
        }
    };

    if !config.syncs_post_type(post.kind.as_str()) {
        info!(post = %post.id, kind = %post.kind, "post type not enabled, skipping");
        println!("Post {}: skipped ({} posts are not synced)", post.id, post.kind);
        return Ok(());
    }

    let username = auth::resolve_username(&config.github).unwrap_or_default();
    let token = auth::resolve_token(&config.github).await.unwrap_or_default();
    if username.is_empty() || token.is_empty() {
        warn!("GitHub username or access token is not configured");
    }

    let synchronizer = Synchronizer::new(
        build_client(config)?,
        open_store(config)?,
        Credentials::new(username, SecretString::from(token)),
    );

    let trigger = if autosave {
        SyncTrigger::Autosave
    } else {
        SyncTrigger::Save
    };

    let post_id = post.id;
    match synchronizer.sync_post(&post, trigger).await {
        Ok(SyncOutcome::Synced(meta)) => {
            println!(
                "Post {post_id}: saved into gist {} ({})",
                meta.id(),
                meta.html_url().unwrap_or("#")
            );
        }
        Ok(SyncOutcome::Failed(message)) => {
            warn!(post = %post_id, error = %message, "gist sync failed");
            println!("Post {post_id}: sync failed: {message}");
        }
        Ok(SyncOutcome::Skipped(reason)) => {
            println!("Post {post_id}: skipped ({reason})");
        }
        Err(err) => {
            warn!(post = %post_id, error = %err, "could not record gist sync state");
            println!("Post {post_id}: sync state not recorded: {err}");
        }
    }

    Ok(())
}

/// Prints the stored gist state of a post.
pub fn status(config: &Config, post_id: u64) -> anyhow::Result<()> {
    let post = PostId::new(post_id);
    let store = open_store(config)?;
    let state = store
        .load_state(post)
        .with_context(|| format!("failed to read state of post {post}"))?;
    println!("{}", SyncStatus::new(post, state));
    if let Some(updated_at) = store.updated_at(post)? {
        println!("Last updated: {}", updated_at.to_rfc3339());
    }
    Ok(())
}

/// Checks the configured credentials against the GitHub user endpoint.
pub async fn check_token(config: &Config) -> anyhow::Result<()> {
    let credentials = auth::resolve_credentials(&config.github).await?;
    let synchronizer = Synchronizer::new(
        build_client(config)?,
        MemoryStore::new(),
        Credentials::new(
            credentials.username,
            SecretString::from(credentials.access_token),
        ),
    );

    let user = synchronizer
        .check_credentials()
        .await
        .map_err(|err| anyhow::anyhow!(failure_message(err.to_string())))?;

    println!("Login: {}", user.login);
    println!("Name: {}", user.name.as_deref().unwrap_or("-"));
    println!("Email: {}", user.email.as_deref().unwrap_or("-"));
    println!(
        "Public repos: {}",
        user.public_repos.map_or_else(|| "-".to_string(), |n| n.to_string())
    );
    println!(
        "Public gists: {}",
        user.public_gists.map_or_else(|| "-".to_string(), |n| n.to_string())
    );
    Ok(())
}

/// Settings given on the `configure` command line.
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub username: Option<String>,
    pub token: Option<String>,
    pub post_types: Option<Vec<String>>,
}

/// Applies `update` to the configuration file at `path`.
///
/// The file is created when missing. Values are sanitized the way a
/// settings form would on save: invalid ones are blanked or dropped with a
/// warning and the rest are written.
pub fn configure(path: Option<PathBuf>, update: ConfigUpdate) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => persistence::default_user_config_path()?,
    };

    let mut config: Config = if path.exists() {
        persistence::read_config_file(&path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        Config::default()
    };

    if let Some(username) = update.username {
        config.github.username = username;
    }
    if let Some(token) = update.token {
        config.github.access_token = Some(token);
    }
    if let Some(post_types) = update.post_types {
        config.enabled_post_types = post_types;
    }

    for key in settings::sanitize(&mut config) {
        let title = settings::field(key).map_or(key, |field| field.title);
        warn!(key, "invalid value discarded");
        println!("Ignored invalid {title}");
    }

    config
        .validate()
        .with_context(|| format!("configuration in {} is invalid", path.display()))?;
    config
        .save_to(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());
    Ok(())
}
