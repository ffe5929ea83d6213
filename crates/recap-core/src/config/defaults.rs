//! Default values for configuration

/// File names probed during config discovery, in priority order
pub fn config_file_names() -> &'static [&'static str] {
    &["recap.toml", "recap.yaml", "recap.yml"]
}

/// Branch used when a project does not list any
pub fn default_branch() -> String {
    "main".to_string()
}

/// Trailer token carrying team attribution
pub fn default_team_trailer() -> String {
    "team".to_string()
}

/// File the snapshot history is persisted to
pub fn default_snapshot_file() -> std::path::PathBuf {
    std::path::PathBuf::from("recap-snapshots.yaml")
}
