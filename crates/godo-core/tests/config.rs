use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use godo_core::config::{
    find_project_config, read_config, write_config, ConfigError, GodoConfig, LoadedConfig, Source,
    DEFAULT_WIDTH,
};

#[test]
fn write_then_load_config_round_trip() {
    let temp = TempDir::new().expect("tempdir");
    let config = GodoConfig {
        board_file: Some("boards/main.json".to_string()),
        width: Some(90),
        fallback_width: None,
    };
    let path = write_config(temp.path(), &config).expect("write");
    assert_eq!(path, temp.path().join(".godo.toml"));

    let loaded = read_config(&path).expect("read");
    assert_eq!(loaded, config);
}

#[test]
fn find_project_config_walks_up_from_child() {
    let temp = TempDir::new().expect("tempdir");
    let root = std::fs::canonicalize(temp.path()).expect("canonicalize");
    std::fs::write(root.join(".godorc"), "width = 80\n").expect("write");
    let child = root.join("a").join("b");
    std::fs::create_dir_all(&child).expect("child");

    assert_eq!(find_project_config(&child), Some(root.join(".godorc")));

    write_config(&root, &GodoConfig::default()).expect("write");
    assert_eq!(find_project_config(&child), Some(root.join(".godo.toml")));
}

#[test]
fn invalid_config_is_an_error() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join(".godo.toml");
    std::fs::write(&path, "width = \"wide\"").expect("write");
    let err = read_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(".godo.toml"), "{err}");
}

#[test]
fn board_path_precedence() {
    let cwd = PathBuf::from("/work");
    let empty = LoadedConfig::default();
    assert_eq!(
        empty.resolve_board_path_with_source(&cwd, None),
        (cwd.join("godo.json"), Source::Default)
    );
    assert_eq!(
        empty.resolve_board_path_with_source(&cwd, Some("other.json")),
        (cwd.join("other.json"), Source::Flag)
    );

    let project = LoadedConfig {
        project: Some((
            PathBuf::from("/repo"),
            GodoConfig {
                board_file: Some("tasks.json".to_string()),
                ..GodoConfig::default()
            },
        )),
        global: None,
    };
    assert_eq!(
        project.resolve_board_path_with_source(&cwd, None),
        (PathBuf::from("/repo/tasks.json"), Source::Project)
    );
    assert_eq!(
        project.resolve_board_path_with_source(&cwd, Some("  ")),
        (PathBuf::from("/repo/tasks.json"), Source::Project)
    );

    let global = LoadedConfig {
        project: None,
        global: Some((
            PathBuf::from("/home/me/.godo"),
            GodoConfig {
                board_file: Some("board.json".to_string()),
                ..GodoConfig::default()
            },
        )),
    };
    assert_eq!(
        global.resolve_board_path_with_source(&cwd, None),
        (PathBuf::from("/home/me/.godo/board.json"), Source::Global)
    );
}

#[test]
fn width_precedence() {
    let empty = LoadedConfig::default();
    assert_eq!(empty.resolve_width_with_source(None), (DEFAULT_WIDTH, Source::Default));
    assert_eq!(empty.resolve_width_with_source(Some(0)), (DEFAULT_WIDTH, Source::Default));
    assert_eq!(empty.resolve_width_with_source(Some(100)), (100, Source::Terminal));

    let fallback = LoadedConfig {
        project: None,
        global: Some((
            PathBuf::from("/home/me/.godo"),
            GodoConfig {
                fallback_width: Some(72),
                ..GodoConfig::default()
            },
        )),
    };
    assert_eq!(fallback.resolve_width_with_source(None), (72, Source::Global));
    assert_eq!(fallback.resolve_width_with_source(Some(100)), (100, Source::Terminal));

    let fixed = LoadedConfig {
        project: Some((
            PathBuf::from("/repo"),
            GodoConfig {
                width: Some(60),
                ..GodoConfig::default()
            },
        )),
        global: None,
    };
    assert_eq!(fixed.resolve_width_with_source(Some(100)), (60, Source::Project));
}

/// A project directory holding `.godo.toml` and a godo home holding
/// `config.toml`, with the given bodies.
fn two_sources(project: &str, global: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().expect("tempdir");
    let root = std::fs::canonicalize(temp.path()).expect("canonicalize");
    let project_dir = root.join("project");
    let home = root.join("home");
    std::fs::create_dir_all(&project_dir).expect("project");
    std::fs::create_dir_all(&home).expect("home");
    std::fs::write(project_dir.join(".godo.toml"), project).expect("project config");
    let global_path = home.join("config.toml");
    std::fs::write(&global_path, global).expect("global config");
    (temp, project_dir, global_path)
}

#[test]
fn discover_reads_both_sources() {
    let (_temp, project_dir, global_path) =
        two_sources("board_file = \"tasks.json\"\n", "width = 70\n");
    let (config, problems) = LoadedConfig::discover(&project_dir, Some(&global_path));

    assert!(problems.is_empty());
    assert_eq!(
        config.resolve_board_path_with_source(&project_dir, None),
        (project_dir.join("tasks.json"), Source::Project)
    );
    assert_eq!(config.resolve_width_with_source(None), (70, Source::Global));
}

#[test]
fn broken_global_config_keeps_project_config() {
    let (_temp, project_dir, global_path) =
        two_sources("board_file = \"tasks.json\"\n", "width = [");
    let (config, problems) = LoadedConfig::discover(&project_dir, Some(&global_path));

    assert_eq!(problems.len(), 1);
    assert!(matches!(&problems[0], ConfigError::Parse { path, .. } if *path == global_path));
    assert!(config.global.is_none());
    assert_eq!(
        config.resolve_board_path_with_source(&project_dir, None),
        (project_dir.join("tasks.json"), Source::Project)
    );
}

#[test]
fn broken_project_config_keeps_global_config() {
    let (_temp, project_dir, global_path) =
        two_sources("board_file = 7\n", "board_file = \"main.json\"\n");
    let (config, problems) = LoadedConfig::discover(&project_dir, Some(&global_path));

    assert_eq!(problems.len(), 1);
    assert!(matches!(&problems[0], ConfigError::Parse { path, .. } if path.ends_with(".godo.toml")));
    assert!(config.project.is_none());
    let home = global_path.parent().expect("home");
    assert_eq!(
        config.resolve_board_path_with_source(&project_dir, None),
        (home.join("main.json"), Source::Global)
    );
}

#[test]
fn missing_global_config_is_not_a_problem() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("home").join("config.toml");
    let (config, problems) = LoadedConfig::discover(temp.path(), Some(&missing));
    assert!(problems.is_empty());
    assert!(config.global.is_none());
}
