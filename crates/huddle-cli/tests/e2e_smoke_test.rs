use std::{fs, path::PathBuf};

use tempfile::tempdir;

use huddle_cli::{Args, CliError, run};

/// Collects all .toml room files from a directory
fn collect_room_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

/// Rooms live at the workspace root, not in the crate
fn rooms_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("rooms")
}

fn args_for(input: PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        ticks: 240,
        seed: Some(7),
        preset: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_rooms() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_rooms = collect_room_files(rooms_dir());
    assert!(!valid_rooms.is_empty(), "No rooms found in rooms/");

    let mut failed_rooms = Vec::new();

    for room_path in &valid_rooms {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            room_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(room_path.clone(), output_path.clone())) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("SVG was not written");
                assert!(svg.starts_with("<svg"), "{} is not an SVG", output_path.display());
            }
            Err(e) => failed_rooms.push((room_path.clone(), e)),
        }
    }

    if !failed_rooms.is_empty() {
        eprintln!("\nValid rooms that failed:");
        for (path, err) in &failed_rooms {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid room(s) failed unexpectedly", failed_rooms.len());
    }
}

#[test]
fn e2e_smoke_test_error_rooms() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_rooms = collect_room_files(rooms_dir().join("errors"));
    assert!(!error_rooms.is_empty(), "No error rooms found in rooms/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for room_path in &error_rooms {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            room_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(room_path.clone(), output_path)) {
            Err(CliError::Room(_)) => {}
            Err(other) => panic!("{}: unexpected error {other}", room_path.display()),
            Ok(()) => unexpectedly_succeeded.push(room_path.clone()),
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error rooms that succeeded: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_same_seed_same_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let room = rooms_dir().join("standup.toml");

    let first = temp_dir.path().join("first.svg");
    let second = temp_dir.path().join("second.svg");
    run(&args_for(room.clone(), first.clone())).unwrap();
    run(&args_for(room, second.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}

#[test]
fn e2e_preset_and_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r##"
        [layout]
        min_distance = 140.0

        [style]
        background_color = "#101010"
        "##,
    )
    .unwrap();

    let output = temp_dir.path().join("out.svg");
    let mut args = args_for(rooms_dir().join("standup.toml"), output.clone());
    args.config = Some(config_path.to_string_lossy().to_string());
    args.preset = Some(huddle::config::Preset::Compact);
    args.ticks = 0;

    run(&args).unwrap();
    let svg = fs::read_to_string(output).unwrap();
    assert!(svg.contains("ana"));
}

#[test]
fn e2e_missing_config_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = args_for(
        rooms_dir().join("standup.toml"),
        temp_dir.path().join("out.svg"),
    );
    args.config = Some(temp_dir.path().join("nope.toml").to_string_lossy().to_string());

    assert!(matches!(run(&args), Err(CliError::Config(_))));
}
