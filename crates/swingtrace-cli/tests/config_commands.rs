use anyhow::Result;
use swingtrace_testing::TestWorld;

#[test]
fn test_show_defaults_without_file() -> Result<()> {
    let world = TestWorld::new().json();

    let result = world.run(&["config", "show"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json()?;
    assert_eq!(json["content"]["exists"], false);
    assert_eq!(json["content"]["config"]["capture"]["sample_rate_hz"], 60.0);
    assert_eq!(json["content"]["config"]["trajectory"]["damping"], 0.95);
    Ok(())
}

#[test]
fn test_init_writes_once() -> Result<()> {
    let world = TestWorld::new();
    let path = world.data_dir().join("config.toml");

    let first = world.run(&["config", "init"])?;
    assert!(first.success(), "stderr: {}", first.stderr());
    assert!(path.exists());

    std::fs::write(&path, "[capture]\nsample_rate_hz = 100.0\n")?;
    let second = world.run(&["config", "init"])?;
    assert!(second.success());
    assert!(second.stdout().contains("already exists"));
    assert!(std::fs::read_to_string(&path)?.contains("100.0"));

    let forced = world.run(&["config", "init", "--force"])?;
    assert!(forced.success());
    assert!(std::fs::read_to_string(&path)?.contains("60.0"));
    Ok(())
}

#[test]
fn test_show_reads_custom_values() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(
        world.data_dir().join("config.toml"),
        "[capture]\nsample_rate_hz = 100.0\n\n[trajectory]\nscale = 4.0\n",
    )?;

    let result = world.run(&["config", "show"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("sample_rate_hz = 100.0"));
    assert!(result.stdout().contains("scale = 4.0"));
    Ok(())
}

#[test]
fn test_invalid_rate_is_rejected() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(
        world.data_dir().join("config.toml"),
        "[capture]\nsample_rate_hz = 0.0\n",
    )?;

    let result = world.run(&["config", "show"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("sample_rate_hz"));
    Ok(())
}

#[test]
fn test_data_dir_from_environment() -> Result<()> {
    let world = TestWorld::new();
    let env_dir = world.temp_dir().join("from-env");
    let world = world.with_env("SWINGTRACE_PATH", env_dir.to_str().unwrap());

    // --data-dir still wins over the environment.
    let result = world.run(&["config", "init"])?;
    assert!(result.success());
    assert!(world.data_dir().join("config.toml").exists());
    assert!(!env_dir.join("config.toml").exists());
    Ok(())
}
