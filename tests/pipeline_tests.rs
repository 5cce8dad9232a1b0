//! Tests for the installer build pipeline
//!
//! This module tests:
//! - The full staging -> scripts -> pkgbuild -> productbuild sequence
//! - Deterministic output across rebuilds
//! - Temporary directory cleanup on success and failure
//! - Failure ordering (no later stage runs after an earlier one fails)

mod common;

use common::{FakeRunner, Workspace, is_executable};
use kd_bundler::bundler::{Bundler, Error, PackageType, PkgSettings};

#[tokio::test]
async fn test_builds_installer_end_to_end() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let settings = ws.settings(&binary).build().unwrap();

    let bundler = Bundler::with_runner(settings, FakeRunner::new());
    let artifact = bundler.bundle().await.unwrap();

    let installer = ws.path().join("koding-mytool.pkg");
    assert_eq!(artifact.package_type, PackageType::Pkg);
    assert_eq!(artifact.paths, vec![installer.clone()]);
    assert!(installer.is_file());
    assert_eq!(artifact.size, std::fs::metadata(&installer).unwrap().len());
    assert_eq!(artifact.checksum.len(), 64);

    let staged = ws.path().join("root/usr/local/bin/mytool");
    assert!(is_executable(&staged));
    assert_eq!(std::fs::read(&staged).unwrap(), std::fs::read(&binary).unwrap());

    for script in ["darwin/scripts/preInstall", "darwin/scripts/postInstall"] {
        let path = ws.path().join(script);
        assert!(is_executable(&path), "{script} should be executable");
        assert!(String::from_utf8(ws.read(script)).unwrap().contains("mytool"));
    }

    let plist = "root/Library/LaunchAgents/com.koding.kite.mytool.plist";
    assert!(String::from_utf8(ws.read(plist)).unwrap().contains("com.koding.kite.mytool"));
    assert!(String::from_utf8(ws.read("darwin/Distribution.xml")).unwrap().contains("mytool"));

    assert_eq!(bundler.runner().programs(), vec!["pkgbuild", "productbuild"]);
}

#[tokio::test]
async fn test_tool_arguments_follow_layout() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let bundler = Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new());
    bundler.bundle().await.unwrap();

    let calls = bundler.runner().calls();
    let (pkgbuild, productbuild) = (&calls[0], &calls[1]);

    assert_eq!(pkgbuild.flag("--identifier"), Some("com.koding.kite.mytool.pkg"));
    assert_eq!(pkgbuild.flag("--version"), Some("0.0.1"));
    assert_eq!(
        pkgbuild.flag("--scripts"),
        ws.path().join("darwin/scripts").to_str()
    );
    assert_eq!(pkgbuild.flag("--root"), ws.path().join("root").to_str());
    assert_eq!(pkgbuild.flag("--install-location"), Some("/"));
    assert_eq!(
        pkgbuild.output().file_name().unwrap(),
        "com.koding.kite.mytool.pkg"
    );

    let temp_dir = pkgbuild.output().parent().unwrap().to_path_buf();
    assert_eq!(
        productbuild.flag("--distribution"),
        ws.path().join("darwin/Distribution.xml").to_str()
    );
    assert_eq!(
        productbuild.flag("--resources"),
        ws.path().join("darwin/Resources").to_str()
    );
    assert_eq!(productbuild.flag("--package-path"), temp_dir.to_str());
    assert!(productbuild.package_path_existed);
    assert_eq!(productbuild.output(), ws.path().join("koding-mytool.pkg"));
}

#[tokio::test]
async fn test_temp_dir_removed_after_success() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let bundler = Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new());
    bundler.bundle().await.unwrap();

    let temp_dir = bundler.runner().calls()[0].output().parent().unwrap().to_path_buf();
    assert!(!temp_dir.exists());
}

#[tokio::test]
async fn test_temp_dir_removed_when_final_stage_fails() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let bundler = Bundler::with_runner(
        ws.settings(&binary).build().unwrap(),
        FakeRunner::failing("productbuild"),
    );

    let err = bundler.bundle().await.unwrap_err();
    assert!(matches!(err, Error::ToolFailed { ref command, .. } if command == "productbuild"));
    assert!(err.to_string().contains("simulated failure"));

    let calls = bundler.runner().calls();
    assert!(calls[1].package_path_existed);
    assert!(!calls[0].output().parent().unwrap().exists());
    assert!(!ws.path().join("koding-mytool.pkg").exists());
}

#[tokio::test]
async fn test_pkgbuild_failure_stops_pipeline() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");

    // an installer from an earlier build must survive untouched
    let installer = ws.path().join("koding-mytool.pkg");
    std::fs::write(&installer, "previous build").unwrap();

    let bundler = Bundler::with_runner(
        ws.settings(&binary).build().unwrap(),
        FakeRunner::failing("pkgbuild"),
    );
    let err = bundler.bundle().await.unwrap_err();

    assert!(matches!(err, Error::ToolFailed { code: Some(1), .. }));
    assert_eq!(bundler.runner().programs(), vec!["pkgbuild"]);
    assert_eq!(std::fs::read_to_string(&installer).unwrap(), "previous build");
    assert!(!bundler.runner().calls()[0].output().parent().unwrap().exists());
    // the distribution descriptor is only rendered for the final stage
    assert!(!ws.path().join("darwin/Distribution.xml").exists());
}

#[tokio::test]
async fn test_missing_binary_fails_before_tools() {
    let ws = Workspace::new();
    let binary = ws.bins.path().join("mytool");

    let bundler = Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new());
    assert!(bundler.bundle().await.is_err());

    assert!(bundler.runner().calls().is_empty());
    assert!(!ws.path().join("koding-mytool.pkg").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_binary_fails_before_tools() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o000)).unwrap();
    if std::fs::read(&binary).is_ok() {
        // permission bits do not apply to root
        return;
    }

    let bundler = Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new());
    assert!(bundler.bundle().await.is_err());

    assert!(bundler.runner().calls().is_empty());
    assert!(!ws.path().join("koding-mytool.pkg").exists());
}

#[test]
fn test_empty_install_root_leaves_work_dir_alone() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let resources = ws.path().join("darwin/Resources");
    std::fs::create_dir_all(&resources).unwrap();
    std::fs::write(resources.join("welcome.html"), "hello").unwrap();
    std::fs::write(ws.path().join("kd.toml"), "version = \"1.0.0\"").unwrap();

    let result = ws
        .settings(&binary)
        .pkg_settings(PkgSettings {
            install_root: "".into(),
            ..PkgSettings::default()
        })
        .build();

    assert!(matches!(
        result,
        Err(Error::InvalidLayout { field: "install_root", .. })
    ));
    assert!(resources.join("welcome.html").is_file());
    assert!(ws.path().join("kd.toml").is_file());
}

#[tokio::test]
async fn test_rebuild_output_is_identical() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let files = [
        "darwin/scripts/preInstall",
        "darwin/scripts/postInstall",
        "darwin/Distribution.xml",
        "root/Library/LaunchAgents/com.koding.kite.mytool.plist",
        "root/usr/local/bin/mytool",
    ];

    Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new())
        .bundle()
        .await
        .unwrap();
    let first: Vec<_> = files.iter().map(|f| ws.read(f)).collect();

    Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::new())
        .bundle()
        .await
        .unwrap();
    let second: Vec<_> = files.iter().map(|f| ws.read(f)).collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rebuild_with_new_name_drops_stale_tree() {
    let ws = Workspace::new();

    let old = ws.binary("oldtool");
    Bundler::with_runner(ws.settings(&old).build().unwrap(), FakeRunner::new())
        .bundle()
        .await
        .unwrap();

    let new = ws.binary("mytool");
    Bundler::with_runner(ws.settings(&new).build().unwrap(), FakeRunner::new())
        .bundle()
        .await
        .unwrap();

    assert!(!ws.path().join("root/usr/local/bin/oldtool").exists());
    assert!(
        !ws.path()
            .join("root/Library/LaunchAgents/com.koding.kite.oldtool.plist")
            .exists()
    );
    assert!(ws.path().join("root/usr/local/bin/mytool").exists());
}

#[tokio::test]
async fn test_launch_agent_can_be_disabled() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let settings = ws
        .settings(&binary)
        .pkg_settings(PkgSettings {
            launch_agent: false,
            ..PkgSettings::default()
        })
        .build()
        .unwrap();

    Bundler::with_runner(settings, FakeRunner::new())
        .bundle()
        .await
        .unwrap();

    assert!(!ws.path().join("root/Library").exists());
    assert!(ws.path().join("koding-mytool.pkg").exists());
}

#[tokio::test]
async fn test_custom_version_and_output() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let settings = ws
        .settings(&binary)
        .version("1.2.3")
        .output_name("kite")
        .build()
        .unwrap();

    let bundler = Bundler::with_runner(settings, FakeRunner::new());
    let artifact = bundler.bundle().await.unwrap();

    assert_eq!(artifact.paths, vec![ws.path().join("kite.pkg")]);
    assert_eq!(bundler.runner().calls()[0].flag("--version"), Some("1.2.3"));
}

#[tokio::test]
async fn test_missing_installer_after_success_is_an_error() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let bundler = Bundler::with_runner(ws.settings(&binary).build().unwrap(), FakeRunner::silent());

    let err = bundler.bundle().await.unwrap_err();
    assert!(matches!(err, Error::MissingArtifact(ref p) if p.ends_with("koding-mytool.pkg")));
}

#[tokio::test]
async fn test_deb_backend_is_not_implemented() {
    let ws = Workspace::new();
    let binary = ws.binary("mytool");
    let settings = ws
        .settings(&binary)
        .package_type(PackageType::Deb)
        .build()
        .unwrap();

    let bundler = Bundler::with_runner(settings, FakeRunner::new());
    let err = bundler.bundle().await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedPackageType(PackageType::Deb)));
    assert!(bundler.runner().calls().is_empty());
    assert_eq!(std::fs::read_dir(ws.path()).unwrap().count(), 0);
}
