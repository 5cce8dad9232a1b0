//! macOS installer package settings.

use crate::bundler::{
    error::{Error, Result},
    platform::macos::pkg::template,
};
use std::path::{Component, Path, PathBuf};

/// Layout and naming of a macOS installer package build.
///
/// All paths are relative to the build's working directory except
/// `bin_dir` and `launch_agents_dir`, which are relative to `install_root`
/// and mirror absolute paths on the target machine.
///
/// # Configuration
///
/// The working-directory layout, product name, agent toggle and tool names
/// can be overridden from the `[pkg]` table of a build configuration file:
///
/// ```toml
/// [pkg]
/// product = "koding"
/// install_root = "root"
/// launch_agent = false
/// ```
///
/// `identifier_prefix`, `bin_dir` and `launch_agents_dir` are baked into the
/// installer templates and are not read from configuration. Changing them in
/// code requires matching [`PkgTemplates`]; see [`PkgSettings::validate`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PkgSettings {
    /// Product prefix of the default installer name (`<product>-<app>`).
    ///
    /// Default: `koding`
    pub product: String,

    /// Reverse-domain prefix for the package identifier and agent label.
    ///
    /// Default: `com.koding.kite`
    #[serde(skip)]
    pub identifier_prefix: String,

    /// Staging directory standing in for `/` on the target machine.
    ///
    /// Default: `root`
    pub install_root: PathBuf,

    /// Binary install directory inside the staging root.
    ///
    /// Default: `usr/local/bin`
    #[serde(skip)]
    pub bin_dir: PathBuf,

    /// Launch agent directory inside the staging root.
    ///
    /// Default: `Library/LaunchAgents`
    #[serde(skip)]
    pub launch_agents_dir: PathBuf,

    /// Lifecycle script directory handed to pkgbuild.
    ///
    /// Default: `darwin/scripts`
    pub scripts_dir: PathBuf,

    /// Rendered distribution descriptor handed to productbuild.
    ///
    /// Default: `darwin/Distribution.xml`
    pub distribution_file: PathBuf,

    /// Presentation resources directory handed to productbuild.
    ///
    /// Default: `darwin/Resources`
    pub resources_dir: PathBuf,

    /// Whether to stage a launchd agent descriptor.
    ///
    /// Default: true
    pub launch_agent: bool,

    /// Component packaging tool.
    ///
    /// Default: `pkgbuild`
    pub pkgbuild: String,

    /// Distribution packaging tool.
    ///
    /// Default: `productbuild`
    pub productbuild: String,
}

impl Default for PkgSettings {
    fn default() -> Self {
        Self {
            product: "koding".into(),
            identifier_prefix: "com.koding.kite".into(),
            install_root: PathBuf::from("root"),
            bin_dir: PathBuf::from("usr/local/bin"),
            launch_agents_dir: PathBuf::from("Library/LaunchAgents"),
            scripts_dir: PathBuf::from("darwin/scripts"),
            distribution_file: PathBuf::from("darwin/Distribution.xml"),
            resources_dir: PathBuf::from("darwin/Resources"),
            launch_agent: true,
            pkgbuild: "pkgbuild".into(),
            productbuild: "productbuild".into(),
        }
    }
}

impl PkgSettings {
    /// Checks that the layout is safe to build with `templates`.
    ///
    /// Working-directory paths must be non-empty relative paths made only of
    /// plain components, and the staging root must not contain the scripts,
    /// distribution descriptor or resources, since it is deleted on every
    /// build. Identifier prefix and install paths may only differ from the
    /// defaults when the templates differ from the defaults as well.
    pub fn validate(&self, templates: &PkgTemplates) -> Result<()> {
        for (field, path) in [
            ("install_root", &self.install_root),
            ("scripts_dir", &self.scripts_dir),
            ("distribution_file", &self.distribution_file),
            ("resources_dir", &self.resources_dir),
            ("bin_dir", &self.bin_dir),
            ("launch_agents_dir", &self.launch_agents_dir),
        ] {
            check_relative(field, path)?;
        }

        for (field, path) in [
            ("scripts_dir", &self.scripts_dir),
            ("distribution_file", &self.distribution_file),
            ("resources_dir", &self.resources_dir),
        ] {
            if path.starts_with(&self.install_root) {
                return Err(Error::InvalidLayout {
                    field,
                    path: path.clone(),
                    reason: "lies inside install_root, which is removed on every build",
                });
            }
        }

        let defaults = PkgSettings::default();
        if *templates == PkgTemplates::default() {
            for (field, value, default) in [
                (
                    "identifier_prefix",
                    Path::new(&self.identifier_prefix),
                    Path::new(&defaults.identifier_prefix),
                ),
                ("bin_dir", self.bin_dir.as_path(), defaults.bin_dir.as_path()),
                (
                    "launch_agents_dir",
                    self.launch_agents_dir.as_path(),
                    defaults.launch_agents_dir.as_path(),
                ),
            ] {
                if value != default {
                    return Err(Error::InvalidLayout {
                        field,
                        path: value.to_path_buf(),
                        reason: "the default templates hard-code this value; supply matching templates",
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_relative(field: &'static str, path: &Path) -> Result<()> {
    let reject = |reason| {
        Err(Error::InvalidLayout {
            field,
            path: path.to_path_buf(),
            reason,
        })
    };

    if path.as_os_str().is_empty() {
        return reject("path is empty");
    }
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return reject("must be a relative path without '.', '..' or a root");
    }
    Ok(())
}

/// Template bodies rendered for every build.
///
/// Each template receives a single `app_name` parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkgTemplates {
    /// `preInstall` lifecycle script
    pub preinstall: String,
    /// `postInstall` lifecycle script
    pub postinstall: String,
    /// launchd agent property list
    pub launch_agent: String,
    /// productbuild distribution descriptor
    pub distribution: String,
}

impl Default for PkgTemplates {
    fn default() -> Self {
        Self {
            preinstall: template::PREINSTALL.into(),
            postinstall: template::POSTINSTALL.into(),
            launch_agent: template::LAUNCH_AGENT.into(),
            distribution: template::DISTRIBUTION.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_root(root: &str) -> PkgSettings {
        PkgSettings {
            install_root: PathBuf::from(root),
            ..PkgSettings::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        PkgSettings::default()
            .validate(&PkgTemplates::default())
            .unwrap();
    }

    #[test]
    fn install_root_must_be_a_plain_relative_path() {
        for root in ["", ".", "..", "/", "/Users/x", "build/../root", "./root"] {
            let err = with_root(root)
                .validate(&PkgTemplates::default())
                .unwrap_err();
            assert!(
                matches!(err, Error::InvalidLayout { field: "install_root", .. }),
                "{root:?}: unexpected {err}"
            );
        }
    }

    #[test]
    fn other_work_dir_paths_are_checked() {
        let settings = PkgSettings {
            resources_dir: PathBuf::from("/etc"),
            ..PkgSettings::default()
        };
        assert!(matches!(
            settings.validate(&PkgTemplates::default()),
            Err(Error::InvalidLayout { field: "resources_dir", .. })
        ));
    }

    #[test]
    fn install_root_cannot_contain_inputs() {
        let settings = PkgSettings {
            install_root: PathBuf::from("darwin"),
            ..PkgSettings::default()
        };
        assert!(matches!(
            settings.validate(&PkgTemplates::default()),
            Err(Error::InvalidLayout { field: "scripts_dir", .. })
        ));
    }

    #[test]
    fn template_bound_values_need_custom_templates() {
        let settings = PkgSettings {
            identifier_prefix: "io.example".into(),
            ..PkgSettings::default()
        };
        assert!(matches!(
            settings.validate(&PkgTemplates::default()),
            Err(Error::InvalidLayout { field: "identifier_prefix", .. })
        ));

        let custom = PkgTemplates {
            distribution: "io.example.{{app_name}}.pkg".into(),
            ..PkgTemplates::default()
        };
        settings.validate(&custom).unwrap();
    }
}
