//! Lifecycle script, launch agent and distribution descriptor generation.
//!
//! All generated files come from handlebars templates parameterized only by
//! the application name, so output bytes depend on nothing else.

use crate::bundler::{
    error::{Error, Result},
    settings::{PkgTemplates, Settings},
    utils::fs,
};
use handlebars::Handlebars;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const PREINSTALL: &str = "preinstall";
pub const POSTINSTALL: &str = "postinstall";
pub const LAUNCH_AGENT: &str = "launch_agent";
pub const DISTRIBUTION: &str = "distribution";

/// Mode of the scripts directory and of each script.
const SCRIPT_MODE: u32 = 0o755;
/// Mode of the launch agent directory inside the staging root.
const LAUNCH_AGENTS_DIR_MODE: u32 = 0o700;
/// Mode of the directory holding the distribution descriptor.
const DISTRIBUTION_DIR_MODE: u32 = 0o755;
/// Mode of rendered descriptors.
const DESCRIPTOR_MODE: u32 = 0o644;

/// Renders the installer templates for one application name.
pub struct ScriptGenerator {
    handlebars: Handlebars<'static>,
}

impl ScriptGenerator {
    /// Registers all four templates, failing on the first that does not parse.
    pub fn new(templates: &PkgTemplates) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        for (name, body) in [
            (PREINSTALL, &templates.preinstall),
            (POSTINSTALL, &templates.postinstall),
            (LAUNCH_AGENT, &templates.launch_agent),
            (DISTRIBUTION, &templates.distribution),
        ] {
            handlebars
                .register_template_string(name, body)
                .map_err(|e| Error::Template {
                    name,
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders template `name` with `app_name` substituted.
    pub fn render(&self, name: &'static str, app_name: &str) -> Result<String> {
        let mut data = BTreeMap::new();
        data.insert("app_name", app_name);

        self.handlebars
            .render(name, &data)
            .map_err(|e| Error::Template {
                name,
                reason: e.to_string(),
            })
    }

    /// Renders template `name` into `destination` and applies `mode`.
    pub async fn render_to(
        &self,
        name: &'static str,
        app_name: &str,
        destination: &Path,
        mode: u32,
    ) -> Result<()> {
        let content = self.render(name, app_name)?;
        log::debug!("Writing {} to {}", name, destination.display());
        fs::write_file(destination, &content, mode).await
    }
}

/// Writes `preInstall` and `postInstall` into the scripts directory.
///
/// Existing scripts are overwritten; other files in the directory are left
/// untouched. Returns the scripts directory.
pub async fn write_lifecycle_scripts(
    settings: &Settings,
    generator: &ScriptGenerator,
) -> Result<PathBuf> {
    let scripts_dir = settings.scripts_dir();
    fs::create_dir_all_with_mode(&scripts_dir, SCRIPT_MODE).await?;

    generator
        .render_to(
            PREINSTALL,
            settings.app_name(),
            &scripts_dir.join("preInstall"),
            SCRIPT_MODE,
        )
        .await?;
    generator
        .render_to(
            POSTINSTALL,
            settings.app_name(),
            &scripts_dir.join("postInstall"),
            SCRIPT_MODE,
        )
        .await?;

    Ok(scripts_dir)
}

/// Writes the launchd agent descriptor into the staging root.
///
/// Returns the descriptor path, `<prefix>.<app>.plist` under the agent directory.
pub async fn write_launch_agent(
    settings: &Settings,
    generator: &ScriptGenerator,
) -> Result<PathBuf> {
    let agents_dir = settings.launch_agents_dir();
    fs::create_dir_all_with_mode(&agents_dir, LAUNCH_AGENTS_DIR_MODE).await?;

    let plist = agents_dir.join(format!("{}.plist", settings.agent_label()));
    generator
        .render_to(LAUNCH_AGENT, settings.app_name(), &plist, DESCRIPTOR_MODE)
        .await?;

    Ok(plist)
}

/// Writes the distribution descriptor, replacing any previous one.
pub async fn write_distribution(
    settings: &Settings,
    generator: &ScriptGenerator,
) -> Result<PathBuf> {
    let distribution = settings.distribution_file();
    if let Some(parent) = distribution.parent() {
        fs::create_dir_all_with_mode(parent, DISTRIBUTION_DIR_MODE).await?;
    }

    generator
        .render_to(
            DISTRIBUTION,
            settings.app_name(),
            &distribution,
            DESCRIPTOR_MODE,
        )
        .await?;

    Ok(distribution)
}
