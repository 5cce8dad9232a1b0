//! Shared helpers for pipeline tests: a recording fake for the packaging
//! tools and disposable build workspaces.

#![allow(dead_code)]

use kd_bundler::bundler::{CommandOutput, CommandRunner, PackageType, Result, SettingsBuilder};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded tool invocation.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Whether the `--package-path` directory existed when the tool ran
    pub package_path_existed: bool,
}

impl Invocation {
    /// Value following `flag`.
    pub fn flag(&self, flag: &str) -> Option<&str> {
        let pos = self.args.iter().position(|a| a == flag)?;
        self.args.get(pos + 1).map(String::as_str)
    }

    /// Final positional argument (the output path for both tools).
    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.args.last().expect("tool invoked without arguments"))
    }
}

/// Stands in for pkgbuild and productbuild.
///
/// Successful invocations write a placeholder file at the output path, the
/// way the real tools do.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    failing: Option<String>,
    skip_output: bool,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `program` exits with status 1 and writes nothing.
    pub fn failing(program: &str) -> Self {
        Self {
            failing: Some(program.to_string()),
            ..Self::default()
        }
    }

    /// Every tool exits 0 without writing its output file.
    pub fn silent() -> Self {
        Self {
            skip_output: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let mut invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            package_path_existed: false,
        };
        invocation.package_path_existed = invocation
            .flag("--package-path")
            .is_some_and(|p| Path::new(p).is_dir());

        let output = invocation.output();
        self.calls.lock().unwrap().push(invocation);

        if self.failing.as_deref() == Some(program) {
            return Ok(CommandOutput {
                code: Some(1),
                output: format!("{program}: error: simulated failure"),
            });
        }

        if !self.skip_output {
            std::fs::write(&output, format!("{program} output")).unwrap();
        }

        Ok(CommandOutput {
            code: Some(0),
            output: String::new(),
        })
    }
}

/// Disposable build directory plus a directory holding source binaries.
pub struct Workspace {
    pub work: tempfile::TempDir,
    pub bins: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            work: tempfile::tempdir().unwrap(),
            bins: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.work.path()
    }

    /// Creates an executable fake binary named `name`.
    pub fn binary(&self, name: &str) -> PathBuf {
        let path = self.bins.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\necho {name}\n")).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    /// Settings building into this workspace with the pkg backend.
    pub fn settings(&self, binary: &Path) -> SettingsBuilder {
        SettingsBuilder::new()
            .binary_path(binary)
            .work_dir(self.path())
            .package_type(PackageType::Pkg)
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.path().join(rel)).unwrap()
    }
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 == 0o111)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
