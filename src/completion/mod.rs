//! Shell completion script generation and installation
//!
//! Generators only read the application's group, command and option tree;
//! they have no influence on dispatch.

mod command;

pub use command::to_clap_command;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::CliApp;
use crate::error::{LaretError, Result};

pub trait CompletionGenerator {
    fn generate(&self, app: &CliApp) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Shell {
    fn clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
        }
    }
}

impl CompletionGenerator for Shell {
    fn generate(&self, app: &CliApp) -> String {
        let mut cmd = to_clap_command(app);
        let mut buf = Vec::new();
        clap_complete::generate(self.clap_shell(), &mut cmd, app.name(), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl FromStr for Shell {
    type Err = LaretError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "powershell" | "pwsh" => Ok(Shell::PowerShell),
            _ => Err(LaretError::UnsupportedShell(s.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
        }
    }
}

/// Completion script for `shell`
pub fn generate_completion(app: &CliApp, shell: Shell) -> String {
    shell.generate(app)
}

/// Install the completion script under the user's home directory
pub fn install_completion(app: &CliApp, shell: Shell) -> Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(LaretError::NoHomeDirectory)?;
    install_completion_in(app, shell, &home)
}

/// Install the completion script relative to an explicit home directory
///
/// PowerShell scripts go next to `$PROFILE` when it is set.
pub fn install_completion_in(app: &CliApp, shell: Shell, home: &Path) -> Result<PathBuf> {
    let profile = std::env::var("PROFILE").ok();
    let path = install_path(app.name(), shell, home, profile.as_deref());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, generate_completion(app, shell))?;
    make_executable(&path)?;

    tracing::info!(shell = %shell, path = %path.display(), "completion installed");
    Ok(path)
}

/// Where the script for `shell` is written
pub fn install_path(name: &str, shell: Shell, home: &Path, profile: Option<&str>) -> PathBuf {
    match shell {
        Shell::Bash => home.join(".bash_completion.d").join(name),
        Shell::Zsh => home.join(".zsh_completions").join(format!("_{}", name)),
        Shell::Fish => home
            .join(".config")
            .join("fish")
            .join("completions")
            .join(format!("{}.fish", name)),
        Shell::PowerShell => {
            let dir = profile
                .filter(|p| !p.trim().is_empty())
                .and_then(|p| Path::new(p).parent().map(Path::to_path_buf))
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| home.join("Documents").join("PowerShell"));
            dir.join(format!("{}_completion.ps1", name))
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{CliOption, Command, CommandGroup};
    use tempfile::tempdir;

    pub(crate) fn sample_app() -> CliApp {
        let file = CommandGroup::new("file", "File operations")
            .with_command(
                Command::new("create", "Create a new file")
                    .with_option(CliOption::value("c", "content", "File content"))
                    .with_option(CliOption::flag("f", "force", "Overwrite if exists")),
            )
            .with_command(
                Command::new("delete", "Delete a file")
                    .with_option(CliOption::flag("f", "force", "Force deletion")),
            );
        let dir = CommandGroup::new("dir", "Directory operations")
            .with_command(Command::new("list", "List directory contents"));
        CliApp::new("my-app", "1.0.0", "", vec![file, dir])
    }

    #[test]
    fn test_shell_parse() {
        assert_eq!("BASH".parse::<Shell>().unwrap(), Shell::Bash);
        assert_eq!("zsh".parse::<Shell>().unwrap(), Shell::Zsh);
        assert_eq!("PowerShell".parse::<Shell>().unwrap(), Shell::PowerShell);
        assert_eq!("pwsh".parse::<Shell>().unwrap(), Shell::PowerShell);
        assert_eq!(" fish ".parse::<Shell>().unwrap(), Shell::Fish);
        let err = "tcsh".parse::<Shell>().unwrap_err();
        assert!(matches!(err, LaretError::UnsupportedShell(ref s) if s == "tcsh"));
    }

    #[test]
    fn test_scripts_cover_groups_commands_and_options() {
        let app = sample_app();

        let bash = generate_completion(&app, Shell::Bash);
        assert!(bash.contains("complete -F"));
        let zsh = generate_completion(&app, Shell::Zsh);
        assert!(zsh.starts_with("#compdef my-app"));
        let fish = generate_completion(&app, Shell::Fish);
        assert!(fish.contains("complete -c my-app"));
        let pwsh = generate_completion(&app, Shell::PowerShell);
        assert!(pwsh.contains("Register-ArgumentCompleter"));

        for script in [&bash, &zsh, &fish, &pwsh] {
            assert!(script.contains("file"));
            assert!(script.contains("dir"));
            assert!(script.contains("create"));
            assert!(script.contains("content"));
            assert!(script.contains("quiet"));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let app = sample_app();
        assert_eq!(
            generate_completion(&app, Shell::Bash),
            generate_completion(&app, Shell::Bash)
        );
    }

    #[test]
    fn test_install_paths() {
        let home = Path::new("/home/user");
        assert_eq!(
            install_path("my-app", Shell::Bash, home, None),
            home.join(".bash_completion.d/my-app")
        );
        assert_eq!(
            install_path("my-app", Shell::Zsh, home, None),
            home.join(".zsh_completions/_my-app")
        );
        assert_eq!(
            install_path("my-app", Shell::Fish, home, None),
            home.join(".config/fish/completions/my-app.fish")
        );
        assert_eq!(
            install_path("my-app", Shell::PowerShell, home, None),
            home.join("Documents/PowerShell/my-app_completion.ps1")
        );
        assert_eq!(
            install_path(
                "my-app",
                Shell::PowerShell,
                home,
                Some("/profiles/ps/Microsoft.PowerShell_profile.ps1")
            ),
            PathBuf::from("/profiles/ps/my-app_completion.ps1")
        );
    }

    #[test]
    fn test_install_writes_script() {
        let home = tempdir().unwrap();
        let app = sample_app();

        let path = install_completion_in(&app, Shell::Zsh, home.path()).unwrap();

        assert_eq!(path, home.path().join(".zsh_completions/_my-app"));
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, generate_completion(&app, Shell::Zsh));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }
}
