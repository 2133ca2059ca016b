//! Detached signatures for staged files.
//!
//! The pipeline talks to a [`Signer`]; [`GpgSigner`] is the production
//! implementation and shells out to `gpg`. Tests substitute their own.

use crate::bundler::{Error, Result, SigningSettings, error::SigningFailure, utils::fs};
use std::{
    ffi::{OsStr, OsString},
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::Command;

use super::tool_detection::locate_signing_tool;

/// Produces a detached signature for a staged file.
///
/// Implementations write `<file>.asc` on success. A signer that is switched
/// off returns `Ok(())` without writing anything.
pub trait Signer: Send + Sync {
    /// Signs `file`.
    fn sign(&self, file: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Path of the detached signature for `file`: `<file>.asc`.
pub fn signature_path(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".asc");
    PathBuf::from(name)
}

/// Signs files with GnuPG: `gpg --detach-sign --armor`.
#[derive(Debug, Clone)]
pub struct GpgSigner {
    settings: SigningSettings,
    program: PathBuf,
}

impl GpgSigner {
    /// Creates a signer from settings.
    ///
    /// When signing is enabled the executable is resolved on `PATH` up front,
    /// so a missing tool fails the run before any file is signed.
    pub fn from_settings(settings: &SigningSettings) -> Result<Self> {
        let program = if settings.enabled {
            locate_signing_tool(&settings.executable)?
        } else {
            PathBuf::from(&settings.executable)
        };

        Ok(Self {
            settings: settings.clone(),
            program,
        })
    }

    /// Returns the settings this signer was built from.
    pub fn settings(&self) -> &SigningSettings {
        &self.settings
    }

    /// Arguments for signing `file`, excluding the program itself.
    pub fn arguments(&self, file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--detach-sign".into(), "--armor".into()];

        if let Some(key) = &self.settings.key_name {
            args.push("--local-user".into());
            args.push(key.into());
        }

        if self.settings.passphrase().is_some() {
            args.extend(
                ["--batch", "--yes", "--pinentry-mode", "loopback", "--passphrase-fd", "0"]
                    .map(OsString::from),
            );
        }

        args.push("--output".into());
        args.push(signature_path(file).into_os_string());
        args.push(file.as_os_str().to_os_string());
        args
    }

    async fn run(&self, file: &Path) -> Result<()> {
        let failed = |failure| Error::Signing {
            path: file.to_path_buf(),
            failure,
        };

        let passphrase = self.settings.passphrase();
        let mut child = Command::new(&self.program)
            .args(self.arguments(file))
            .stdin(if passphrase.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(SigningFailure::Launch(e)))?;

        if let (Some(passphrase), Some(mut stdin)) = (passphrase, child.stdin.take()) {
            stdin
                .write_all(format!("{passphrase}\n").as_bytes())
                .await
                .map_err(|e| failed(SigningFailure::Launch(e)))?;
            // Dropping stdin closes the pipe so gpg sees EOF.
        }

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let program = self.program.file_name().unwrap_or(OsStr::new("gpg"));

        let outcome = {
            let finished = async {
                tokio::join!(log_output(program, stdout), log_output(program, stderr));
                child.wait().await
            };
            match self.settings.timeout {
                Some(limit) => tokio::time::timeout(limit, finished).await.ok(),
                None => Some(finished.await),
            }
        };

        let status = match outcome {
            Some(status) => status.map_err(|e| failed(SigningFailure::Launch(e)))?,
            None => {
                if let Err(e) = child.kill().await {
                    log::warn!("Failed to kill signing process: {e}");
                }
                let limit = self.settings.timeout.unwrap_or_default();
                return Err(failed(SigningFailure::TimedOut(limit)));
            }
        };

        if !status.success() {
            return Err(failed(SigningFailure::ExitStatus(status.code())));
        }

        Ok(())
    }
}

impl Signer for GpgSigner {
    async fn sign(&self, file: &Path) -> Result<()> {
        let name = file.file_name().unwrap_or_default().to_string_lossy();

        if !self.settings.enabled {
            log::info!("GPG signing is disabled, skipping {name}");
            return Ok(());
        }

        log::info!("Signing file: {name}");

        // gpg refuses to overwrite without --yes; always sign fresh.
        let signature = signature_path(file);
        fs::remove_file_if_exists(&signature)
            .await
            .map_err(|e| Error::Signing {
                path: file.to_path_buf(),
                failure: SigningFailure::StaleSignature(e),
            })?;

        self.run(file).await?;

        log::info!("Successfully signed file: {name}");
        Ok(())
    }
}

/// Logs each line of a child stream at debug level until EOF.
async fn log_output<R: AsyncRead + Unpin>(program: &OsStr, stream: Option<R>) {
    let Some(stream) = stream else {
        return;
    };
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        log::debug!("{}: {line}", program.to_string_lossy());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(settings: SigningSettings) -> GpgSigner {
        GpgSigner {
            program: PathBuf::from(&settings.executable),
            settings,
        }
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn signature_path_appends_asc() {
        assert_eq!(
            signature_path(Path::new("repo/widget-1.0.0.pom")),
            PathBuf::from("repo/widget-1.0.0.pom.asc")
        );
    }

    #[test]
    fn interactive_arguments_without_passphrase() {
        let args = strings(signer(SigningSettings::default()).arguments(Path::new("w.jar")));
        assert_eq!(
            args,
            vec!["--detach-sign", "--armor", "--output", "w.jar.asc", "w.jar"]
        );
    }

    #[test]
    fn batch_arguments_with_passphrase_and_key() {
        let settings = SigningSettings {
            passphrase: Some("secret".into()),
            key_name: Some("ABCD1234".into()),
            ..Default::default()
        };
        let args = strings(signer(settings).arguments(Path::new("w.jar")));

        assert_eq!(&args[..4], ["--detach-sign", "--armor", "--local-user", "ABCD1234"]);
        assert!(args.contains(&"--batch".to_string()));
        assert!(args.contains(&"--passphrase-fd".to_string()));
        assert!(!args.iter().any(|a| a.contains("secret")));
        assert_eq!(args.last().map(String::as_str), Some("w.jar"));
    }

    #[tokio::test]
    async fn disabled_signer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("w.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let signer = GpgSigner::from_settings(&SigningSettings::disabled()).unwrap();
        signer.sign(&jar).await.unwrap();

        assert!(!signature_path(&jar).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_tool_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("w.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let signer = GpgSigner::from_settings(&SigningSettings {
            executable: "false".into(),
            ..Default::default()
        })
        .unwrap();

        match signer.sign(&jar).await {
            Err(Error::Signing {
                failure: SigningFailure::ExitStatus(Some(code)),
                ..
            }) => assert_ne!(code, 0),
            other => panic!("expected signing failure, got {other:?}"),
        }
        assert!(!signature_path(&jar).exists());
    }

    /// Writes an executable shell script standing in for gpg.
    #[cfg(unix)]
    fn fake_gpg(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-gpg");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_tool_is_killed_after_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("w.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let settings = SigningSettings {
            executable: fake_gpg(dir.path(), "sleep 5").to_string_lossy().into_owned(),
            timeout: Some(std::time::Duration::from_secs(1)),
            ..Default::default()
        };
        let started = std::time::Instant::now();

        match signer(settings).sign(&jar).await {
            Err(Error::Signing {
                failure: SigningFailure::TimedOut(limit),
                ..
            }) => assert_eq!(limit.as_secs(), 1),
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(started.elapsed() < std::time::Duration::from_secs(4));
        assert!(!signature_path(&jar).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passphrase_is_sent_on_stdin_only() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("w.jar");
        std::fs::write(&jar, b"jar").unwrap();
        let argv_log = dir.path().join("argv.txt");

        // Records argv, then writes the signature named after --output only
        // when stdin carries the expected passphrase.
        let body = format!(
            r##"echo "$@" > '{log}'
read -r pass
[ "$pass" = "secret" ] || exit 3
while [ "$#" -gt 0 ]; do
  if [ "$1" = "--output" ]; then echo signed > "$2"; fi
  shift
done"##,
            log = argv_log.display()
        );
        let settings = SigningSettings {
            executable: fake_gpg(dir.path(), &body).to_string_lossy().into_owned(),
            passphrase: Some("secret".into()),
            ..Default::default()
        };

        signer(settings).sign(&jar).await.unwrap();

        assert_eq!(std::fs::read_to_string(signature_path(&jar)).unwrap(), "signed\n");
        let argv = std::fs::read_to_string(&argv_log).unwrap();
        assert!(argv.contains("--passphrase-fd 0"));
        assert!(!argv.contains("secret"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unremovable_stale_signature_is_a_signing_failure() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("w.jar");
        std::fs::write(&jar, b"jar").unwrap();
        // A directory where the signature goes cannot be removed as a file.
        std::fs::create_dir(signature_path(&jar)).unwrap();

        let settings = SigningSettings {
            executable: "true".into(),
            ..Default::default()
        };

        match signer(settings).sign(&jar).await {
            Err(Error::Signing {
                failure: SigningFailure::StaleSignature(_),
                ..
            }) => {}
            other => panic!("expected stale signature failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_tool_fails_at_construction() {
        let result = GpgSigner::from_settings(&SigningSettings {
            executable: "definitely-not-a-real-gpg-binary".into(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(Error::Signing {
                failure: SigningFailure::ToolNotFound(_),
                ..
            })
        ));
    }
}
