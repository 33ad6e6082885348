//! External PlantUML tool driver.
//!
//! Fixed external-tool contract: the document is persisted to a file and
//! the tool is invoked as `<tool> -tpng <document> -o <output_dir>`; the
//! artifact lands at `<output_dir>/<document stem>.png`. The version probe
//! runs before anything is written, so a missing tool leaves no files
//! behind.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use umlforge_core::{DiagramDocument, DiagramRenderer, RenderError, RenderedArtifact};

use crate::viewer;

/// Renderer configuration.
///
/// The fixed document/artifact paths mean two concurrent runs would race;
/// callers must relocate them to per-run unique locations before invoking
/// the pipeline in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Rendering tool command.
    pub tool: String,
    /// Where the normalized document is persisted (overwritten every run).
    pub document_path: PathBuf,
    /// Directory the tool writes the image into.
    pub output_dir: PathBuf,
    /// Bound on the probe and render invocations, in seconds.
    pub timeout_secs: u64,
    /// If true, open the artifact in the platform viewer after success.
    pub open_viewer: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            tool: "plantuml".to_string(),
            document_path: PathBuf::from("diagram.puml"),
            output_dir: PathBuf::from("."),
            timeout_secs: 60,
            open_viewer: false,
        }
    }
}

/// Drives the external `plantuml` process through probe, persist, invoke,
/// and validate stages. No retry loop exists at any stage.
pub struct PlantUmlRenderer {
    config: RendererConfig,
}

impl PlantUmlRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Where the tool will leave the image: document stem + `.png` in the
    /// output directory.
    pub fn artifact_path(&self) -> PathBuf {
        let stem = self
            .config
            .document_path
            .file_stem()
            .unwrap_or_else(|| std::ffi::OsStr::new("diagram"));
        self.config.output_dir.join(stem).with_extension("png")
    }

    /// Verify the tool is invocable via a version probe.
    pub async fn probe_tool(&self) -> Result<(), RenderError> {
        let mut cmd = Command::new(&self.config.tool);
        cmd.arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let status = self
            .bounded(cmd.status())
            .await?
            .map_err(|e| RenderError::ToolUnavailable {
                tool: self.config.tool.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(RenderError::ToolUnavailable {
                tool: self.config.tool.clone(),
                reason: format!("version probe exited with status {}", status.code().unwrap_or(-1)),
            });
        }

        debug!(tool = %self.config.tool, "Rendering tool probe succeeded");
        Ok(())
    }

    async fn persist(&self, doc: &DiagramDocument) -> Result<(), RenderError> {
        tokio::fs::write(&self.config.document_path, doc.as_str())
            .await
            .map_err(|source| RenderError::Persist {
                path: self.config.document_path.clone(),
                source,
            })
    }

    async fn invoke(&self) -> Result<std::process::Output, RenderError> {
        let mut cmd = Command::new(&self.config.tool);
        cmd.arg("-tpng")
            .arg(&self.config.document_path)
            .arg("-o")
            .arg(&self.config.output_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        info!(
            tool = %self.config.tool,
            document = %self.config.document_path.display(),
            "Invoking rendering tool"
        );

        self.bounded(cmd.output())
            .await?
            .map_err(|e| RenderError::ToolUnavailable {
                tool: self.config.tool.clone(),
                reason: e.to_string(),
            })
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = T>,
    ) -> Result<T, RenderError> {
        tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), fut)
            .await
            .map_err(|_| RenderError::Timeout {
                seconds: self.config.timeout_secs,
            })
    }
}

#[async_trait]
impl DiagramRenderer for PlantUmlRenderer {
    async fn render(&self, doc: &DiagramDocument) -> Result<RenderedArtifact, RenderError> {
        self.probe_tool().await?;
        self.persist(doc).await?;

        let output = self.invoke().await?;
        if !output.status.success() {
            return Err(RenderError::Tool {
                status: output.status.code().unwrap_or(-1),
                diagnostics: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let path = self.artifact_path();
        match tokio::fs::metadata(&path).await {
            Ok(_) => {}
            Err(_) => return Err(RenderError::ArtifactMissing { path }),
        }

        info!(artifact = %path.display(), "Diagram rendered");

        if self.config.open_viewer {
            viewer::open_artifact(&path);
        }

        Ok(RenderedArtifact { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("umlforge-render-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write an executable shell script standing in for the real tool.
    fn fake_tool(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-plantuml");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn config(dir: &Path, tool: String) -> RendererConfig {
        RendererConfig {
            tool,
            document_path: dir.join("diagram.puml"),
            output_dir: dir.to_path_buf(),
            timeout_secs: 5,
            open_viewer: false,
        }
    }

    fn doc() -> DiagramDocument {
        DiagramDocument::wrap("start\n:A;\nstop")
    }

    #[tokio::test]
    async fn missing_tool_is_unavailable_and_writes_nothing() {
        let dir = test_dir("missing-tool");
        let cfg = config(&dir, "umlforge-no-such-tool".to_string());
        let renderer = PlantUmlRenderer::new(cfg.clone());

        let err = renderer.render(&doc()).await.unwrap_err();
        assert!(matches!(err, RenderError::ToolUnavailable { .. }));
        // Probe failed before persist: no document left behind.
        assert!(!cfg.document_path.exists());
    }

    #[tokio::test]
    async fn nonzero_exit_carries_diagnostics() {
        let dir = test_dir("tool-error");
        let tool = fake_tool(
            &dir,
            r#"if [ "$1" = "-version" ]; then exit 0; fi
echo "syntax error on line 2" >&2
exit 3"#,
        );
        let renderer = PlantUmlRenderer::new(config(&dir, tool));

        let err = renderer.render(&doc()).await.unwrap_err();
        match err {
            RenderError::Tool { status, diagnostics } => {
                assert_eq!(status, 3);
                assert!(diagnostics.contains("syntax error on line 2"));
            }
            other => panic!("expected Tool error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_exit_without_artifact_is_missing() {
        let dir = test_dir("no-artifact");
        let tool = fake_tool(&dir, "exit 0");
        let renderer = PlantUmlRenderer::new(config(&dir, tool));

        let err = renderer.render(&doc()).await.unwrap_err();
        assert!(matches!(err, RenderError::ArtifactMissing { .. }));
    }

    #[tokio::test]
    async fn success_returns_artifact_handle() {
        let dir = test_dir("success");
        // Mimic the real contract: image named after the document stem,
        // written into the -o directory.
        let tool = fake_tool(
            &dir,
            r#"if [ "$1" = "-version" ]; then exit 0; fi
out="$4/$(basename "$2" .puml).png"
: > "$out""#,
        );
        let cfg = config(&dir, tool);
        let renderer = PlantUmlRenderer::new(cfg.clone());

        let artifact = renderer.render(&doc()).await.unwrap();
        assert_eq!(artifact.path, dir.join("diagram.png"));
        assert!(artifact.path.exists());
        // The persisted document holds the wrapped text.
        let persisted = std::fs::read_to_string(&cfg.document_path).unwrap();
        assert_eq!(persisted, "@startuml\nstart\n:A;\nstop\n@enduml");
    }

    #[tokio::test]
    async fn slow_tool_times_out() {
        let dir = test_dir("timeout");
        let tool = fake_tool(
            &dir,
            r#"if [ "$1" = "-version" ]; then exit 0; fi
sleep 5"#,
        );
        let mut cfg = config(&dir, tool);
        cfg.timeout_secs = 1;
        let renderer = PlantUmlRenderer::new(cfg);

        let err = renderer.render(&doc()).await.unwrap_err();
        assert!(matches!(err, RenderError::Timeout { seconds: 1 }));
    }

    #[test]
    fn artifact_path_derives_from_document_stem() {
        let cfg = RendererConfig {
            document_path: PathBuf::from("/tmp/answer.puml"),
            output_dir: PathBuf::from("/tmp/out"),
            ..RendererConfig::default()
        };
        let renderer = PlantUmlRenderer::new(cfg);
        assert_eq!(renderer.artifact_path(), PathBuf::from("/tmp/out/answer.png"));
    }
}
