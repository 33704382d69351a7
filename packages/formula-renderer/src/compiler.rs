use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// 数式を中央に配置する A6 横向きのページ設定
const PAGE_TEMPLATE: &str = r#"#set align(center + horizon)
#set page(
    paper: "a6",
    flipped: true,
    margin: auto
)
"#;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to run typst: {0}")]
    Io(#[from] std::io::Error),

    #[error("typst compilation failed: {0}")]
    Diagnostic(String),
}

impl CompileError {
    /// ユーザーに表示するヒントを返す
    ///
    /// コンパイラの出力が `error:` で始まる場合、その1行目を先頭大文字にして返す。
    /// 識別子を崩さないよう、2文字目以降の大文字・小文字はそのまま残す
    pub fn suggestion(&self) -> Option<String> {
        let Self::Diagnostic(stderr) = self else {
            return None;
        };

        let first_line = stderr.trim_start().lines().next()?.trim_end();
        if !first_line.starts_with("error:") {
            return None;
        }

        let mut chars = first_line.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
    }
}

/// 数式を1ページのラスター画像（PNG バイト列）に変換する外部コンパイラ
#[async_trait]
pub trait FormulaCompiler: Send + Sync {
    async fn compile(&self, formula: &str) -> Result<Vec<u8>, CompileError>;
}

/// 数式をページテンプレートに埋め込んだ Typst 文書を作る
pub fn build_document(formula: &str) -> String {
    format!("{PAGE_TEMPLATE}$ {formula} $\n")
}

/// `typst` コマンドを呼び出すコンパイラ
#[derive(Debug, Clone)]
pub struct TypstCli {
    bin: PathBuf,
    ppi: u32,
}

impl TypstCli {
    pub fn new(bin: impl Into<PathBuf>, ppi: u32) -> Self {
        Self {
            bin: bin.into(),
            ppi,
        }
    }
}

#[async_trait]
impl FormulaCompiler for TypstCli {
    async fn compile(&self, formula: &str) -> Result<Vec<u8>, CompileError> {
        // 一時ディレクトリはドロップ時に削除される
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("main.typ");
        let output = workdir.path().join("page.png");

        tokio::fs::write(&input, build_document(formula)).await?;

        let result = Command::new(&self.bin)
            .arg("compile")
            .arg(&input)
            .arg(&output)
            .args(["--format", "png", "--ppi"])
            .arg(self.ppi.to_string())
            .kill_on_drop(true)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            tracing::debug!(status = %result.status, stderr = %stderr, "typst exited with failure");
            return Err(CompileError::Diagnostic(stderr));
        }

        Ok(tokio::fs::read(&output).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_document() {
        let doc = build_document("x^2 + y^2");
        assert!(doc.starts_with("#set align(center + horizon)\n"));
        assert!(doc.contains("paper: \"a6\""));
        assert!(doc.contains("flipped: true"));
        assert!(doc.ends_with("$ x^2 + y^2 $\n"));
    }

    #[test]
    fn test_suggestion_from_error_line() {
        let err = CompileError::Diagnostic(
            "error: unknown variable: foo\n  ┌─ main.typ:7:2\n  │\n".to_string(),
        );
        assert_eq!(
            err.suggestion().as_deref(),
            Some("Error: unknown variable: foo")
        );
    }

    #[test]
    fn test_suggestion_keeps_identifier_case() {
        let err = CompileError::Diagnostic("error: unknown variable: Alpha\n".to_string());
        assert_eq!(
            err.suggestion().as_deref(),
            Some("Error: unknown variable: Alpha")
        );
    }

    #[test]
    fn test_no_suggestion() {
        let err = CompileError::Diagnostic("warning: something odd\n".to_string());
        assert_eq!(err.suggestion(), None);

        let err = CompileError::Diagnostic(String::new());
        assert_eq!(err.suggestion(), None);

        let err = CompileError::Io(std::io::Error::other("missing"));
        assert_eq!(err.suggestion(), None);
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let compiler = TypstCli::new("/nonexistent/typst-binary", 400);
        let result = compiler.compile("x").await;
        assert!(matches!(result, Err(CompileError::Io(_))));
    }
}
