use std::sync::Arc;

use async_trait::async_trait;
use declaration_engine::{FetchError, RenderedTextFetcher};
use pretty_assertions::assert_eq;

use super::*;

struct StaticPage(&'static str);

#[async_trait]
impl RenderedTextFetcher for StaticPage {
    async fn fetch_rendered_text(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

fn engine() -> DeclarationEngine {
    DeclarationEngine::with_fetcher(
        EngineConfig::default(),
        Arc::new(StaticPage("<p>Le site est conforme à 64,3 % au RGAA.</p>")),
    )
}

fn args(base_url: &str, file_path: PathBuf) -> Args {
    Args::try_parse_from(["declaration-a11y", base_url, file_path.to_str().unwrap()]).unwrap()
}

#[test]
fn test_both_positionals_are_required() {
    assert!(Args::try_parse_from(["declaration-a11y", "https://example.fr"]).is_err());
    assert!(Args::try_parse_from(["declaration-a11y"]).is_err());
}

#[test]
fn test_blank_base_url_means_none() {
    let parsed = args("  ", PathBuf::from("page.html"));
    assert_eq!(parsed.base_url(), None);
    let parsed = args("https://example.fr", PathBuf::from("page.html"));
    assert_eq!(parsed.base_url(), Some("https://example.fr"));
}

#[tokio::test]
async fn test_prints_analysis_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homepage.html");
    std::fs::write(
        &path,
        r#"<html><body><footer>
            <a href="/accessibilite">Accessibilité : partiellement conforme</a>
        </footer></body></html>"#,
    )
    .unwrap();

    let line = render(run(&engine(), &args("https://www.example.gouv.fr", path)).await);

    assert_eq!(
        line,
        r#"{"mention":"Accessibilité : partiellement conforme","declarationUrl":"https://www.example.gouv.fr/accessibilite","percentage":"64,3%"}"#
    );
}

#[tokio::test]
async fn test_missing_file_prints_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.html");

    let line = render(run(&engine(), &args("https://www.example.gouv.fr", path)).await);

    assert_eq!(line, FALLBACK_LINE);
}

#[test]
fn test_any_error_collapses_to_fallback() {
    assert_eq!(render(Err(anyhow::anyhow!("boom"))), "{}");
    assert_eq!(render(Ok(r#"{"mention":null}"#.to_string())), r#"{"mention":null}"#);
}
