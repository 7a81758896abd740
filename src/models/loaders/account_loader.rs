use crate::models::Credential;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 格式的账号文件
#[derive(Debug, Deserialize)]
struct AccountsToml {
    #[serde(default)]
    accounts: Vec<Credential>,
}

/// 从文件加载账号列表
///
/// 按扩展名选择格式：`.toml` 为 `[[accounts]]` 表，其余按 JSON 数组解析
/// （`Name` / `Link` / `Id` / `Password`）。
pub async fn load_credentials(path: &Path) -> Result<Vec<Credential>> {
    if !path.exists() {
        anyhow::bail!("账号文件不存在: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取账号文件: {}", path.display()))?;

    let credentials = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str::<AccountsToml>(&content)
            .with_context(|| format!("无法解析TOML文件: {}", path.display()))?
            .accounts
    } else {
        serde_json::from_str::<Vec<Credential>>(&content)
            .with_context(|| format!("无法解析JSON文件: {}", path.display()))?
    };

    tracing::info!("成功加载 {} 个账号", credentials.len());

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "portfolio_crawler_loader_{}_{}",
            std::process::id(),
            name.replace('.', "_")
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_json_original_format() {
        let path = temp_file(
            "Data.json",
            r#"[
                {"Name": "kim", "Link": "a.riroschool.kr", "Id": "s1", "Password": "p1"},
                {"Name": "lee", "Link": "b.riroschool.kr", "Id": "s2", "Password": "p2"}
            ]"#,
        );

        let credentials = load_credentials(&path).await.unwrap();
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials[0].name, "kim");
        assert_eq!(credentials[0].host, "a.riroschool.kr");
        assert_eq!(credentials[1].id, "s2");
        assert_eq!(credentials[1].password, "p2");
    }

    #[tokio::test]
    async fn test_load_toml() {
        let path = temp_file(
            "accounts.toml",
            r#"
            [[accounts]]
            name = "park"
            host = "c.riroschool.kr"
            id = "s3"
            password = "p3"
            "#,
        );

        let credentials = load_credentials(&path).await.unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].name, "park");
        assert_eq!(credentials[0].host, "c.riroschool.kr");
    }

    #[tokio::test]
    async fn test_load_errors() {
        let missing = std::env::temp_dir().join("portfolio_crawler_missing/none.json");
        tokio_test::assert_err!(load_credentials(&missing).await);

        let broken = temp_file("broken.json", "{ not json");
        let err = load_credentials(&broken).await.unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
