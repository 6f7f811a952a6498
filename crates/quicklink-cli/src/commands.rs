use crate::cli::Command;
use quicklink_core::error::Result;
use quicklink_core::UrlStore;
use serde_json::json;
use tracing::info;

/// Runs one command against `store` and returns the text to print.
pub async fn execute<S: UrlStore>(store: &S, command: Command) -> Result<String> {
    match command {
        Command::Ping => {
            store.ping().await?;
            Ok("ok".to_string())
        }
        Command::Save { url, alias } => {
            let id = store.save(&url, &alias).await?;
            info!(%alias, %id, "alias saved");
            Ok(id.to_string())
        }
        Command::Get { alias, json } => {
            let url = store.get(&alias).await?;
            if json {
                Ok(json!({ "alias": alias, "url": url }).to_string())
            } else {
                Ok(url.into_string())
            }
        }
        Command::Exists { alias } => Ok(store.exists(&alias).await?.to_string()),
        Command::Delete { id } => {
            let removed = store.delete(&id).await?;
            info!(%id, removed, "delete finished");
            Ok(if removed { "deleted" } else { "not found" }.to_string())
        }
    }
}
