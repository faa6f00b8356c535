pub mod inspect;
pub mod redact;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Read a captured message from a file, or stdin for `-`
pub async fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .context("Failed to read stdin")?;
        Ok(bytes)
    } else {
        tokio::fs::read(input)
            .await
            .with_context(|| format!("Failed to read {}", input))
    }
}

/// Write raw bytes to stdout
pub async fn write_output(bytes: &[u8]) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(bytes).await?;
    stdout.flush().await?;
    Ok(())
}
