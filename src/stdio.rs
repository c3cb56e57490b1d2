use crate::mcp::handler;
use crate::Ga4Server;
use anyhow::Result;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio_server(server: &Ga4Server) -> Result<()> {
    serve_lines(server, BufReader::new(io::stdin()), io::stdout()).await
}

/// Newline-delimited JSON-RPC: one request per line, one response per line.
///
/// Lines are handed to the dispatcher as raw bytes, so input that is not
/// UTF-8 gets a parse error reply instead of ending the session.
pub async fn serve_lines<R, W>(server: &Ga4Server, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break, // EOF
            Ok(_) => {
                let line = trim_ascii_whitespace(&buf);
                if line.is_empty() {
                    continue;
                }

                tracing::debug!("Received: {}", String::from_utf8_lossy(line));

                let Some(response) = handler::handle_message(server, line).await else {
                    continue;
                };
                let response_json = serde_json::to_string(&response)?;

                tracing::debug!("Sending: {}", response_json);

                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Err(e) => {
                tracing::error!("Error reading from stdin: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace_only() {
        assert_eq!(trim_ascii_whitespace(b"  {\"a\": 1}\r\n"), b"{\"a\": 1}");
        assert_eq!(trim_ascii_whitespace(b" \t\r\n"), b"");
        assert_eq!(trim_ascii_whitespace(b""), b"");
        assert_eq!(trim_ascii_whitespace(b"\xff"), b"\xff");
    }
}
