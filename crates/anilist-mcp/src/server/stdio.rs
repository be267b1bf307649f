//! Stdio transport for MCP protocol.
//!
//! Handles newline-delimited JSON-RPC 2.0 over stdin/stdout. Requests are
//! answered one at a time in read order; logs go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::McpServer;
use super::protocol::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR};

/// Handle MCP protocol over the process's stdin/stdout.
pub async fn run_stdio(server: &McpServer) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    serve(server, reader, writer).await?;

    tracing::info!("Stdin closed, shutting down");
    Ok(())
}

/// Serve requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) => {
                tracing::debug!(method = %request.method, "Received request");
                server.handle_request(&request).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed message");
                Some(JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}")))
            }
        };

        if let Some(response) = response {
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_server;
    use serde_json::Value;

    async fn exchange(input: &str) -> Vec<Value> {
        let server = create_server(Config::for_testing("http://127.0.0.1:9")).unwrap();
        let mut output = Vec::new();
        serve(&server, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_responses_in_read_order() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let responses = exchange(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_malformed_line_gets_parse_error() {
        let responses = exchange("{not json\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert!(responses[0]["id"].is_null());
    }
}
