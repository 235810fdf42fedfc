/// Incremental decoder for the `text/event-stream` body of a streamed chat
/// completion. Bytes are buffered until a full line is available so that
/// multi-byte characters split across network chunks survive.
#[derive(Debug, Default)]
pub(crate) struct CompletionChunkDecoder {
    buffer: Vec<u8>,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct DecodedChunk {
    pub deltas: Vec<String>,
    pub done: bool,
}

impl CompletionChunkDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> DecodedChunk {
        self.buffer.extend_from_slice(bytes);

        let mut decoded = DecodedChunk::default();

        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();

            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();

            if data == "[DONE]" {
                decoded.done = true;
                self.buffer.clear();
                break;
            }

            let Ok(chunk) = serde_json::from_str::<serde_json::Value>(data) else {
                continue;
            };

            if let Some(content) = chunk["choices"]
                .as_array()
                .and_then(|choices| choices.first())
                .and_then(|choice| choice["delta"]["content"].as_str())
                .filter(|content| !content.is_empty())
            {
                decoded.deltas.push(content.to_string());
            }
        }

        decoded
    }
}
