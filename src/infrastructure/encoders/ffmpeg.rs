use super::{EncodeRequest, VideoEncoder};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;

// stderr lines kept for the error message
const MAX_ERROR_LINES: usize = 20;

#[derive(Debug, Clone)]
pub struct FfmpegConfig {
    pub ffmpeg_path: PathBuf,
    pub log_level: String,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            log_level: "error".to_string(),
        }
    }
}

/// Video encoder backed by the ffmpeg executable.
///
/// The child process is killed if the encode future is dropped.
pub struct FfmpegVideoEncoder {
    config: FfmpegConfig,
}

impl FfmpegVideoEncoder {
    pub fn new(config: FfmpegConfig) -> Self {
        Self { config }
    }

    /// Loop the still image over the audio track, stopping at the shorter input
    fn build_args(&self, request: &EncodeRequest) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-loop".to_string(),
            "1".to_string(),
            "-i".to_string(),
            request.image.to_string_lossy().to_string(),
            "-i".to_string(),
            request.audio.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-tune".to_string(),
            "stillimage".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-shortest".to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-metadata".to_string(),
            format!("title={}", request.title),
            "-loglevel".to_string(),
            self.config.log_level.clone(),
            request.output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl VideoEncoder for FfmpegVideoEncoder {
    async fn encode(&self, request: &EncodeRequest) -> Result<(), String> {
        let start_time = std::time::Instant::now();
        let args = self.build_args(request);

        tracing::debug!(
            ffmpeg = %self.config.ffmpeg_path.display(),
            args = ?args,
            "Spawning ffmpeg"
        );

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    format!("ffmpeg not found at {}", self.config.ffmpeg_path.display())
                } else {
                    format!("failed to start ffmpeg: {}", e)
                }
            })?;

        let error_lines = match child.stderr.take() {
            Some(stderr) => stderr_tail(BufReader::new(stderr)).await,
            None => Vec::new(),
        };

        let status = child
            .wait()
            .await
            .map_err(|e| format!("failed to wait for ffmpeg: {}", e))?;

        if !status.success() {
            tracing::warn!(
                exit_code = ?status.code(),
                stderr = %error_lines.join(" | "),
                "ffmpeg exited with failure"
            );
            let detail = if error_lines.is_empty() {
                String::new()
            } else {
                format!(": {}", error_lines.join("\n"))
            };
            return Err(format!("ffmpeg exited with code {:?}{}", status.code(), detail));
        }

        tracing::info!(
            output = %request.output.display(),
            latency_ms = start_time.elapsed().as_millis(),
            "ffmpeg finished"
        );

        Ok(())
    }
}

/// Drain the whole stream and keep its last non-empty lines.
/// Lines that are not valid UTF-8 are decoded lossily so the pipe stays open.
async fn stderr_tail<R: AsyncBufRead + Unpin>(mut reader: R) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if lines.len() == MAX_ERROR_LINES {
                    lines.remove(0);
                }
                lines.push(line);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed reading ffmpeg stderr");
                break;
            }
        }
    }
    lines
}
