//! Streaming WAV output that never leaves a half-written file behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hound::WavWriter;

use crate::{Result, WavFormat, WavSpec};

/// Writes chunks to a sibling temporary file and renames it over the target
/// on [`finalize`](ChunkWriter::finalize).
///
/// Dropping the writer without finalizing removes the temporary file, so an
/// aborted run leaves any previous output untouched.
///
/// ```rust,ignore
/// let mut writer = ChunkWriter::create("out/output.wav", WavSpec::float(1, 44100))?;
/// for chunk in samples.chunks(44100) {
///     writer.write_chunk(chunk)?;
/// }
/// let path = writer.finalize()?;
/// ```
pub struct ChunkWriter {
    writer: Option<WavWriter<BufWriter<File>>>,
    spec: WavSpec,
    temp_path: PathBuf,
    final_path: PathBuf,
    samples_written: u64,
    finished: bool,
}

impl ChunkWriter {
    /// Open a writer for `path`, creating its parent directory if needed.
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> Result<Self> {
        spec.check()?;
        let final_path = path.as_ref().to_path_buf();

        if let Some(parent) = final_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(&final_path);
        let writer = WavWriter::create(&temp_path, hound::WavSpec::from(spec))?;

        Ok(Self {
            writer: Some(writer),
            spec,
            temp_path,
            final_path,
            samples_written: 0,
            finished: false,
        })
    }

    /// Append interleaved samples.
    ///
    /// Integer formats are scaled and clamped to full scale; float samples are
    /// written as they are.
    pub fn write_chunk(&mut self, samples: &[f32]) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        match self.spec.format {
            WavFormat::IeeeFloat => {
                for &sample in samples {
                    writer.write_sample(sample)?;
                }
            }
            WavFormat::Pcm => {
                let max_val = self.spec.int_scale();
                for &sample in samples {
                    let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                    writer.write_sample(int_sample)?;
                }
            }
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    /// Interleaved samples written so far.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Output spec.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Flush the header and move the file into place.
    pub fn finalize(mut self) -> Result<PathBuf> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        std::fs::rename(&self.temp_path, &self.final_path)?;
        self.finished = true;
        Ok(self.final_path.clone())
    }

    /// Abandon the output. Equivalent to dropping the writer.
    pub fn discard(self) {}
}

impl Drop for ChunkWriter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.writer.take());
        if let Err(e) = std::fs::remove_file(&self.temp_path) {
            tracing::debug!(path = %self.temp_path.display(), error = %e, "temp file not removed");
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}
