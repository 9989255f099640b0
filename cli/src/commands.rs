//! commands.rs
//! Pack and unpack jobs over files or any reader/writer pair.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};
use zstream_core::compression::{create_compressor, create_decompressor, CompressionCodec};
use zstream_core::config::Settings;
use zstream_core::stream::{ZReader, ZWriter};
use zstream_core::telemetry::StreamCounters;

use crate::plan::{Mode, Plan};

/// Run `plan` against the filesystem.
pub fn execute(plan: &Plan, codec: CompressionCodec, settings: &Settings) -> Result<StreamCounters> {
    let input = File::open(&plan.input)
        .with_context(|| format!("cannot open {}", plan.input.display()))?;
    let output = File::create(&plan.output)
        .with_context(|| format!("cannot create {}", plan.output.display()))?;
    let mut input = BufReader::new(input);
    let mut output = BufWriter::new(output);

    let counters = match plan.mode {
        Mode::Pack => pack(&mut input, &mut output, codec, settings),
        Mode::Unpack => unpack(&mut input, &mut output, codec, settings),
    }
    .with_context(|| format!("{} {} failed", plan.mode, plan.input.display()))?;

    info!(
        mode = %plan.mode,
        output = %plan.output.display(),
        ratio = counters.compression_ratio().unwrap_or(1.0),
        "done"
    );
    Ok(counters)
}

pub fn pack<R, W>(
    input: &mut R,
    output: &mut W,
    codec: CompressionCodec,
    settings: &Settings,
) -> Result<StreamCounters>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut compressor = create_compressor(codec, &settings.codec);
    let mut writer = ZWriter::with_config(output, &mut *compressor, settings.stream)?;
    let copied = io::copy(input, &mut writer).context("compressing")?;
    writer.close().context("finishing the compressed stream")?;
    debug!(copied, codec = %codec, "packed");
    Ok(writer.counters().clone())
}

pub fn unpack<R, W>(
    input: &mut R,
    output: &mut W,
    codec: CompressionCodec,
    settings: &Settings,
) -> Result<StreamCounters>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut decompressor = create_decompressor(codec, &settings.codec);
    let mut reader = ZReader::with_config(input, &mut *decompressor, settings.stream)?;
    let copied = io::copy(&mut reader, output).context("decompressing")?;
    output.flush().context("flushing output")?;
    debug!(copied, codec = %codec, "unpacked");
    Ok(reader.counters().clone())
}
