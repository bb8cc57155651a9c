use std::io::Cursor;

use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

use crate::foundation::core::{DelayCs, FrameSequence, RasterFrame};
use crate::foundation::error::{TileError, TileResult};
use crate::source::fetch::read_source_bytes;
use crate::source::locator::{Locator, SourceKind};

/// Resolve `locator` into an ordered frame sequence.
///
/// Static sources yield one frame without delay; animated sources yield every frame of the
/// container with its recorded delay.
pub fn load_frames(locator: &Locator) -> TileResult<FrameSequence> {
    let bytes = read_source_bytes(locator)?;
    let frames = decode_frames(&bytes, locator.kind())?;
    tracing::info!(
        source = %locator,
        frames = frames.len(),
        kind = ?locator.kind(),
        "decoded source"
    );
    Ok(frames)
}

/// Decode in-memory source bytes according to `kind`.
pub fn decode_frames(bytes: &[u8], kind: SourceKind) -> TileResult<FrameSequence> {
    match kind {
        SourceKind::Static => decode_still(bytes).map(FrameSequence::single),
        SourceKind::Animated => decode_animation(bytes),
    }
}

fn decode_still(bytes: &[u8]) -> TileResult<RasterFrame> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| TileError::decode(format!("decode image: {e}")))?;
    Ok(RasterFrame::still(img.to_rgba8()))
}

fn decode_animation(bytes: &[u8]) -> TileResult<FrameSequence> {
    let decoder = GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| TileError::decode(format!("open gif: {e}")))?;

    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| TileError::decode(format!("decode gif frames: {e}")))?;

    let frames = frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            RasterFrame::new(frame.into_buffer(), Some(DelayCs::from_ms_ratio(numer, denom)))
        })
        .collect();

    FrameSequence::new(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
