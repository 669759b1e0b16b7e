//! Static resolution table and the resolver over it.
//!
//! The table is keyed by the composite `(Mode, AspectRatio, Quality)` and is
//! never written after load, so lookups need no locking.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::errors::{Result, SelectorError};
use crate::types::{AspectRatio, Mode, Quality, Resolution, ResolutionRequest};

use AspectRatio::{Horizontal, Squarish, Vertical};
use Quality::{HQ, LQ, MQ};

/// Returned whenever a requested combination has no table entry
pub const DEFAULT_RESOLUTION: Resolution = Resolution::new(832, 480);

type Key = (Mode, AspectRatio, Quality);

const fn entry(
    mode: Mode,
    aspect_ratio: AspectRatio,
    quality: Quality,
    width: u32,
    height: u32,
) -> (Key, Resolution) {
    let key = (mode, aspect_ratio, quality);
    (key, Resolution::new(width, height))
}

/// Every preset size, grouped by mode then orientation
pub const RESOLUTION_TABLE: [(Key, Resolution); 36] = [
    entry(Mode::I2V720p, Horizontal, HQ, 1280, 720),
    entry(Mode::I2V720p, Horizontal, MQ, 832, 480),
    entry(Mode::I2V720p, Horizontal, LQ, 704, 544),
    entry(Mode::I2V720p, Vertical, HQ, 720, 1280),
    entry(Mode::I2V720p, Vertical, MQ, 480, 832),
    entry(Mode::I2V720p, Vertical, LQ, 544, 704),
    entry(Mode::I2V720p, Squarish, HQ, 624, 624),
    entry(Mode::I2V720p, Squarish, MQ, 624, 624),
    entry(Mode::I2V720p, Squarish, LQ, 624, 624),
    entry(Mode::I2V480p, Horizontal, HQ, 832, 480),
    entry(Mode::I2V480p, Horizontal, MQ, 704, 544),
    entry(Mode::I2V480p, Horizontal, LQ, 704, 544),
    entry(Mode::I2V480p, Vertical, HQ, 480, 832),
    entry(Mode::I2V480p, Vertical, MQ, 544, 704),
    entry(Mode::I2V480p, Vertical, LQ, 544, 704),
    entry(Mode::I2V480p, Squarish, HQ, 624, 624),
    entry(Mode::I2V480p, Squarish, MQ, 624, 624),
    entry(Mode::I2V480p, Squarish, LQ, 624, 624),
    entry(Mode::T2V14B, Horizontal, HQ, 1280, 720),
    entry(Mode::T2V14B, Horizontal, MQ, 1088, 832),
    entry(Mode::T2V14B, Horizontal, LQ, 832, 480),
    entry(Mode::T2V14B, Vertical, HQ, 720, 1280),
    entry(Mode::T2V14B, Vertical, MQ, 832, 1088),
    entry(Mode::T2V14B, Vertical, LQ, 480, 832),
    entry(Mode::T2V14B, Squarish, HQ, 960, 960),
    entry(Mode::T2V14B, Squarish, MQ, 624, 624),
    entry(Mode::T2V14B, Squarish, LQ, 544, 704),
    entry(Mode::T2V1_3B, Horizontal, HQ, 832, 480),
    entry(Mode::T2V1_3B, Horizontal, MQ, 704, 544),
    entry(Mode::T2V1_3B, Horizontal, LQ, 704, 544),
    entry(Mode::T2V1_3B, Vertical, HQ, 480, 832),
    entry(Mode::T2V1_3B, Vertical, MQ, 544, 704),
    entry(Mode::T2V1_3B, Vertical, LQ, 544, 704),
    entry(Mode::T2V1_3B, Squarish, HQ, 624, 624),
    entry(Mode::T2V1_3B, Squarish, MQ, 624, 624),
    entry(Mode::T2V1_3B, Squarish, LQ, 624, 624),
];

lazy_static! {
    static ref TABLE_INDEX: HashMap<Key, Resolution> = RESOLUTION_TABLE.iter().copied().collect();
}

/// Where a resolved size came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Table,
    Fallback,
}

/// All table entries in declaration order
pub fn entries() -> impl Iterator<Item = (Mode, AspectRatio, Quality, Resolution)> {
    RESOLUTION_TABLE.iter().map(|&(key, resolution)| {
        let (mode, aspect_ratio, quality) = key;
        (mode, aspect_ratio, quality, resolution)
    })
}

/// Typed lookup; a gap in the table is reported as `LookupMiss`
pub fn lookup(mode: Mode, aspect_ratio: AspectRatio, quality: Quality) -> Result<Resolution> {
    TABLE_INDEX
        .get(&(mode, aspect_ratio, quality))
        .copied()
        .ok_or_else(|| SelectorError::LookupMiss {
            mode: Arc::new(mode.to_string()),
            aspect_ratio: Arc::new(aspect_ratio.to_string()),
            quality: Arc::new(quality.to_string()),
        })
}

fn lookup_raw(mode: &str, aspect_ratio: &str, quality: &str) -> Result<Resolution> {
    lookup(mode.parse()?, aspect_ratio.parse()?, quality.parse()?)
}

/// Resolve raw selector values, reporting whether the fallback was used
#[instrument(level = "debug")]
pub fn resolve_with_source(
    mode: &str,
    aspect_ratio: &str,
    quality: &str,
) -> (Resolution, ResolutionSource) {
    match lookup_raw(mode, aspect_ratio, quality) {
        Ok(resolution) => {
            debug!("Resolved {}", resolution);
            (resolution, ResolutionSource::Table)
        }
        Err(e) => {
            debug!("Lookup failed: {}", e);
            warn!(
                "Invalid combination of mode={}, aspect_ratio={}, quality={}",
                mode, aspect_ratio, quality
            );
            warn!("Falling back to default resolution {DEFAULT_RESOLUTION}");
            (DEFAULT_RESOLUTION, ResolutionSource::Fallback)
        }
    }
}

/// Resolve raw selector values to a frame size
///
/// Never fails: anything without a table entry yields [`DEFAULT_RESOLUTION`].
pub fn resolve(mode: &str, aspect_ratio: &str, quality: &str) -> Resolution {
    resolve_with_source(mode, aspect_ratio, quality).0
}

pub fn resolve_request(request: &ResolutionRequest) -> Resolution {
    resolve(&request.mode, &request.aspect_ratio, &request.quality)
}
