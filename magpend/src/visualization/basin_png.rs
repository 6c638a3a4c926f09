//! PNG export of basin maps: one color per magnet, gray for cells that never settled.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::info;

use crate::error::Result;
use crate::simulation::basin::BasinMap;

const PALETTE: [[u8; 3]; 8] = [
    [0, 0, 0],
    [255, 0, 0],
    [255, 255, 255],
    [0, 128, 255],
    [255, 200, 0],
    [0, 200, 80],
    [160, 0, 200],
    [255, 128, 128],
];

const UNSETTLED: [u8; 3] = [128, 128, 128];

/// Color for a settled magnet index; the palette wraps for large rings
pub fn magnet_color(magnet: Option<usize>) -> [u8; 3] {
    match magnet {
        Some(m) => PALETTE[m % PALETTE.len()],
        None => UNSETTLED,
    }
}

pub fn to_image(map: &BasinMap) -> RgbImage {
    let n = map.resolution as u32;
    RgbImage::from_fn(n, n, |col, row| {
        let magnet = map.get(col as usize, row as usize).and_then(|c| c.magnet);
        Rgb(magnet_color(magnet))
    })
}

pub fn save_png(map: &BasinMap, path: &Path) -> Result<()> {
    to_image(map).save_with_format(path, ImageFormat::Png)?;
    info!("wrote {}", path.display());
    Ok(())
}
