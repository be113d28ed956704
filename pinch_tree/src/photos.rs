//! Photo loading.
//!
//! Every image in the photo directory is decoded on a loader thread and
//! handed over a channel as it finishes, so arrival order is whatever the
//! loader gets to first. A file that fails to decode is logged and skipped;
//! the gallery cycles over whatever did load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use crate::canvas::Bitmap;

/// Edge length of the square thumbnails drawn in the cloud.
pub const THUMB_SIZE: u32 = 128;
const EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read photo directory {path}: {source}")]
    Dir {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// One decoded photo: a square thumbnail for the cloud and a larger,
/// aspect-preserving copy for the viewer.
#[derive(Clone, Debug)]
pub struct Photo {
    pub path:  PathBuf,
    pub thumb: Bitmap,
    pub full:  Bitmap,
}

/// Image files in `dir`, sorted by name.
pub fn list_photos(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let entries = fs::read_dir(dir).map_err(|source| AssetError::Dir { path: dir.to_path_buf(), source })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

pub fn decode_photo(path: &Path, full_max: u32) -> Result<Photo, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?;
    let (w, h) = img.dimensions();
    let side   = w.min(h);
    let square = img.crop_imm((w - side) / 2, (h - side) / 2, side, side);
    Ok(Photo {
        path:  path.to_path_buf(),
        thumb: to_bitmap(&square.thumbnail(THUMB_SIZE, THUMB_SIZE)),
        full:  to_bitmap(&img.thumbnail(full_max, full_max)),
    })
}

fn to_bitmap(img: &DynamicImage) -> Bitmap {
    let rgba = img.to_rgba8();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
        })
        .collect();
    Bitmap { width: rgba.width(), height: rgba.height(), pixels }
}

/// Spawn the loader thread for `dir` and return the receiving end.
pub fn spawn_photo_loader(dir: PathBuf, full_max: u32) -> Receiver<Photo> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let paths = match list_photos(&dir) {
            Ok(p)  => p,
            Err(e) => {
                log::warn!("[photos] {}", e);
                return;
            }
        };
        log::info!("[photos] loading {} file(s) from {}", paths.len(), dir.display());
        for path in paths {
            match decode_photo(&path, full_max) {
                Ok(photo) => {
                    if tx.send(photo).is_err() {
                        return;
                    }
                }
                Err(e) => log::warn!("[photos] {}", e),
            }
        }
    });
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// PhotoLibrary
// ════════════════════════════════════════════════════════════════════════════

/// Photos received so far. Only ever grows, so indices stay valid.
#[derive(Debug, Default)]
pub struct PhotoLibrary {
    thumbs: Vec<Bitmap>,
    fulls:  Vec<Bitmap>,
    rx:     Option<Receiver<Photo>>,
}

impl PhotoLibrary {
    pub fn loading(rx: Receiver<Photo>) -> Self {
        PhotoLibrary { rx: Some(rx), ..Self::default() }
    }

    pub fn push(&mut self, photo: Photo) {
        log::debug!("[photos] ready: {}", photo.path.display());
        self.thumbs.push(photo.thumb);
        self.fulls.push(photo.full);
    }

    /// Take every photo that has arrived since the last poll.
    pub fn poll(&mut self) {
        let Some(rx) = self.rx.take() else { return };
        loop {
            match rx.try_recv() {
                Ok(photo) => self.push(photo),
                Err(TryRecvError::Empty) => {
                    self.rx = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    log::info!("[photos] {} photo(s) available", self.thumbs.len());
                    return;
                }
            }
        }
    }

    pub fn thumbnails(&self)        -> &[Bitmap]       { &self.thumbs }
    pub fn full(&self, i: usize)    -> Option<&Bitmap> { self.fulls.get(i) }
    pub fn len(&self)               -> usize           { self.thumbs.len() }
    pub fn is_empty(&self)          -> bool            { self.thumbs.is_empty() }
    pub fn is_loading(&self)        -> bool            { self.rx.is_some() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
