// Texture loading seam between the simulation and the GPU

use std::path::Path;

use image::imageops::FilterType;

use crate::error::AssetError;

/// Cubemap face files inside a skybox directory, in +X, -X, +Y, -Y, +Z, -Z order.
pub const SKYBOX_FACES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// Opaque reference to a texture owned by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Loads pixels from a path into something the renderer can bind.
pub trait TextureLoader {
    fn load(&mut self, path: &Path) -> Result<TextureHandle, AssetError>;

    /// Loads the six [`SKYBOX_FACES`] found in `dir` as one cubemap.
    fn load_cubemap(&mut self, dir: &Path) -> Result<TextureHandle, AssetError>;
}

/// Tightly packed RGBA8 pixels, first row at the bottom of the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Six square RGBA8 faces stored back to back in [`SKYBOX_FACES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CubemapPixels {
    pub size: u32,
    pub rgba: Vec<u8>,
}

fn open_rgba(path: &Path) -> Result<image::DynamicImage, AssetError> {
    image::open(path).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes an image file, flipped vertically so v = 0 samples its bottom edge.
pub fn decode_texture(path: &Path) -> Result<TexturePixels, AssetError> {
    let image = open_rgba(path)?.flipv().into_rgba8();
    let (width, height) = image.dimensions();
    Ok(TexturePixels {
        width,
        height,
        rgba: image.into_raw(),
    })
}

/// Decodes the faces of a skybox directory. Faces keep their stored row order.
pub fn decode_cubemap(dir: &Path) -> Result<CubemapPixels, AssetError> {
    let mut size = None;
    let mut rgba = Vec::new();
    for face in SKYBOX_FACES {
        let path = dir.join(face);
        let image = open_rgba(&path)?.into_rgba8();
        let found = image.dimensions();
        let expected = *size.get_or_insert(found.0);
        if found != (expected, expected) {
            return Err(AssetError::CubemapFace {
                path,
                expected,
                found,
            });
        }
        rgba.extend_from_slice(image.as_raw());
    }
    Ok(CubemapPixels {
        size: size.unwrap_or_default(),
        rgba,
    })
}

/// Full mip chain down to 1×1, starting with `base`.
pub fn mip_chain(base: TexturePixels) -> Vec<TexturePixels> {
    let mut levels = vec![base];
    while let Some(last) = levels.last() {
        if last.width <= 1 && last.height <= 1 {
            break;
        }
        let Some(image) = image::RgbaImage::from_raw(last.width, last.height, last.rgba.clone()) else {
            break;
        };
        let (width, height) = ((last.width / 2).max(1), (last.height / 2).max(1));
        let next = image::imageops::resize(&image, width, height, FilterType::Triangle);
        levels.push(TexturePixels {
            width,
            height,
            rgba: next.into_raw(),
        });
    }
    levels
}
