//! Fetching, decoding and downscaling.

use crate::{Error, ImageRef, MAX_DIMENSION, Resolve};
use image::{DynamicImage, Rgb, RgbImage, codecs::jpeg::JpegEncoder, imageops::FilterType};
use pcore::Image;
use reqwest::Client;

/// JPEG quality of re-encoded images.
const JPEG_QUALITY: u8 = 90;

/// Resolves references from disk, http(s) or memory.
#[derive(Clone)]
pub struct Loader {
    client: Client,
    max_dimension: u32,
}

impl Loader {
    /// Create a loader scaling to [`MAX_DIMENSION`].
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_dimension: MAX_DIMENSION,
        }
    }

    /// Override the longest edge of resolved images.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    /// The longest edge of resolved images.
    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    async fn fetch(&self, reference: &ImageRef) -> Result<Vec<u8>, Error> {
        match reference {
            ImageRef::Path(path) => Ok(tokio::fs::read(path).await?),
            ImageRef::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes().await?.to_vec())
            }
            ImageRef::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl Resolve for Loader {
    async fn resolve(&self, reference: &ImageRef) -> Result<Image, Error> {
        let bytes = self.fetch(reference).await?;
        let max_dimension = self.max_dimension;
        let image = tokio::task::spawn_blocking(move || decode(&bytes, max_dimension)).await??;
        tracing::debug!(
            "resolved {reference} to {}x{} ({} bytes)",
            image.width,
            image.height,
            image.data.len()
        );
        Ok(image)
    }
}

/// Scale `(width, height)` so the longest edge is at most `max`.
///
/// Aspect ratio is preserved and neither edge drops below one pixel.
/// Images already within bounds keep their size: this only downscales and
/// never enlarges a small image to fill `max`, unlike an exact-fit scale.
pub fn target_size(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }

    let scale = f64::from(max) / f64::from(longest);
    let fit = |edge: u32| ((f64::from(edge) * scale).round() as u32).clamp(1, max);
    (fit(width), fit(height))
}

/// Decode `bytes`, flatten transparency onto white, downscale and encode
/// as JPEG.
pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Image, Error> {
    let decoded = image::load_from_memory(bytes)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(Error::Empty);
    }

    let (width, height) = target_size(decoded.width(), decoded.height(), max_dimension);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    let rgba = resized.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = u16::from(pixel[3]);
        let blend = |channel: u8| -> u8 {
            (((u16::from(channel) * alpha) + (255 * (255 - alpha))) / 255) as u8
        };
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY)
        .encode_image(&DynamicImage::ImageRgb8(flattened))
        .map_err(Error::Encode)?;

    Ok(Image {
        mime: "image/jpeg".into(),
        data,
        width,
        height,
    })
}
