//! Image → input tensor.
//!
//! Resize to 224×224 (bilinear), scale to [0, 1], then normalize each channel
//! with ImageNet statistics. Output layout is NCHW with N = 1.

use image::DynamicImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

use crate::error::AiError;

/// Square input resolution expected by every backbone.
pub const INPUT_SIZE: u32 = 224;

pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Convert a decoded image of any size and colour type into a
/// `[1, 3, 224, 224]` normalized tensor.
pub fn preprocess(image: &DynamicImage) -> Result<Array4<f32>, AiError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(AiError::EmptyImage);
    }

    let rgb = image.to_rgb8();
    let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

    let side = INPUT_SIZE as usize;
    let tensor = Array4::from_shape_fn((1, 3, side, side), |(_, c, y, x)| {
        let value = resized.get_pixel(x as u32, y as u32).0[c] as f32 / 255.0;
        (value - MEAN[c]) / STD[c]
    });

    Ok(tensor)
}
