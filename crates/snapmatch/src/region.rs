use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rectangle in pixel coordinates, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionParseError {
    #[error("expected X,Y,WIDTH,HEIGHT, got {0:?}")]
    Format(String),
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("region must have a non-zero width and height")]
    Empty,
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, width, height] = parts[..] else {
            return Err(RegionParseError::Format(s.to_string()));
        };
        let num = |v: &str| {
            v.parse::<u32>()
                .map_err(|_| RegionParseError::Number(v.to_string()))
        };
        let region = Region {
            x: num(x)?,
            y: num(y)?,
            width: num(width)?,
            height: num(height)?,
        };
        if region.width == 0 || region.height == 0 {
            return Err(RegionParseError::Empty);
        }
        Ok(region)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl Region {
    /// Copy this region out of `img`. The region must lie inside the image.
    pub fn crop(&self, img: &RgbaImage) -> Result<RgbaImage> {
        let (w, h) = img.dimensions();
        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= w);
        let fits_y = self.y.checked_add(self.height).is_some_and(|b| b <= h);
        if !fits_x || !fits_y {
            bail!("Region {self} does not fit inside the {w}x{h} image");
        }
        Ok(image::imageops::crop_imm(img, self.x, self.y, self.width, self.height).to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn parses_four_numbers() {
        let r: Region = "170, 110,6,31".parse().unwrap();
        assert_eq!(
            r,
            Region {
                x: 170,
                y: 110,
                width: 6,
                height: 31
            }
        );
        assert_eq!(r.to_string(), "6x31+170+110");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("1,2,3".parse::<Region>(), Err(RegionParseError::Format(_))));
        assert_eq!(
            "1,2,x,4".parse::<Region>(),
            Err(RegionParseError::Number("x".to_string()))
        );
        assert_eq!("1,2,0,4".parse::<Region>(), Err(RegionParseError::Empty));
    }

    #[test]
    fn crop_copies_pixels() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 4, Rgba([255, 0, 0, 255]));
        let region = Region {
            x: 2,
            y: 3,
            width: 4,
            height: 5,
        };
        let cropped = region.crop(&img).unwrap();
        assert_eq!(cropped.dimensions(), (4, 5));
        assert_eq!(*cropped.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn crop_outside_image_fails() {
        let img = RgbaImage::new(10, 10);
        let region = Region {
            x: 8,
            y: 0,
            width: 4,
            height: 4,
        };
        let err = region.crop(&img).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }
}
