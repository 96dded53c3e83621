// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image display parameters derived from the camera attributes.

use crate::domain::{ConfigError, Result, Value};
use std::fmt;
use std::str::FromStr;

/// A named camera resolution preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraMode {
    /// 640×480, no downsampling.
    Vga,
    /// 640×240, downsample 2.
    #[default]
    Hvga,
    /// 320×240, downsample 2.
    Qvga,
    /// 640×120, downsample 4.
    Hhvga,
    /// 320×120, downsample 4.
    Qhvga,
}

impl CameraMode {
    /// Every preset, in declaration order.
    pub const ALL: [CameraMode; 5] = [
        CameraMode::Vga,
        CameraMode::Hvga,
        CameraMode::Qvga,
        CameraMode::Hhvga,
        CameraMode::Qhvga,
    ];

    /// The attribute spelling of this preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Vga => "VGA",
            CameraMode::Hvga => "HVGA",
            CameraMode::Qvga => "QVGA",
            CameraMode::Hhvga => "HHVGA",
            CameraMode::Qhvga => "QHVGA",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraMode {
    type Err = ConfigError;

    /// Parses the exact, case-sensitive preset name.
    fn from_str(s: &str) -> Result<Self> {
        CameraMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::ImageConfigError {
                message: format!("Unknown camera mode '{}'", s),
            })
    }
}

/// Resolved image dimensions and downsampling.
///
/// # Examples
///
/// ```rust
/// use valcfg::service::{CameraMode, ImageConfig};
///
/// let config = ImageConfig::for_mode(CameraMode::Qvga);
/// assert_eq!((config.width, config.height), (320, 240));
/// assert_eq!((config.calib_width, config.calib_height), (640, 480));
/// assert_eq!(config.downsample_rate, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageConfig {
    /// Processed image width
    pub width: i32,
    /// Processed image height
    pub height: i32,
    /// Width delivered by the camera
    pub source_width: i32,
    /// Height delivered by the camera
    pub source_height: i32,
    /// Width the calibration was recorded at
    pub calib_width: i32,
    /// Height the calibration was recorded at
    pub calib_height: i32,
    /// Vertical downsampling factor
    pub downsample_rate: i32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            width: 0,
            height: 0,
            source_width: 0,
            source_height: 0,
            calib_width: 0,
            calib_height: 0,
            downsample_rate: 1,
        }
    }
}

impl ImageConfig {
    /// The fixed dimensions of a preset.
    pub fn for_mode(mode: CameraMode) -> Self {
        let (width, height, downsample_rate) = match mode {
            CameraMode::Vga => (640, 480, 1),
            CameraMode::Hvga => (640, 240, 2),
            CameraMode::Qvga => (320, 240, 2),
            CameraMode::Hhvga => (640, 120, 4),
            CameraMode::Qhvga => (320, 120, 4),
        };
        ImageConfig {
            width,
            height,
            source_width: width,
            source_height: height,
            calib_width: 640,
            calib_height: 480,
            downsample_rate,
        }
    }

    /// Derives the configuration from attribute values.
    ///
    /// A recognized `camera_mode` selects a preset. Otherwise the six raw
    /// `image_*` attributes are used and `downsample_rate` is carried over
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ImageConfigError` naming the first raw attribute
    /// that `lookup` could not supply.
    pub fn derive<F>(lookup: F, downsample_rate: i32) -> Result<Self>
    where
        F: Fn(&str) -> Option<Value>,
    {
        if let Some(mode) = lookup("camera_mode") {
            if let Ok(mode) = mode.coerce_to::<String>().parse::<CameraMode>() {
                return Ok(Self::for_mode(mode));
            }
        }

        let read = |name: &str| -> Result<i32> {
            lookup(name)
                .map(|v| v.coerce_to::<i32>())
                .ok_or_else(|| ConfigError::ImageConfigError {
                    message: format!("Attribute '{}' is not defined", name),
                })
        };

        Ok(ImageConfig {
            width: read("image_width")?,
            height: read("image_height")?,
            calib_width: read("image_calib_width")?,
            calib_height: read("image_calib_height")?,
            source_width: read("image_source_width")?,
            source_height: read("image_source_height")?,
            downsample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, Value)]) -> impl Fn(&str) -> Option<Value> {
        let map: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn raw_dims() -> Vec<(&'static str, Value)> {
        vec![
            ("image_width", Value::Int(800)),
            ("image_height", Value::Int(600)),
            ("image_calib_width", Value::Int(1024)),
            ("image_calib_height", Value::Int(768)),
            ("image_source_width", Value::Int(1600)),
            ("image_source_height", Value::from("1200")),
        ]
    }

    #[test]
    fn test_camera_mode_round_trip() {
        for mode in CameraMode::ALL {
            assert_eq!(mode.to_string().parse::<CameraMode>().unwrap(), mode);
        }
        assert!("hvga".parse::<CameraMode>().is_err());
        assert_eq!(CameraMode::default(), CameraMode::Hvga);
    }

    #[test]
    fn test_presets() {
        let vga = ImageConfig::for_mode(CameraMode::Vga);
        assert_eq!(vga.calib_height, 480);
        assert_eq!((vga.width, vga.height, vga.downsample_rate), (640, 480, 1));

        let hvga = ImageConfig::for_mode(CameraMode::Hvga);
        assert_eq!((hvga.width, hvga.height, hvga.downsample_rate), (640, 240, 2));
        assert_eq!((hvga.source_width, hvga.source_height), (640, 240));
        assert_eq!((hvga.calib_width, hvga.calib_height), (640, 480));

        let hhvga = ImageConfig::for_mode(CameraMode::Hhvga);
        assert_eq!((hhvga.width, hhvga.height, hhvga.downsample_rate), (640, 120, 4));

        let qhvga = ImageConfig::for_mode(CameraMode::Qhvga);
        assert_eq!((qhvga.width, qhvga.height, qhvga.downsample_rate), (320, 120, 4));
    }

    #[test]
    fn test_preset_wins_over_raw_attributes() {
        let mut pairs = raw_dims();
        pairs.push(("camera_mode", Value::from("VGA")));
        let config = ImageConfig::derive(lookup_from(&pairs), 7).unwrap();
        assert_eq!(config, ImageConfig::for_mode(CameraMode::Vga));
    }

    #[test]
    fn test_unknown_mode_reads_raw_attributes() {
        let mut pairs = raw_dims();
        pairs.push(("camera_mode", Value::from("ROBUSTMODE")));
        let config = ImageConfig::derive(lookup_from(&pairs), 3).unwrap();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!((config.calib_width, config.calib_height), (1024, 768));
        assert_eq!((config.source_width, config.source_height), (1600, 1200));
        assert_eq!(config.downsample_rate, 3);
    }

    #[test]
    fn test_missing_raw_attribute_fails() {
        let pairs: Vec<_> = raw_dims()
            .into_iter()
            .filter(|(k, _)| *k != "image_calib_height")
            .collect();
        let err = ImageConfig::derive(lookup_from(&pairs), 1).unwrap_err();
        assert!(matches!(err, ConfigError::ImageConfigError { .. }));
        assert!(err.to_string().contains("image_calib_height"));
    }
}
