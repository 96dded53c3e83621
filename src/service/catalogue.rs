// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default attribute catalogue.
//!
//! The fixed set of named attributes every store starts from. Each entry
//! carries its default value and access tier; `ConfigStore::install_defaults`
//! copies the whole list into the registry.

use crate::domain::{AccessTier, Attribute, Value};

/// Number of `screen_calibrationN` attributes in the catalogue.
pub const MAX_NUM_CALIBRATED_SCREENS: usize = 10;

/// Loopback address used as the default server endpoint.
pub const LOCALHOST: &str = "127.0.0.1";

/// The nine-value calibration used for the first screen.
pub fn default_screen_calibration() -> Vec<f64> {
    vec![-200.0, 50.0, -200.0, 400.0, 0.0, 0.0, 0.0, 250.0, 0.0]
}

/// Name of the calibration attribute for screen `index`.
pub fn screen_calibration_name(index: usize) -> String {
    format!("screen_calibration{}", index)
}

struct Catalogue(Vec<(String, Attribute)>);

impl Catalogue {
    fn open(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.add(name, value, AccessTier::WriteOpen)
    }

    fn restricted(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.add(name, value, AccessTier::WriteRestricted)
    }

    fn add(&mut self, name: &str, value: impl Into<Value>, tier: AccessTier) -> &mut Self {
        self.0.push((name.to_string(), Attribute::new(value, tier)));
        self
    }
}

/// Returns every default attribute with its tier, in installation order.
///
/// # Examples
///
/// ```rust
/// use valcfg::domain::AccessTier;
/// use valcfg::service::catalogue::default_attributes;
///
/// let defaults = default_attributes();
/// let (_, port) = defaults.iter().find(|(name, _)| name == "websockets_port").unwrap();
/// assert_eq!(port.tier, AccessTier::WriteRestricted);
/// ```
pub fn default_attributes() -> Vec<(String, Attribute)> {
    let mut c = Catalogue(Vec::new());

    c.open("camera_type", "UVCI")
        .restricted("camera_dump_file", "")
        .open("camera_framerate_limit", 1000.0)
        .open("camera_sensitivity", 1.0)
        .open("camera_requires_calib", true)
        .restricted("optical_infinity_value", 161.8);

    c.restricted("dump_replay_framerate", 10)
        .restricted("dump_replay_repeat", true)
        .restricted("dump_replay_min_clients", 0)
        .restricted("dump_replay_max_wait_ms", 1000)
        .restricted("dump_replay_processed_only", true);

    c.restricted("pipeline_stop_requested", false)
        .restricted("plugin_host_stop_requested", false)
        .restricted("spherical_wavefront_frequency", 450)
        .restricted("use_wavefront_photon_slowdown", true)
        .restricted("debug_use_image_viewer", false)
        .restricted("debug_rect_images", true);

    c.open("camera_mode", "HVGA")
        .open("image_width", 640)
        .open("image_height", 480)
        .open("image_source_width", 640)
        .open("image_source_height", 480)
        .open("image_calib_width", 640)
        .open("image_calib_height", 480)
        .open("tracking_mode", "balanced");

    c.restricted("xray_pulse_width", 100)
        .restricted("sampling_max_gap", 1.0)
        .restricted("sampling_min_gap", 0.1)
        .restricted("sampling_max_gap_robust", 0.8)
        .restricted("sampling_min_gap_robust", 0.08)
        .restricted("debug_trifocal_tensors", true);

    c.open("robust_mode_enabled", true)
        .open("low_resource_mode_enabled", false)
        .open("background_app_mode", 1)
        .restricted("plasmeto_mode_enabled", false);

    c.restricted("debug_output_level", 3)
        .restricted("debug_output_mode", "console")
        .restricted("profiling_output_level", 1)
        .restricted("profiling_output_mode", "none");

    c.open("websockets_enabled", true)
        .restricted("websockets_port", 6437)
        .open("server_connect_ip", LOCALHOST)
        .open("print_timestamps_in_log", true)
        .restricted("use_interference_fringing_pattern", true);

    c.restricted("filtering_enabled", true)
        .restricted("filtering_scale_posunc", 1.0)
        .restricted("filtering_scale_velunc", 1.0)
        .restricted("filtering_scale_dirunc", 1.0)
        .restricted("filtering_target_posunc", 1.25e-2)
        .restricted("filtering_target_velunc", 1.25e-2)
        .restricted("filtering_target_dirunc", 1.25e-2)
        .restricted("filtering_user_unc", 5e-2)
        .restricted("filtering_user_scale", 20.0)
        .restricted("filtering_near_dist", 1)
        .restricted("filtering_far_dist", 500)
        .restricted("filtering_position_smooth_min", 0.3)
        .restricted("filtering_position_smooth_max", 0.015)
        .restricted("filtering_position_adapt_rate", 1e-7)
        .restricted("filtering_direction_smooth_min", 0.025)
        .restricted("filtering_direction_smooth_max", 0.0001)
        .restricted("filtering_direction_adapt_rate", 0.025);

    c.restricted("tracking_classify_threshold", 0.74757)
        .open("tracking_transform_angle", 0)
        .open("tracking_shift_x", 0)
        .restricted("holotopic_tomography_slices", 0.9);

    c.open("image_processing_auto_flip", true)
        .restricted("image_processing_cropped", false)
        .restricted("image_processing_throttled", false)
        .restricted("image_processing_standby", true)
        .restricted("image_processing_mode", 1);

    c.open("power_saving_adapter", false)
        .open("power_saving_battery", true)
        .restricted("use_robust_tips", true);

    // 0 is the disabled output mode.
    c.open("os_interaction_mode", 0)
        .open("os_interaction_multi_monitor", false);

    c.open("interaction_box_auto", false)
        .open("interaction_box_height", 200)
        .open("interaction_box_scale", 0.8)
        .open("interaction_center_x", 0)
        .open("interaction_center_y", 200)
        .open("interaction_center_z", 0);

    c.open("autoplane_closeness_epsilon", 4.0)
        .open("autoplane_covariance_scale_factor", 0.5)
        .open("autoplane_time_window", 0.4)
        .open("autoplane_warmup_time", 0.333)
        .open("autoplane_hover_zone_cutoff", 70.0)
        .open("autoplane_dead_zone_cutoff", 220.0)
        .open("autoplane_function_steepness", 1.0)
        .open("autoplane_function_width", 4.0)
        .open("autoplane_function_speed", 0.5);

    c.open("klaatu_barada_nikto", true)
        .restricted("FPS_throttle", true)
        .restricted("adjust_radiance", true)
        .open("hand_isolation_enabled", true);

    c.open("screen_detected", false);
    for point in 0..8 {
        for axis in ["x", "y", "z"] {
            c.open(&format!("screen_point{}_{}", point, axis), 0.0);
        }
    }
    c.open("reflection_removal_enabled", true);

    c.open("auto_check_updates", !cfg!(feature = "internal"))
        .open("force_accept_updates", false);

    for index in 0..MAX_NUM_CALIBRATED_SCREENS {
        let calibration: Value = if index == 0 {
            default_screen_calibration().into_iter().map(Value::from).collect()
        } else {
            Value::new_array()
        };
        c.open(&screen_calibration_name(index), calibration);
    }

    if cfg!(feature = "language_menu") {
        c.open("display_language", "");
    }

    c.0
}
