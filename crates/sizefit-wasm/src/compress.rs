//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_to_target`] - Compress to a budget, throwing if it cannot be met
//! - [`compress_best_effort`] - Same search, returning the closest result instead of throwing
//! - [`target_presets`] - The preset budgets offered by the UI
//!
//! # Example
//!
//! ```typescript
//! import { JsSourceImage, compress_best_effort } from '@sizefit/wasm';
//!
//! const { data, width, height } = ctx.getImageData(0, 0, w, h);
//! const image = JsSourceImage.from_rgba(width, height, data);
//! const result = compress_best_effort(image, 100, { max_attempts: 20 }, (p) => {
//!   bar.style.width = `${(p.attempt / p.max_attempts) * 100}%`;
//! });
//! if (!result.met_target) showWarning(`Closest: ${result.size_kb} KB`);
//! ```

use crate::types::{JsCompressionResult, JsSourceImage};
use serde::Serialize;
use sizefit_core::{
    kb_to_bytes, CompressionError, EncodeConfig, Progress, SizeConstrainedEncoder, TargetSize,
};
use wasm_bindgen::prelude::*;

/// Progress payload passed to the JS callback.
#[derive(Serialize)]
struct ProgressJs {
    attempt: u32,
    max_attempts: u32,
    quality: f64,
    scale: f64,
    width: u32,
    height: u32,
    size: u64,
    within_target: bool,
}

impl From<&Progress> for ProgressJs {
    fn from(p: &Progress) -> Self {
        Self {
            attempt: p.attempt,
            max_attempts: p.max_attempts,
            quality: p.quality,
            scale: p.scale,
            width: p.width,
            height: p.height,
            size: p.size,
            within_target: p.within_target,
        }
    }
}

/// Preset budget for the UI.
#[derive(Serialize)]
struct PresetJs {
    label: &'static str,
    kilobytes: u64,
}

/// Parse an optional config object; `undefined`/`null` means defaults.
pub(crate) fn parse_config(config: JsValue) -> Result<EncodeConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EncodeConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid encode config: {}", e)))
}

fn run(
    image: &JsSourceImage,
    target_kb: u32,
    config: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<Result<JsCompressionResult, CompressionError>, JsValue> {
    let config = parse_config(config)?;
    let source = match image.to_source() {
        Ok(source) => source,
        Err(e) => return Ok(Err(e.into())),
    };

    let search = SizeConstrainedEncoder::jpeg().with_config(config);
    let report = |p: &Progress| {
        if let Some(callback) = &on_progress {
            if let Ok(value) = serde_wasm_bindgen::to_value(&ProgressJs::from(p)) {
                // A throwing callback must not abort the search
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        }
    };

    Ok(search
        .compress_with(
            &source,
            kb_to_bytes(target_kb as u64),
            &sizefit_core::compress::Unstoppable,
            report,
        )
        .map(JsCompressionResult::from_compressed))
}

/// Compress an image to at most `target_kb` kilobytes of JPEG.
///
/// # Arguments
///
/// * `image` - The RGB image to compress
/// * `target_kb` - Budget in kilobytes (1 KB = 1024 bytes)
/// * `config` - Optional partial `EncodeConfig` object; missing fields use defaults
/// * `on_progress` - Optional callback invoked once per attempt
///
/// # Errors
///
/// Throws if the image is invalid, the config is malformed, encoding fails,
/// or the budget is not met within `max_attempts`. The message for an
/// unmet budget names the closest size reached.
#[wasm_bindgen]
pub fn compress_to_target(
    image: &JsSourceImage,
    target_kb: u32,
    config: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<JsCompressionResult, JsValue> {
    run(image, target_kb, config, on_progress)?.map_err(|e| JsValue::from_str(&describe(&e)))
}

/// Like [`compress_to_target`], but an unmet budget returns the closest
/// result with `met_target == false` instead of throwing.
#[wasm_bindgen]
pub fn compress_best_effort(
    image: &JsSourceImage,
    target_kb: u32,
    config: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<JsCompressionResult, JsValue> {
    match run(image, target_kb, config, on_progress)? {
        Ok(result) => Ok(result),
        Err(CompressionError::TargetUnreachable {
            attempts,
            best: Some(best),
            ..
        }) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Target of {} KB not met; returning closest result ({} bytes)",
                target_kb,
                best.size()
            )));
            Ok(JsCompressionResult::from_best_effort(best, attempts))
        }
        Err(e) => Err(JsValue::from_str(&describe(&e))),
    }
}

/// The preset budgets as `[{ label, kilobytes }]`.
#[wasm_bindgen]
pub fn target_presets() -> Result<JsValue, JsValue> {
    let presets: Vec<PresetJs> = TargetSize::ALL
        .iter()
        .map(|t| PresetJs {
            label: t.label(),
            kilobytes: t.kilobytes(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&presets).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// User-facing message for a failed compression.
pub(crate) fn describe(err: &CompressionError) -> String {
    match err.best_effort() {
        Some(best) => format!("{} (closest: {} bytes)", err, best.size()),
        None => err.to_string(),
    }
}
