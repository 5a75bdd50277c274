//! The flat blur variant of a blurred palette.
//!
//! A palette with `background_appearance: blurred` produces two themes: the
//! regular one, and a "Blur" variant whose editor surfaces are fully
//! transparent. `Hybrid` in names and `-hybrid` in file names become `Blur`
//! and `-blur`.

use std::path::{Path, PathBuf};

use tinct_engine::palette::BLUR_MODE_FLAT;
use tinct_engine::{Meta, Palette};

/// Whether generating `meta` should also write a blur variant.
pub fn should_generate_blur_variant(meta: &Meta) -> bool {
    meta.is_blurred() && !meta.is_flat_blur()
}

fn rename(name: &str, suffix: &str) -> String {
    if name.is_empty() || name.contains("(Blur)") {
        name.to_string()
    } else if name.contains("(Hybrid)") {
        name.replace("(Hybrid)", "(Blur)")
    } else if name.contains("Hybrid") {
        name.replace("Hybrid", "Blur")
    } else {
        format!("{name}{suffix}")
    }
}

/// Display name of the blur variant.
pub fn blur_name(name: &str) -> String {
    rename(name, " Blur")
}

/// Theme entry name of the blur variant.
pub fn blur_theme_name(name: &str) -> String {
    rename(name, " (Blur)")
}

pub fn blur_variant_meta(meta: &Meta) -> Meta {
    Meta {
        name: blur_name(&meta.name),
        theme_name: blur_theme_name(&meta.theme_name),
        blur_mode: BLUR_MODE_FLAT.to_string(),
        ..meta.clone()
    }
}

/// A copy of `palette` rendering as the flat blur variant.
pub fn blur_variant(palette: &Palette) -> Palette {
    Palette {
        meta: blur_variant_meta(&palette.meta),
        ..palette.clone()
    }
}

/// Where the blur variant of the theme at `out` is written.
///
/// `None` when `out` already names a blur theme.
pub fn blur_output_path(out: &Path) -> Option<PathBuf> {
    let file_name = out.file_name()?.to_str()?;
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    let (stem, wip) = match stem.strip_suffix(".wip") {
        Some(stem) => (stem, true),
        None => (stem, false),
    };
    if stem.ends_with("-blur") {
        return None;
    }

    let mut name = match stem.strip_suffix("-hybrid") {
        Some(base) => format!("{base}-blur"),
        None => format!("{stem}-blur"),
    };
    if wip {
        name.push_str(".wip");
    }
    if let Some(ext) = ext {
        name.push('.');
        name.push_str(ext);
    }
    Some(out.with_file_name(name))
}
