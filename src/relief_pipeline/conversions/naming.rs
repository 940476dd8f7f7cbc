//! Output file naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Significant digits kept in a width label.
const WIDTH_SIG_DIGITS: i32 = 6;

/// Formats a width in C `%g` style: six significant digits, trailing zeros
/// dropped, exponent form outside `1e-4..1e6`. `100.0` → `"100"`,
/// `12.3456789` → `"12.3457"`, `1.5e7` → `"1.5e+07"`.
pub fn format_width_mm(width_mm: f64) -> String {
    if !width_mm.is_finite() || width_mm == 0.0 {
        return format!("{}", width_mm);
    }

    // `{:e}` rounds first, so the exponent already reflects carries like 999999.5
    let sci = format!("{:.*e}", (WIDTH_SIG_DIGITS - 1) as usize, width_mm);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if (-4..WIDTH_SIG_DIGITS).contains(&exp) {
        let decimals = (WIDTH_SIG_DIGITS - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, width_mm)).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Base path (no extension) for every file derived from `input`.
///
/// Without `out` this is `<input_dir>/<stem>_W<width>mm`. An absolute `out`
/// is used as given; a relative one is resolved under the input directory.
pub fn resolve_out_base(input: &Path, out: Option<&Path>, width_mm: f64) -> PathBuf {
    let input_dir = input.parent().unwrap_or_else(|| Path::new(""));

    match out {
        Some(out) if out.is_absolute() => out.to_path_buf(),
        Some(out) => input_dir.join(out),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "relief".to_string());
            input_dir.join(format!("{}_W{}mm", stem, format_width_mm(width_mm)))
        }
    }
}

/// Appends `suffix` to the final path component. Unlike
/// `Path::with_extension` a dot already in the base (`_W12.5mm`) is kept.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
