//! Small display helpers.

/// Human-readable byte sizes (B, KB, MB, GB), one decimal under 10.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

  let mut value = bytes as f64;
  let mut unit = 0;
  while value >= 1024.0 && unit < UNITS.len() - 1 {
    value /= 1024.0;
    unit += 1;
  }

  if value < 10.0 && unit > 0 {
    format!("{value:.1} {}", UNITS[unit])
  } else {
    format!("{} {}", value.round() as u64, UNITS[unit])
  }
}

#[cfg(test)]
mod tests {
  use super::format_bytes;

  #[test]
  fn formats_byte_ranges() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(512), "512 B");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(10 * 1024 * 1024), "10 MB");
    assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
  }
}
