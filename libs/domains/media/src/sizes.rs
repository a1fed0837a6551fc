//! Size-key allocation for persisted image rows.
//!
//! The image tables key rows by size label, but an upload batch can contain
//! several images of the same size. The first image of a size keeps the bare
//! label; later ones get a numeric suffix (`150x150`, `150x150_2`,
//! `150x150_3`, ...). API responses always report the bare label, so the
//! suffix never leaks to consumers.

use std::collections::HashMap;

/// Allocate a unique storage key for each size label in input order.
pub fn allocate_size_keys<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, u32> = HashMap::new();

    labels
        .into_iter()
        .map(|label| {
            let count = seen.entry(label).or_insert(0);
            *count += 1;
            if *count == 1 {
                label.to_string()
            } else {
                format!("{}_{}", label, count)
            }
        })
        .collect()
}

/// The bare size label for a storage key: strips a trailing `_<n>` suffix.
pub fn display_size(key: &str) -> &str {
    if let Some((prefix, suffix)) = key.rsplit_once('_') {
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            return prefix;
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_per_size_keeps_bare_label() {
        let keys = allocate_size_keys(["150x150", "400x400"]);
        assert_eq!(keys, vec!["150x150", "400x400"]);
    }

    #[test]
    fn test_repeated_sizes_get_numeric_suffixes() {
        let keys = allocate_size_keys(["150x150", "150x150", "400x400", "150x150"]);
        assert_eq!(keys, vec!["150x150", "150x150_2", "400x400", "150x150_3"]);
    }

    #[test]
    fn test_display_size_strips_suffix() {
        assert_eq!(display_size("150x150"), "150x150");
        assert_eq!(display_size("150x150_2"), "150x150");
        assert_eq!(display_size("1200x1200_10"), "1200x1200");
    }

    #[test]
    fn test_display_size_keeps_non_numeric_suffix() {
        assert_eq!(display_size("original"), "original");
        assert_eq!(display_size("size_x"), "size_x");
    }
}
