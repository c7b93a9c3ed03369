//! Release version derivation.

/// Returns the version named by a release tag.
///
/// A single leading `v` is removed (`v1.2.3` -> `1.2.3`); any other tag is
/// returned unchanged.
#[must_use]
pub fn release_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_v() {
        assert_eq!(release_version("v1.2.3"), "1.2.3");
    }

    #[test]
    fn test_plain_version_unchanged() {
        assert_eq!(release_version("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_only_one_v_removed() {
        assert_eq!(release_version("vv1.0"), "v1.0");
    }

    #[test]
    fn test_non_semver_tags() {
        assert_eq!(release_version("nightly"), "nightly");
        assert_eq!(release_version("V2.0.0"), "V2.0.0");
        assert_eq!(release_version(""), "");
        assert_eq!(release_version("v"), "");
    }
}
