use anyhow::{Result, bail};
use pkg_constants::auth::{RESERVED_CURRENT_USER, SYSTEM_IDENTITY_SEPARATOR};

/// Maximum length of a DNS-1123 label.
const DNS_LABEL_MAX_LEN: usize = 63;

/// Maximum length of a DNS-1123 subdomain.
const DNS_SUBDOMAIN_MAX_LEN: usize = 253;

/// Validate a DNS-1123 label (namespaces, service-account namespaces).
/// Rules: lowercase `[a-z0-9-]`, max 63 chars, no leading/trailing hyphens.
pub fn validate_dns_label(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > DNS_LABEL_MAX_LEN {
        bail!(
            "name '{}' exceeds {} characters (got {})",
            name,
            DNS_LABEL_MAX_LEN,
            name.len()
        );
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("name '{}' must not start or end with a hyphen", name);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "name '{}' must contain only lowercase letters, digits, and hyphens [a-z0-9-]",
            name
        );
    }
    Ok(())
}

/// Validate a DNS-1123 subdomain: dot-separated labels, max 253 chars.
pub fn validate_dns_subdomain(name: &str) -> Result<()> {
    if name.len() > DNS_SUBDOMAIN_MAX_LEN {
        bail!(
            "name '{}' exceeds {} characters (got {})",
            name,
            DNS_SUBDOMAIN_MAX_LEN,
            name.len()
        );
    }
    for label in name.split('.') {
        validate_dns_label(label)?;
    }
    Ok(())
}

/// Validate that `name` can be used safely as a single URL path segment.
pub fn validate_path_segment_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name == "." || name == ".." {
        bail!("name may not be '{}'", name);
    }
    for forbidden in ["/", "%"] {
        if name.contains(forbidden) {
            bail!("name '{}' may not contain '{}'", name, forbidden);
        }
    }
    Ok(())
}

/// Validate an ordinary (non-system) user name.
pub fn validate_user_name(name: &str) -> Result<()> {
    validate_path_segment_name(name)?;
    if name.contains(SYSTEM_IDENTITY_SEPARATOR) {
        bail!(
            "user name '{}' may not contain '{}'",
            name,
            SYSTEM_IDENTITY_SEPARATOR
        );
    }
    if name == RESERVED_CURRENT_USER {
        bail!("user name may not be '{}'", RESERVED_CURRENT_USER);
    }
    Ok(())
}

/// Validate an ordinary (non-system) group name.
pub fn validate_group_name(name: &str) -> Result<()> {
    validate_path_segment_name(name)?;
    if name.contains(SYSTEM_IDENTITY_SEPARATOR) {
        bail!(
            "group name '{}' may not contain '{}'",
            name,
            SYSTEM_IDENTITY_SEPARATOR
        );
    }
    if name == RESERVED_CURRENT_USER {
        bail!("group name may not be '{}'", RESERVED_CURRENT_USER);
    }
    Ok(())
}
